/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{self, Display, Formatter};

use clap::ArgMatches;
use log::{error, info};
use psdoc::resources::describe_resource_id;
use psdoc::Document;

use crate::cmd_parsers::global_options::CmdOptions;
use crate::file_io::{ProbeErrors, PsdFile};
use crate::serde::Metadata;

/// Decode input files and print their structure to standard output.
///
/// Every file is attempted, failures are logged and reported together
/// once all files have been probed.
pub fn probe_input_files(args: &ArgMatches, cmd_options: &CmdOptions) -> Result<(), ProbeErrors> {
    let mut failed = 0;

    for in_file in args.get_raw("in").into_iter().flatten() {
        let file = PsdFile::new(in_file.to_os_string(), cmd_options.options);

        info!("Decoding {:?}", file.path());

        let (size, document) = match file.decode() {
            Ok(decoded) => decoded,
            Err(e) => {
                error!("{}", e);
                failed += 1;
                continue;
            }
        };

        if cmd_options.json {
            let metadata = Metadata::new(in_file.to_os_string(), size, &document);
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        } else {
            let name = in_file.to_string_lossy();
            println!("{}", Summary::new(&name, size, &document));
        }
    }
    if failed > 0 {
        return Err(ProbeErrors::FilesFailed(failed));
    }
    Ok(())
}

/// Human readable outline of a document
pub struct Summary<'a> {
    file:     &'a str,
    size:     u64,
    document: &'a Document
}

impl<'a> Summary<'a> {
    pub fn new(file: &'a str, size: u64, document: &'a Document) -> Summary<'a> {
        Summary {
            file,
            size,
            document
        }
    }
}

impl Display for Summary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let document = self.document;
        let header = &document.header;

        writeln!(f, "{} ({} bytes)", self.file, self.size)?;
        writeln!(
            f,
            "  {}x{}, {} channel(s), {} bit, {}",
            header.width,
            header.height,
            header.channel_count,
            header.depth,
            header.color_mode_name()
        )?;

        if !document.color_mode_data.is_empty() {
            writeln!(
                f,
                "  color mode data: {} bytes",
                document.color_mode_data.length
            )?;
        }

        writeln!(f, "  resources: {}", document.resources().len())?;
        for block in document.resources() {
            write!(
                f,
                "    {:>5} {:<36} {} bytes",
                block.id,
                describe_resource_id(block.id).unwrap_or("unknown"),
                block.data_length
            )?;
            if !block.name.is_empty() {
                write!(f, " \"{}\"", block.name)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "  layers: {}", document.layers().len())?;
        // top-most layer first, the way layer panels list them
        for layer in document.layers().iter().rev() {
            writeln!(
                f,
                "    {:<24} {}x{} at ({}, {}), {}, opacity {}{}",
                layer.name.as_deref().unwrap_or("<unnamed>"),
                layer.width(),
                layer.height(),
                layer.left,
                layer.top,
                layer.blend_mode_name().unwrap_or("unknown blend mode"),
                layer.opacity,
                if layer.is_visible() { "" } else { ", hidden" }
            )?;
        }

        match &document.image_data {
            Some(image_data) => writeln!(
                f,
                "  image data: {} bytes, {}",
                image_data.length,
                image_data.compression.map_or("unknown compression", |c| c.name())
            )?,
            None => writeln!(f, "  image data: none")?
        }

        for warning in &document.warnings {
            writeln!(f, "  warning: {warning}")?;
        }
        Ok(())
    }
}
