/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;
use std::fmt::{Debug, Display, Formatter};

use psdoc::errors::PSDDecodeErrors;
use psdoc::{Document, PSDDecoder};
use psdoc_core::options::DecoderOptions;

pub enum ProbeErrors {
    /// The file could not be read
    Io(OsString, std::io::Error),
    /// The file is not a well formed document
    Decode(OsString, PSDDecodeErrors),
    Json(serde_json::Error),
    /// Number of files that failed to decode
    FilesFailed(usize)
}

impl Display for ProbeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeErrors::Io(file, err) => {
                write!(f, "Could not read {}: {err}", file.to_string_lossy())
            }
            ProbeErrors::Decode(file, err) => {
                write!(f, "Could not decode {}: {err}", file.to_string_lossy())
            }
            ProbeErrors::Json(err) => write!(f, "Could not serialize document: {err}"),
            ProbeErrors::FilesFailed(count) => write!(f, "{count} file(s) could not be decoded")
        }
    }
}

impl Debug for ProbeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for ProbeErrors {}

impl From<serde_json::Error> for ProbeErrors {
    fn from(value: serde_json::Error) -> Self {
        ProbeErrors::Json(value)
    }
}

/// A document on disk
pub struct PsdFile {
    file_path: OsString,
    options:   DecoderOptions
}

impl PsdFile {
    pub fn new(file_path: OsString, options: DecoderOptions) -> PsdFile {
        PsdFile { file_path, options }
    }

    pub fn path(&self) -> &OsString {
        &self.file_path
    }

    /// Read the whole file and decode it, returning the file size
    /// together with the document
    pub fn decode(&self) -> Result<(u64, Document), ProbeErrors> {
        let data = std::fs::read(&self.file_path)
            .map_err(|e| ProbeErrors::Io(self.file_path.clone(), e))?;

        let document = PSDDecoder::new_with_options(&data, self.options)
            .decode()
            .map_err(|e| ProbeErrors::Decode(self.file_path.clone(), e))?;

        Ok((data.len() as u64, document))
    }
}
