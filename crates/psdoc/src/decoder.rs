/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The document decoder
//!
//! Sections are decoded in file order against one shared cursor, each
//! section starting where the previous one ended.

use psdoc_core::bytestream::ByteCursor;
use psdoc_core::log::{debug, trace};
use psdoc_core::options::DecoderOptions;

use crate::color_mode::ColorModeData;
use crate::document::Document;
use crate::errors::{PSDDecodeErrors, Section};
use crate::header::PSDHeader;
use crate::image_data::ImageDataSection;
use crate::layers::LayerMaskSection;
use crate::resources::ImageResources;
use crate::utils::DecodeContext;
use crate::warnings::DecodeWarning;

/// A Photoshop document structure decoder.
///
/// Reads the header, color mode data, image resources, the layer
/// directory and the location of the merged image data. Pixel data is
/// never decompressed.
pub struct PSDDecoder<T>
where
    T: AsRef<[u8]>
{
    stream: ByteCursor<T>,
    ctx:    DecodeContext,
    header: Option<PSDHeader>
}

impl<T> PSDDecoder<T>
where
    T: AsRef<[u8]>
{
    /// Create a new decoder over a buffer holding a whole document
    ///
    /// # Arguments
    /// - data: The encoded document
    pub fn new(data: T) -> PSDDecoder<T> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    /// Creates a new decoder with options that influence decoding routines
    ///
    /// # Arguments
    /// - data: The encoded document
    /// - options: Limits and strictness for the decoder
    pub fn new_with_options(data: T, options: DecoderOptions) -> PSDDecoder<T> {
        PSDDecoder {
            stream: ByteCursor::new(data),
            ctx:    DecodeContext::new(options),
            header: None
        }
    }

    /// Decode the file header only
    ///
    /// This confirms whether the buffer holds a photoshop document and
    /// extracts its dimensions, depth and color mode. Calling it more than
    /// once is a no-op.
    pub fn decode_headers(&mut self) -> Result<(), PSDDecodeErrors> {
        if self.header.is_some() {
            return Ok(());
        }
        let header = PSDHeader::decode(&mut self.stream, &mut self.ctx)?;
        self.header = Some(header);

        Ok(())
    }

    /// The decoded header, `None` before [`decode_headers`](Self::decode_headers)
    pub const fn header(&self) -> Option<&PSDHeader> {
        self.header.as_ref()
    }

    /// Width and height of the document, `None` before the header is decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header
            .as_ref()
            .map(|header| (header.width as usize, header.height as usize))
    }

    /// Warnings recorded so far
    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.ctx.warnings
    }

    /// Decode the whole document
    ///
    /// Fails on the first fatal error, a partially decoded document is
    /// never returned.
    pub fn decode(mut self) -> Result<Document, PSDDecodeErrors> {
        let header = match self.header.take() {
            Some(header) => header,
            None => PSDHeader::decode(&mut self.stream, &mut self.ctx)?
        };
        let PSDDecoder {
            mut stream,
            mut ctx,
            ..
        } = self;

        // large documents widen the section length fields to 64 bits
        if header.is_large_document() {
            return Err(PSDDecodeErrors::UnsupportedFeature {
                section: Section::ColorModeData,
                offset:  stream.position(),
                feature: "large document (PSB) section layout"
            });
        }

        let color_mode_data = ColorModeData::decode(&mut stream, &header, &mut ctx)?;
        let image_resources = ImageResources::decode(&mut stream, &mut ctx)?;
        let layer_mask = LayerMaskSection::decode(&mut stream, &mut ctx)?;
        let image_data = ImageDataSection::decode(&mut stream)?;

        trace!("Finished decoding at offset {}", stream.position());
        debug!(
            "Decoded {} resources and {} layers with {} warnings",
            image_resources.blocks.len(),
            layer_mask.layers().len(),
            ctx.warnings.len()
        );

        Ok(Document {
            header,
            color_mode_data,
            image_resources,
            layer_mask,
            image_data,
            warnings: ctx.warnings
        })
    }
}
