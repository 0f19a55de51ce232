/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The merged image data section
//!
//! Everything after the layer and mask section. Only the compression
//! method is read, the pixel data itself is located.

use psdoc_core::bytestream::ByteCursor;
use psdoc_core::log::{debug, trace};

use crate::constants::CompressionMethod;
use crate::errors::{PSDDecodeErrors, Section};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageDataSection {
    /// Offset of the compression method field
    pub offset:           usize,
    pub compression_code: u16,
    /// `None` for codes outside the compression method table
    pub compression:      Option<CompressionMethod>,
    /// Bytes of pixel data following the compression field
    pub length:           usize
}

impl ImageDataSection {
    /// Decode the section if any bytes remain
    pub(crate) fn decode<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>
    ) -> Result<Option<ImageDataSection>, PSDDecodeErrors> {
        if stream.eof() {
            debug!("No image data section");
            return Ok(None);
        }
        Self::decode_fields(stream)
            .map(Some)
            .map_err(|e| e.within(Section::ImageData))
    }

    fn decode_fields<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>
    ) -> Result<ImageDataSection, PSDDecodeErrors> {
        let offset = stream.position();
        let compression_code = stream.get_u16_be_err()?;
        let compression = CompressionMethod::from_int(compression_code);
        let length = stream.remaining();

        stream.skip(length)?;

        trace!(
            "Image data: {} bytes, compression {:?}",
            length,
            compression.map(CompressionMethod::name)
        );

        Ok(ImageDataSection {
            offset,
            compression_code,
            compression,
            length
        })
    }

    /// The compressed pixel data within `file`, the buffer this
    /// section was decoded from
    pub fn data<'a>(&self, file: &'a [u8]) -> Option<&'a [u8]> {
        let start = self.offset + 2;
        file.get(start..start.checked_add(self.length)?)
    }
}
