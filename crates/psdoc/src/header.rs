/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The fixed 26 byte file header

use psdoc_core::bytestream::ByteCursor;
use psdoc_core::log::trace;

use crate::constants::{
    color_mode_name, ColorModes, FourCC, HEADER_SIZE, MAX_CHANNELS, PSD_SIGNATURE
};
use crate::errors::{PSDDecodeErrors, Section};
use crate::utils::DecodeContext;
use crate::warnings::{DecodeWarning, WarningKind};

/// Basic properties of the document
///
/// Fields are recorded as found in the file; values outside what the
/// format allows produce warnings, not different values.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PSDHeader {
    pub signature:       FourCC,
    /// 1 for PSD, 2 for large documents (PSB)
    pub version:         u16,
    pub channel_count:   u16,
    pub height:          u32,
    pub width:           u32,
    /// Bits per channel
    pub depth:           u16,
    pub color_mode_code: u16,
    /// `None` for codes outside the color mode table
    pub color_mode:      Option<ColorModes>
}

impl PSDHeader {
    pub(crate) fn decode<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>, ctx: &mut DecodeContext
    ) -> Result<PSDHeader, PSDDecodeErrors> {
        Self::decode_fields(stream, ctx).map_err(|e| e.within(Section::Header))
    }

    fn decode_fields<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>, ctx: &mut DecodeContext
    ) -> Result<PSDHeader, PSDDecodeErrors> {
        let start = stream.position();
        // Check identifier
        let signature = FourCC(stream.read_fixed_bytes_or_error::<4>()?);

        if signature != PSD_SIGNATURE {
            return Err(PSDDecodeErrors::InvalidSignature {
                section: Section::Header,
                offset: start,
                expected: PSD_SIGNATURE,
                found: signature
            });
        }

        let version = stream.get_u16_be_err()?;

        if !matches!(version, 1 | 2) {
            ctx.advise(header_warning(start + 4, "version", u32::from(version)))?;
        }
        // Skip 6 reserved bytes
        stream.skip(6)?;

        let channel_count = stream.get_u16_be_err()?;

        if channel_count == 0 || channel_count > MAX_CHANNELS {
            ctx.advise(header_warning(
                start + 12,
                "channel count",
                u32::from(channel_count)
            ))?;
        }

        let height = stream.get_u32_be_err()?;
        let width = stream.get_u32_be_err()?;

        if width as usize > ctx.options.get_max_width() {
            return Err(PSDDecodeErrors::LargeDimensions(
                ctx.options.get_max_width(),
                width as usize
            ));
        }

        if height as usize > ctx.options.get_max_height() {
            return Err(PSDDecodeErrors::LargeDimensions(
                ctx.options.get_max_height(),
                height as usize
            ));
        }

        let depth = stream.get_u16_be_err()?;

        if !matches!(depth, 1 | 8 | 16 | 32) {
            ctx.advise(header_warning(start + 22, "bit depth", u32::from(depth)))?;
        }

        let color_mode_code = stream.get_u16_be_err()?;
        let color_mode = ColorModes::from_int(color_mode_code);

        debug_assert_eq!(stream.position() - start, HEADER_SIZE);

        trace!("Version: {}", version);
        trace!("Image width:{}", width);
        trace!("Image height:{}", height);
        trace!("Channels: {}", channel_count);
        trace!("Bit depth : {}", depth);
        trace!("Color mode: {}", color_mode_name(color_mode_code));

        Ok(PSDHeader {
            signature,
            version,
            channel_count,
            height,
            width,
            depth,
            color_mode_code,
            color_mode
        })
    }

    /// Name of the color mode, `"unknown"` for codes outside the table
    pub fn color_mode_name(&self) -> &'static str {
        color_mode_name(self.color_mode_code)
    }

    /// Width and height in pixels
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether this is a large document (PSB)
    pub const fn is_large_document(&self) -> bool {
        self.version == 2
    }
}

fn header_warning(offset: usize, field: &'static str, value: u32) -> DecodeWarning {
    DecodeWarning::new(
        Section::Header,
        offset,
        WarningKind::UnusualHeaderValue { field, value }
    )
}
