/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The color mode data section
//!
//! Only indexed and duotone documents carry data here. The blob is
//! located, never interpreted.

use psdoc_core::bytestream::ByteCursor;
use psdoc_core::log::trace;

use crate::constants::{ColorModes, INDEXED_PALETTE_SIZE};
use crate::errors::{PSDDecodeErrors, Section};
use crate::header::PSDHeader;
use crate::utils::DecodeContext;
use crate::warnings::{DecodeWarning, WarningKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColorModeData {
    /// Offset of the first byte after the length field
    pub offset: usize,
    pub length: u32
}

impl ColorModeData {
    pub(crate) fn decode<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>, header: &PSDHeader, ctx: &mut DecodeContext
    ) -> Result<ColorModeData, PSDDecodeErrors> {
        Self::decode_fields(stream, header, ctx).map_err(|e| e.within(Section::ColorModeData))
    }

    fn decode_fields<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>, header: &PSDHeader, ctx: &mut DecodeContext
    ) -> Result<ColorModeData, PSDDecodeErrors> {
        let length_offset = stream.position();
        let length = stream.get_u32_be_err()?;
        let offset = stream.position();

        match header.color_mode {
            Some(ColorModes::IndexedColor) if length != INDEXED_PALETTE_SIZE => {
                ctx.advise(DecodeWarning::new(
                    Section::ColorModeData,
                    length_offset,
                    WarningKind::UnusualPaletteLength { length }
                ))?;
            }
            Some(mode) if mode.has_color_data() => {}
            _ if length != 0 => {
                // "For all other modes, this section is just the 4-byte length field, which is set to zero."
                ctx.advise(DecodeWarning::new(
                    Section::ColorModeData,
                    length_offset,
                    WarningKind::UnexpectedColorModeData { length }
                ))?;
            }
            _ => {}
        }
        // the blob is skipped whatever the mode, later sections start after it
        stream.skip(length as usize)?;

        trace!("Color mode data: {} bytes at {}", length, offset);

        Ok(ColorModeData { offset, length })
    }

    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The color mode data bytes within `file`, the buffer this
    /// section was decoded from
    pub fn data<'a>(&self, file: &'a [u8]) -> Option<&'a [u8]> {
        file.get(self.offset..self.offset.checked_add(self.length as usize)?)
    }
}
