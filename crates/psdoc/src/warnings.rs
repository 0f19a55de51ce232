/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Advisory problems
//!
//! These do not stop decoding unless the decoder runs in strict mode,
//! in which case each becomes the matching [`PSDDecodeErrors`].

use core::fmt::{Display, Formatter};

use crate::constants::FourCC;
use crate::errors::{PSDDecodeErrors, Section};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WarningKind {
    /// A resource block or blend mode signature other than `8BIM`
    InvalidSignature { expected: FourCC, found: FourCC },
    /// Color mode data present for a mode that should have none
    UnexpectedColorModeData { length: u32 },
    /// An indexed color table that is not 768 bytes long
    UnusualPaletteLength { length: u32 },
    /// A header field outside the values the format allows
    UnusualHeaderValue { field: &'static str, value: u32 }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodeWarning {
    pub section: Section,
    /// Offset of the offending field
    pub offset:  usize,
    pub kind:    WarningKind
}

impl DecodeWarning {
    pub const fn new(section: Section, offset: usize, kind: WarningKind) -> DecodeWarning {
        DecodeWarning {
            section,
            offset,
            kind
        }
    }

    /// The error this warning becomes in strict mode
    pub fn into_error(self) -> PSDDecodeErrors {
        let DecodeWarning {
            section,
            offset,
            kind
        } = self;

        match kind {
            WarningKind::InvalidSignature { expected, found } => {
                PSDDecodeErrors::InvalidSignature {
                    section,
                    offset,
                    expected,
                    found
                }
            }
            WarningKind::UnexpectedColorModeData { .. } => PSDDecodeErrors::UnsupportedFeature {
                section,
                offset,
                feature: "color mode data for this color mode"
            },
            WarningKind::UnusualPaletteLength { .. } => PSDDecodeErrors::UnsupportedFeature {
                section,
                offset,
                feature: "indexed color table length"
            },
            WarningKind::UnusualHeaderValue { field, value } => {
                PSDDecodeErrors::UnsupportedHeaderValue { field, value }
            }
        }
    }
}

impl Display for DecodeWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (offset {}): ", self.section, self.offset)?;

        match self.kind {
            WarningKind::InvalidSignature { expected, found } => {
                write!(f, "expected signature {expected} but found {found}")
            }
            WarningKind::UnexpectedColorModeData { length } => {
                write!(f, "{length} bytes of color mode data skipped")
            }
            WarningKind::UnusualPaletteLength { length } => {
                write!(f, "color table of {length} bytes, expected 768")
            }
            WarningKind::UnusualHeaderValue { field, value } => {
                write!(f, "unusual {field} {value}")
            }
        }
    }
}
