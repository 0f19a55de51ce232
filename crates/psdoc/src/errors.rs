/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use psdoc_core::bytestream::ByteIoError;

use crate::constants::FourCC;

/// The part of the document being decoded when a problem was found
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Section {
    Header,
    ColorModeData,
    ImageResources,
    /// Resource block by its index in the image resources section
    ResourceBlock(usize),
    LayerAndMask,
    /// Layer record by its index in file order
    LayerRecord(usize),
    ImageData
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Section::Header => write!(f, "header"),
            Section::ColorModeData => write!(f, "color mode data"),
            Section::ImageResources => write!(f, "image resources"),
            Section::ResourceBlock(index) => write!(f, "resource block {index}"),
            Section::LayerAndMask => write!(f, "layer and mask information"),
            Section::LayerRecord(index) => write!(f, "layer record {index}"),
            Section::ImageData => write!(f, "image data")
        }
    }
}

/// PSDDecodeErrors that can occur during PSD decoding
///
/// Every error aborts the whole decode, no partially decoded
/// document is returned.
#[non_exhaustive]
pub enum PSDDecodeErrors {
    /// A four byte signature did not match.
    ///
    /// Always fatal for the file header, fatal for resource and blend
    /// signatures only in strict mode.
    InvalidSignature {
        section:  Section,
        offset:   usize,
        expected: FourCC,
        found:    FourCC
    },
    /// A read ran past the end of the buffer
    OutOfBounds {
        section: Section,
        error:   ByteIoError
    },
    /// A section consumed more bytes than it declared, so the cursor
    /// can no longer be trusted to sit on a section boundary.
    ///
    /// Both ends are absolute offsets into the buffer.
    StructuralMismatch {
        section:      Section,
        offset:       usize,
        declared_end: u64,
        actual_end:   u64
    },
    /// The document uses a feature the decoder refuses to approximate
    UnsupportedFeature {
        section: Section,
        offset:  usize,
        feature: &'static str
    },
    /// A header field outside the values the format allows, strict mode only
    UnsupportedHeaderValue { field: &'static str, value: u32 },
    /// Too large dimensions, supported size and found size
    LargeDimensions(usize, usize),
    /// A count exceeds the limit configured in the decoder options
    LimitExceeded {
        section: Section,
        offset:  usize,
        limit:   usize,
        found:   usize
    },
    /// A read failure not yet attributed to a section
    IoErrors(ByteIoError)
}

impl PSDDecodeErrors {
    /// Attribute an unattributed read failure to `section`
    ///
    /// Errors that already name their section are returned unchanged.
    pub(crate) fn within(self, section: Section) -> PSDDecodeErrors {
        match self {
            PSDDecodeErrors::IoErrors(error) => PSDDecodeErrors::OutOfBounds { section, error },
            other => other
        }
    }

    /// The section in which decoding failed, if known
    pub fn section(&self) -> Option<Section> {
        match self {
            PSDDecodeErrors::InvalidSignature { section, .. }
            | PSDDecodeErrors::OutOfBounds { section, .. }
            | PSDDecodeErrors::StructuralMismatch { section, .. }
            | PSDDecodeErrors::UnsupportedFeature { section, .. }
            | PSDDecodeErrors::LimitExceeded { section, .. } => Some(*section),
            PSDDecodeErrors::UnsupportedHeaderValue { .. }
            | PSDDecodeErrors::LargeDimensions(..) => Some(Section::Header),
            PSDDecodeErrors::IoErrors(_) => None
        }
    }

    /// The byte offset at which decoding failed, if known
    pub fn offset(&self) -> Option<usize> {
        match self {
            PSDDecodeErrors::InvalidSignature { offset, .. }
            | PSDDecodeErrors::StructuralMismatch { offset, .. }
            | PSDDecodeErrors::UnsupportedFeature { offset, .. }
            | PSDDecodeErrors::LimitExceeded { offset, .. } => Some(*offset),
            PSDDecodeErrors::OutOfBounds { error, .. } | PSDDecodeErrors::IoErrors(error) => {
                Some(error.position())
            }
            PSDDecodeErrors::UnsupportedHeaderValue { .. }
            | PSDDecodeErrors::LargeDimensions(..) => None
        }
    }
}

impl Display for PSDDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PSDDecodeErrors::InvalidSignature {
                section,
                offset,
                expected,
                found
            } => {
                write!(
                    f,
                    "{section}: expected signature {expected} but found {found} at offset {offset}"
                )
            }
            PSDDecodeErrors::OutOfBounds { section, error } => {
                write!(f, "{section}: {error}")
            }
            PSDDecodeErrors::StructuralMismatch {
                section,
                offset,
                declared_end,
                actual_end
            } => {
                write!(
                    f,
                    "{section}: declared to end at offset {declared_end} but decoding reached {actual_end} (detected at offset {offset})"
                )
            }
            PSDDecodeErrors::UnsupportedFeature {
                section,
                offset,
                feature
            } => {
                write!(f, "{section}: unsupported {feature} at offset {offset}")
            }
            PSDDecodeErrors::UnsupportedHeaderValue { field, value } => {
                write!(f, "header: unsupported {field} {value}")
            }
            PSDDecodeErrors::LargeDimensions(supported, found) => {
                write!(
                    f,
                    "Too large dimensions, supported {supported} but found {found}"
                )
            }
            PSDDecodeErrors::LimitExceeded {
                section,
                offset,
                limit,
                found
            } => {
                write!(
                    f,
                    "{section}: {found} entries at offset {offset} exceed the configured limit of {limit}"
                )
            }
            PSDDecodeErrors::IoErrors(e) => {
                write!(f, "I/O error: {e}")
            }
        }
    }
}

impl Debug for PSDDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(self, f)
    }
}

impl core::error::Error for PSDDecodeErrors {}

impl From<ByteIoError> for PSDDecodeErrors {
    fn from(r: ByteIoError) -> Self {
        Self::IoErrors(r)
    }
}
