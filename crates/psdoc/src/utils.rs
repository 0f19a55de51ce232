/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use psdoc_core::bytestream::{ByteCursor, ByteIoError};
use psdoc_core::log::warn;
use psdoc_core::options::DecoderOptions;

use crate::errors::{PSDDecodeErrors, Section};
use crate::warnings::DecodeWarning;

/// State shared by the section decoders during one decode
pub(crate) struct DecodeContext {
    pub(crate) options:  DecoderOptions,
    pub(crate) warnings: Vec<DecodeWarning>
}

impl DecodeContext {
    pub(crate) fn new(options: DecoderOptions) -> DecodeContext {
        DecodeContext {
            options,
            warnings: Vec::new()
        }
    }

    /// Record an advisory problem, or fail with it in strict mode
    pub(crate) fn advise(&mut self, warning: DecodeWarning) -> Result<(), PSDDecodeErrors> {
        if self.options.get_strict_mode() {
            return Err(warning.into_error());
        }
        warn!("{}", warning);
        self.warnings.push(warning);
        Ok(())
    }
}

/// Round a length up to the next even number
pub(crate) const fn pad_to_even(length: u64) -> u64 {
    (length + 1) & !1
}

/// Move the cursor to the absolute offset a section declared as its end
///
/// Landing behind the cursor means the section consumed more than it
/// declared, which is a structural error rather than a no-op.
pub(crate) fn seek_to_declared_end<T: AsRef<[u8]>>(
    stream: &mut ByteCursor<T>, section: Section, declared_end: u64
) -> Result<(), PSDDecodeErrors> {
    let position = stream.position();

    if declared_end < position as u64 {
        warn!(
            "{}: declared end {} is behind the cursor at {}",
            section, declared_end, position
        );
        return Err(PSDDecodeErrors::StructuralMismatch {
            section,
            offset: position,
            declared_end,
            actual_end: position as u64
        });
    }
    let target = usize::try_from(declared_end)
        .map_err(|_| ByteIoError::SeekOutOfBounds(position, stream.len()))
        .and_then(|target| stream.skip_to(target));

    target.map_err(|error| PSDDecodeErrors::OutOfBounds { section, error })
}
