/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

/// Enumeration of possible methods to seek within the buffer.
///
/// It is analogous to the [SeekFrom](std::io::SeekFrom) in the std library,
/// but seeking past either end of the buffer is an error.
#[derive(Copy, PartialEq, Eq, Clone, Debug)]
pub enum SeekFrom {
    /// Sets the offset to the provided number of bytes.
    Start(u64),
    /// Sets the offset to the size of the buffer plus the specified number of
    /// bytes.
    End(i64),
    /// Sets the offset to the current position plus the specified number of
    /// bytes.
    Current(i64)
}

/// Errors raised by [`ByteCursor`]
///
/// Every variant records the cursor position at the time of the failure.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum ByteIoError {
    // position, requested, available
    NotEnoughBytes(usize, usize, usize),
    // position, buffer length
    SeekOutOfBounds(usize, usize),
    // position, target
    SeekBackwards(usize, usize)
}

impl ByteIoError {
    /// The cursor position at which the error was raised
    pub const fn position(&self) -> usize {
        match self {
            ByteIoError::NotEnoughBytes(position, ..)
            | ByteIoError::SeekOutOfBounds(position, _)
            | ByteIoError::SeekBackwards(position, _) => *position
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::NotEnoughBytes(position, requested, available) => {
                write!(
                    f,
                    "Not enough bytes at offset {position}, requested {requested} but only {available} remain"
                )
            }
            ByteIoError::SeekOutOfBounds(position, length) => {
                write!(
                    f,
                    "Seek from offset {position} lands outside the buffer of {length} bytes"
                )
            }
            ByteIoError::SeekBackwards(position, target) => {
                write!(
                    f,
                    "Cannot skip backwards from offset {position} to offset {target}"
                )
            }
        }
    }
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(self, f)
    }
}

impl core::error::Error for ByteIoError {}

/// A cursor over a fully materialized byte buffer
///
/// The position starts at zero and only moves through successful reads,
/// skips and seeks.
pub struct ByteCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    pub fn new(stream: T) -> ByteCursor<T> {
        ByteCursor {
            stream,
            position: 0
        }
    }
    /// Total length of the underlying buffer
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.stream.as_ref().len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    #[inline(always)]
    pub const fn position(&self) -> usize {
        self.position
    }
    /// Bytes left between the current position and the end of the buffer
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position)
    }
    #[inline(always)]
    pub fn eof(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, num: usize) -> Result<&[u8], ByteIoError> {
        let buf = self.stream.as_ref();
        let start = self.position;

        match start.checked_add(num) {
            Some(end) if end <= buf.len() => {
                self.position = end;
                Ok(&buf[start..end])
            }
            _ => Err(ByteIoError::NotEnoughBytes(
                start,
                num,
                buf.len().saturating_sub(start)
            ))
        }
    }

    /// Return a view of the next `num` bytes and advance past them
    #[inline]
    pub fn read_bytes(&mut self, num: usize) -> Result<&[u8], ByteIoError> {
        self.take(num)
    }

    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        byte_store.copy_from_slice(self.take(N)?);
        Ok(byte_store)
    }

    /// Read `num` bytes as a Latin-1 string
    ///
    /// Every byte maps to the char with the same code point, so this
    /// never fails on content, only on length.
    pub fn read_fixed_string(&mut self, num: usize) -> Result<String, ByteIoError> {
        Ok(self.take(num)?.iter().map(|&byte| char::from(byte)).collect())
    }

    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        Ok(self.take(1)?[0])
    }

    /// Advance the position by `num` bytes, returning the new position
    pub fn skip(&mut self, num: usize) -> Result<usize, ByteIoError> {
        match self.position.checked_add(num) {
            Some(end) if end <= self.len() => {
                self.position = end;
                Ok(end)
            }
            _ => Err(ByteIoError::NotEnoughBytes(
                self.position,
                num,
                self.remaining()
            ))
        }
    }

    /// Move forward to the absolute offset `target`
    ///
    /// Fails if `target` is behind the current position or past the end
    /// of the buffer.
    pub fn skip_to(&mut self, target: usize) -> Result<(), ByteIoError> {
        if target < self.position {
            return Err(ByteIoError::SeekBackwards(self.position, target));
        }
        if target > self.len() {
            return Err(ByteIoError::NotEnoughBytes(
                self.position,
                target - self.position,
                self.remaining()
            ));
        }
        self.position = target;
        Ok(())
    }

    /// Seek to a new position, returning it
    ///
    /// The end of the buffer itself is a valid position.
    pub fn seek(&mut self, from: SeekFrom) -> Result<usize, ByteIoError> {
        let length = self.len();

        let target = match from {
            SeekFrom::Start(offset) => usize::try_from(offset).ok(),
            SeekFrom::End(offset) => offset_by(length, offset),
            SeekFrom::Current(offset) => offset_by(self.position, offset)
        };
        match target {
            Some(target) if target <= length => {
                self.position = target;
                Ok(target)
            }
            _ => Err(ByteIoError::SeekOutOfBounds(self.position, length))
        }
    }
}

fn offset_by(base: usize, offset: i64) -> Option<usize> {
    if offset >= 0 {
        base.checked_add(usize::try_from(offset).ok()?)
    } else {
        base.checked_sub(usize::try_from(offset.unsigned_abs()).ok()?)
    }
}

macro_rules! get_single_type {
    ($name:tt,$int_type:tt) => {
        impl<T: AsRef<[u8]>> ByteCursor<T> {
            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name(&mut self) -> Result<$int_type, ByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let space = self.read_fixed_bytes_or_error::<SIZE_OF_VAL>()?;

                Ok($int_type::from_be_bytes(space))
            }
        }
    };
}

get_single_type!(get_u16_be_err, u16);
get_single_type!(get_i16_be_err, i16);
get_single_type!(get_u32_be_err, u32);
get_single_type!(get_i32_be_err, i32);
