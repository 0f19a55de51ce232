/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A positional reader over an in-memory byte buffer
//!
//! Every read is bounds checked, a read that would run past the end
//! of the buffer returns an error and leaves the position untouched.
pub use reader::{ByteCursor, ByteIoError, SeekFrom};

mod reader;
