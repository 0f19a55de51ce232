/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder options
//!
//! These bound the work a decoder does on untrusted input and decide
//! whether advisory problems are tolerated or rejected.
pub use decoder::DecoderOptions;

mod decoder;
