/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the psdoc crates
//!
//! It currently contains
//!
//! - A bounds checked byte cursor with big endian reads and absolute seeks
//! - Decoder options that bound the work done on untrusted input
//! - Logging macros that compile away unless the `log` feature is enabled
//!
//! This library is `#[no_std]` with `alloc` needed for the owned strings
//! the cursor returns.
//!
//! # Features
//!  - `log`: Forward the logging macros in [`log`] to the `log` crate.
#![no_std]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod log;
pub mod options;
