//! A PSD document structure decoder
//!
//! This crate reads the structure of a Photoshop document: the file header,
//! the color mode data, the image resources and the layer directory with
//! each layer's bounds, channels, blend mode, opacity, flags and name.
//!
//! ## What it does not do
//! Pixels are never decompressed. The decoder reports where the channel
//! image data and the merged image data live in the buffer, together with
//! their declared lengths and compression, and leaves the rest to the caller.
//!
//! Per layer "additional information" blocks (effects, unicode names, ...)
//! are skipped using the declared record length, never parsed.
//!
//! # Example
//! - Listing the layers of a document
//! ```no_run
//! use psdoc::errors::PSDDecodeErrors;
//! use psdoc::PSDDecoder;
//!
//! fn main() -> Result<(), PSDDecodeErrors> {
//!     let data = std::fs::read("file.psd").unwrap();
//!     let document = PSDDecoder::new(&data).decode()?;
//!
//!     for layer in document.layers() {
//!         println!("{:?} {:?}", layer.name, layer.blend_mode);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![no_std]
extern crate alloc;
pub extern crate psdoc_core;

pub use decoder::PSDDecoder;
pub use document::Document;

pub mod color_mode;
pub mod constants;
pub mod decoder;
pub mod document;
pub mod errors;
pub mod header;
pub mod image_data;
pub mod layers;
pub mod resources;
mod serde;
mod utils;
pub mod warnings;
