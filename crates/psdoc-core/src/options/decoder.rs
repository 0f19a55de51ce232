/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

/// Largest width or height a large document (PSB) may declare
const MAX_DOCUMENT_DIMENSION: usize = 300_000;

/// Decoder options
///
/// The defaults accept every well formed document, the limits exist
/// so embedders can cap the work done on hostile input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode documents larger than
    /// the specified width.
    ///
    /// - Default value: 300000
    max_width:     usize,
    /// Maximum height for which decoders will not
    /// try to decode documents larger than the
    /// specified height
    ///
    /// - Default value: 300000
    max_height:    usize,
    /// Maximum number of layer records read from the
    /// layer and mask section
    ///
    /// - Default value: 32767, the largest count the format can express
    max_layers:    usize,
    /// Maximum number of resource blocks read from the image
    /// resources section
    ///
    /// - Default value: 65536
    max_resources: usize,
    /// Whether advisory problems, e.g. a resource block without
    /// the `8BIM` signature, abort decoding
    ///
    /// - Default value: false
    strict_mode:   bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:     MAX_DOCUMENT_DIMENSION,
            max_height:    MAX_DOCUMENT_DIMENSION,
            max_layers:    i16::MAX as usize,
            max_resources: 1 << 16,
            strict_mode:   false
        }
    }
}

/// Initializers
impl DecoderOptions {
    /// Create options that tolerate advisory problems
    ///
    /// This is the same as `default`
    pub fn new_lenient() -> DecoderOptions {
        DecoderOptions::default()
    }

    /// Create options that reject every advisory problem
    pub fn new_strict() -> DecoderOptions {
        DecoderOptions::default().set_strict_mode(true)
    }
}

impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode documents greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode documents greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Get the maximum number of layer records the decoder will read
    pub const fn get_max_layers(&self) -> usize {
        self.max_layers
    }

    /// Get the maximum number of resource blocks the decoder will read
    pub const fn get_max_resources(&self) -> usize {
        self.max_resources
    }

    /// Return true whether the decoder should be in strict mode
    /// and reject advisory problems
    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set maximum width for which the decoder should not try
    /// decoding documents greater than that width
    #[must_use]
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding documents greater than that height
    #[must_use]
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set the maximum number of layer records to read
    ///
    /// Documents declaring more layers are rejected before any
    /// layer record is read.
    #[must_use]
    pub fn set_max_layers(mut self, layers: usize) -> Self {
        self.max_layers = layers;
        self
    }

    /// Set the maximum number of resource blocks to read
    ///
    /// This caps the iterations of the image resources loop.
    #[must_use]
    pub fn set_max_resources(mut self, resources: usize) -> Self {
        self.max_resources = resources;
        self
    }

    /// Set whether the decoder should be in standards conforming/
    /// strict mode
    ///
    /// In strict mode every problem that would otherwise be recorded
    /// as a warning aborts decoding.
    #[must_use]
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}
