/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Synthetic documents for the workspace tests and benchmarks
//!
//! [`PsdBuilder`] writes documents the way Photoshop lays them out:
//! layer names padded to four bytes, a global layer mask block and
//! tagged additional layer information the decoder has to skip.

use std::path::{Path, PathBuf};

#[cfg(test)]
mod documents;
#[cfg(test)]
mod json;

/// A layer to write, defaults to a visible 1x1 RGBA layer
#[derive(Clone, Debug)]
pub struct LayerSpec {
    pub name:      String,
    /// top, left, right, bottom
    pub bounds:    [i32; 4],
    pub blend_key: [u8; 4],
    pub opacity:   u8,
    pub flags:     u8,
    /// channel id and channel data length
    pub channels:  Vec<(i16, u32)>,
    /// Mask data, empty for no mask
    pub mask:      Vec<u8>
}

impl LayerSpec {
    pub fn new(name: &str) -> LayerSpec {
        LayerSpec {
            name:      name.to_string(),
            bounds:    [0, 0, 1, 1],
            blend_key: *b"norm",
            opacity:   255,
            flags:     0,
            channels:  vec![(-1, 2), (0, 2), (1, 2), (2, 2)],
            mask:      Vec::new()
        }
    }

    #[must_use]
    pub fn bounds(mut self, top: i32, left: i32, right: i32, bottom: i32) -> LayerSpec {
        self.bounds = [top, left, right, bottom];
        self
    }

    #[must_use]
    pub fn blend(mut self, key: &[u8; 4]) -> LayerSpec {
        self.blend_key = *key;
        self
    }

    #[must_use]
    pub fn opacity(mut self, opacity: u8) -> LayerSpec {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> LayerSpec {
        self.flags |= 0b10;
        self
    }

    #[must_use]
    pub fn mask(mut self, mask: &[u8]) -> LayerSpec {
        self.mask = mask.to_vec();
        self
    }

    fn write_record(&self, out: &mut Vec<u8>) {
        for edge in self.bounds {
            out.extend_from_slice(&edge.to_be_bytes());
        }
        out.extend_from_slice(&(self.channels.len() as u16).to_be_bytes());
        for (id, length) in &self.channels {
            out.extend_from_slice(&id.to_be_bytes());
            out.extend_from_slice(&length.to_be_bytes());
        }
        out.extend_from_slice(b"8BIM");
        out.extend_from_slice(&self.blend_key);
        out.extend_from_slice(&[self.opacity, 0, self.flags, 0]);

        let mut extra = Vec::new();
        extra.extend_from_slice(&(self.mask.len() as u32).to_be_bytes());
        extra.extend_from_slice(&self.mask);
        // composite gray and one channel of blending ranges
        extra.extend_from_slice(&16_u32.to_be_bytes());
        extra.extend_from_slice(&[0, 0, 255, 255, 0, 0, 255, 255]);
        extra.extend_from_slice(&[0, 0, 255, 255, 0, 0, 255, 255]);
        // name padded to a multiple of four bytes, length byte included
        extra.push(self.name.len() as u8);
        extra.extend_from_slice(self.name.as_bytes());
        while extra.len() % 4 != 0 {
            extra.push(0);
        }
        // unicode name as additional layer information
        let unicode: Vec<u8> = self
            .name
            .encode_utf16()
            .flat_map(|unit| unit.to_be_bytes())
            .collect();
        extra.extend_from_slice(b"8BIMluni");
        extra.extend_from_slice(&(4 + unicode.len() as u32).to_be_bytes());
        extra.extend_from_slice(&(unicode.len() as u32 / 2).to_be_bytes());
        extra.extend_from_slice(&unicode);

        out.extend_from_slice(&(extra.len() as u32).to_be_bytes());
        out.extend_from_slice(&extra);
    }
}

/// Writes synthetic PSD documents
#[derive(Clone, Debug)]
pub struct PsdBuilder {
    version:    u16,
    channels:   u16,
    width:      u32,
    height:     u32,
    depth:      u16,
    color_mode: u16,
    color_data: Vec<u8>,
    resources:  Vec<(u16, String, Vec<u8>)>,
    layers:     Vec<LayerSpec>,
    image_data: Option<(u16, Vec<u8>)>
}

impl PsdBuilder {
    /// An 8 bit RGB document
    pub fn new(width: u32, height: u32) -> PsdBuilder {
        PsdBuilder {
            version: 1,
            channels: 3,
            width,
            height,
            depth: 8,
            color_mode: 3,
            color_data: Vec::new(),
            resources: Vec::new(),
            layers: Vec::new(),
            image_data: None
        }
    }

    #[must_use]
    pub fn color_mode(mut self, code: u16, channels: u16) -> PsdBuilder {
        self.color_mode = code;
        self.channels = channels;
        self
    }

    #[must_use]
    pub fn depth(mut self, depth: u16) -> PsdBuilder {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn color_data(mut self, data: &[u8]) -> PsdBuilder {
        self.color_data = data.to_vec();
        self
    }

    #[must_use]
    pub fn resource(mut self, id: u16, name: &str, data: &[u8]) -> PsdBuilder {
        self.resources.push((id, name.to_string(), data.to_vec()));
        self
    }

    #[must_use]
    pub fn layer(mut self, layer: LayerSpec) -> PsdBuilder {
        self.layers.push(layer);
        self
    }

    #[must_use]
    pub fn image_data(mut self, compression: u16, data: &[u8]) -> PsdBuilder {
        self.image_data = Some((compression, data.to_vec()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();

        out.extend_from_slice(b"8BPS");
        out.extend_from_slice(&self.version.to_be_bytes());
        out.extend_from_slice(&[0; 6]);
        out.extend_from_slice(&self.channels.to_be_bytes());
        out.extend_from_slice(&self.height.to_be_bytes());
        out.extend_from_slice(&self.width.to_be_bytes());
        out.extend_from_slice(&self.depth.to_be_bytes());
        out.extend_from_slice(&self.color_mode.to_be_bytes());

        out.extend_from_slice(&(self.color_data.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.color_data);

        let resources = self.resource_section();
        out.extend_from_slice(&(resources.len() as u32).to_be_bytes());
        out.extend_from_slice(&resources);

        let layers = self.layer_section();
        out.extend_from_slice(&(layers.len() as u32).to_be_bytes());
        out.extend_from_slice(&layers);

        if let Some((compression, data)) = &self.image_data {
            out.extend_from_slice(&compression.to_be_bytes());
            out.extend_from_slice(data);
        }
        out
    }

    fn resource_section(&self) -> Vec<u8> {
        let mut out = Vec::new();

        for (id, name, data) in &self.resources {
            out.extend_from_slice(b"8BIM");
            out.extend_from_slice(&id.to_be_bytes());
            out.push(name.len() as u8);
            out.extend_from_slice(name.as_bytes());
            if name.len() % 2 == 0 {
                out.push(0);
            }
            out.extend_from_slice(&(data.len() as u32).to_be_bytes());
            out.extend_from_slice(data);
            if data.len() % 2 == 1 {
                out.push(0);
            }
        }
        out
    }

    fn layer_section(&self) -> Vec<u8> {
        if self.layers.is_empty() {
            return Vec::new();
        }
        let mut info = Vec::new();

        info.extend_from_slice(&(self.layers.len() as i16).to_be_bytes());
        for layer in &self.layers {
            layer.write_record(&mut info);
        }
        // raw channel data, a compression field and its pixels
        for layer in &self.layers {
            for (_, length) in &layer.channels {
                info.resize(info.len() + *length as usize, 0);
            }
        }

        let mut out = Vec::new();
        out.extend_from_slice(&(info.len() as u32).to_be_bytes());
        out.extend_from_slice(&info);
        if info.len() % 2 == 1 {
            out.push(0);
        }
        // empty global layer mask info
        out.extend_from_slice(&0_u32.to_be_bytes());
        // additional layer information
        out.extend_from_slice(b"8BIMPatt");
        out.extend_from_slice(&0_u32.to_be_bytes());
        out
    }
}

pub fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).to_owned()
}
