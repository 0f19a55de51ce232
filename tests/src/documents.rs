/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::read;

use psdoc::constants::{BlendMode, ColorModes};
use psdoc::errors::{PSDDecodeErrors, Section};
use psdoc::layers::ChannelKind;
use psdoc::warnings::WarningKind;
use psdoc::PSDDecoder;
use psdoc_core::options::DecoderOptions;
use serde::Deserialize;

use crate::{sample_path, LayerSpec, PsdBuilder};

#[derive(Clone, Deserialize, Debug)]
struct ResourceEntry {
    id:          u16,
    name:        String,
    length:      usize,
    description: Option<String>
}

#[derive(Clone, Deserialize, Debug)]
struct LayerEntry {
    name:    String,
    bounds:  [i32; 4],
    key:     String,
    blend:   Option<String>,
    opacity: u8,
    hidden:  bool
}

#[derive(Clone, Deserialize, Debug)]
struct TestEntry {
    name:              String,
    width:             u32,
    height:            u32,
    color_mode:        u16,
    channels:          u16,
    color_data_length: u32,
    resources:         Vec<ResourceEntry>,
    layers:            Vec<LayerEntry>,
    image_compression: Option<u16>,
    comment:           Option<String>
}

impl TestEntry {
    fn build(&self) -> Vec<u8> {
        let mut builder = PsdBuilder::new(self.width, self.height)
            .color_mode(self.color_mode, self.channels)
            .color_data(&vec![0; self.color_data_length as usize]);

        for resource in &self.resources {
            builder = builder.resource(resource.id, &resource.name, &vec![7; resource.length]);
        }
        for layer in &self.layers {
            let [top, left, right, bottom] = layer.bounds;
            let key: [u8; 4] = layer.key.as_bytes().try_into().unwrap();

            let mut spec = LayerSpec::new(&layer.name)
                .bounds(top, left, right, bottom)
                .blend(&key)
                .opacity(layer.opacity);
            if layer.hidden {
                spec = spec.hidden();
            }
            builder = builder.layer(spec);
        }
        if let Some(compression) = self.image_compression {
            builder = builder.image_data(compression, &[0; 10]);
        }
        builder.build()
    }
}

fn check_entry(entry: &TestEntry) -> Result<(), String> {
    let data = entry.build();
    let document = PSDDecoder::new(&data)
        .decode()
        .map_err(|e| format!("decode failed: {e}"))?;

    let header = &document.header;
    if header.dimensions() != (entry.width, entry.height) {
        return Err(format!("dimensions {:?}", header.dimensions()));
    }
    if header.color_mode_code != entry.color_mode || header.channel_count != entry.channels {
        return Err(format!(
            "color mode {} with {} channels",
            header.color_mode_code, header.channel_count
        ));
    }
    if document.color_mode_data.length != entry.color_data_length {
        return Err(format!("color data {}", document.color_mode_data.length));
    }

    if document.resources().len() != entry.resources.len() {
        return Err(format!("{} resources", document.resources().len()));
    }
    for (block, expected) in document.resources().iter().zip(&entry.resources) {
        if block.id != expected.id
            || block.name != expected.name
            || block.data_length as usize != expected.length
            || block.description() != expected.description.as_deref()
        {
            return Err(format!("resource {:?} expected {:?}", block, expected));
        }
    }

    if document.layers().len() != entry.layers.len() {
        return Err(format!("{} layers", document.layers().len()));
    }
    for (layer, expected) in document.layers().iter().zip(&entry.layers) {
        let bounds = [layer.top, layer.left, layer.right, layer.bottom];

        if layer.name.as_deref() != Some(expected.name.as_str())
            || bounds != expected.bounds
            || layer.blend_key.as_bytes() != expected.key.as_bytes()
            || layer.blend_mode_name() != expected.blend.as_deref()
            || layer.opacity != expected.opacity
            || layer.is_visible() == expected.hidden
        {
            return Err(format!("layer {:?} expected {:?}", layer, expected));
        }
    }

    let compression = document.image_data.map(|section| section.compression_code);
    if compression != entry.image_compression {
        return Err(format!("image data compression {:?}", compression));
    }
    if !document.warnings.is_empty() {
        return Err(format!("warnings {:?}", document.warnings));
    }
    Ok(())
}

#[test]
fn test_documents() {
    let file = sample_path().join("documents.json");

    let json_file = read(file).unwrap();

    let entries: Vec<TestEntry> = serde_json::from_slice(&json_file).unwrap();

    let mut failures = Vec::new();

    for entry in &entries {
        if let Err(reason) = check_entry(entry) {
            eprintln!(
                "Mismatch for document {:?}: {}\nConfig:{:#?}\n",
                entry.name, reason, entry.comment
            );
            failures.push(entry.name.clone());
        }
    }
    if !failures.is_empty() {
        panic!("Errors found during test decoding\n {:#?}", failures);
    }
}

#[test]
fn layer_fields() {
    let data = PsdBuilder::new(100, 50)
        .layer(LayerSpec::new("Base"))
        .layer(
            LayerSpec::new("Masked")
                .bounds(10, 20, 60, 30)
                .blend(b"diff")
                .mask(&[0; 20])
        )
        .build();

    let document = PSDDecoder::new(&data).decode().unwrap();
    let layers = document.layers();

    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].name.as_deref(), Some("Base"));

    let masked = &layers[1];
    assert_eq!(masked.width(), 40);
    assert_eq!(masked.height(), 20);
    assert_eq!(masked.blend_mode, Some(BlendMode::Difference));
    assert_eq!(masked.mask.size, 20);
    assert_eq!(masked.blending_ranges.size, 16);
    assert_eq!(masked.channels[0].kind(), ChannelKind::TransparencyMask);
    assert_eq!(masked.channels[1].name(document.header.color_mode), "R");

    // record ends exactly where the next one starts
    assert_eq!(layers[0].end(), masked.offset);
    assert_eq!(document.layer_mask.info.channel_image_data.offset, masked.end());
    assert_eq!(document.layer_mask.info.channel_image_data.length, 16);
}

#[test]
fn empty_layer_name() {
    let data = PsdBuilder::new(1, 1).layer(LayerSpec::new("")).build();

    let document = PSDDecoder::new(&data).decode().unwrap();

    assert_eq!(document.layers()[0].name, None);
}

#[test]
fn resource_names_of_both_parities() {
    let data = PsdBuilder::new(1, 1)
        .resource(1000, "", &[1])
        .resource(1001, "a", &[1, 2])
        .resource(1002, "ab", &[1, 2, 3])
        .build();

    let document = PSDDecoder::new(&data).decode().unwrap();
    let sizes: Vec<(usize, usize)> = document
        .resources()
        .iter()
        .map(|block| (block.name_field_size, block.total_size))
        .collect();

    assert_eq!(sizes, [(2, 14), (2, 14), (4, 18)]);
    assert_eq!(document.resource(1002).map(|block| block.name.as_str()), Some("ab"));
    assert_eq!(
        document.resource(1000).map(|block| block.data.as_slice()),
        Some(&[1, 0][..])
    );
}

#[test]
fn palette_length_warning() {
    let data = PsdBuilder::new(4, 4)
        .color_mode(2, 1)
        .color_data(&[0; 300])
        .build();

    let document = PSDDecoder::new(&data).decode().unwrap();

    assert_eq!(document.header.color_mode, Some(ColorModes::IndexedColor));
    assert_eq!(document.warnings.len(), 1);
    assert_eq!(
        document.warnings[0].kind,
        WarningKind::UnusualPaletteLength { length: 300 }
    );
}

#[test]
fn strict_mode_rejects_foreign_signatures() {
    let mut data = PsdBuilder::new(1, 1).resource(1005, "", &[0; 4]).build();
    // resource block signature right after the header and both lengths
    data[34..38].copy_from_slice(b"MeSa");

    let lenient = PSDDecoder::new(&data).decode().unwrap();
    assert_eq!(lenient.warnings.len(), 1);
    assert_eq!(lenient.resources()[0].signature.as_bytes(), b"MeSa");

    let err = PSDDecoder::new_with_options(&data, DecoderOptions::new_strict())
        .decode()
        .unwrap_err();

    assert!(matches!(
        err,
        PSDDecodeErrors::InvalidSignature {
            section: Section::ResourceBlock(0),
            offset: 34,
            ..
        }
    ));
}

#[test]
fn many_layers_respect_limit() {
    let mut builder = PsdBuilder::new(1, 1);
    for index in 0..20 {
        builder = builder.layer(LayerSpec::new(&format!("Layer {index}")));
    }
    let data = builder.build();

    let document = PSDDecoder::new(&data).decode().unwrap();
    assert_eq!(document.layers().len(), 20);
    assert_eq!(document.layers()[19].name.as_deref(), Some("Layer 19"));

    let options = DecoderOptions::default().set_max_layers(10);
    let err = PSDDecoder::new_with_options(&data, options)
        .decode()
        .unwrap_err();
    assert!(matches!(err, PSDDecodeErrors::LimitExceeded { found: 20, .. }));
}
