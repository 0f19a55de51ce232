/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use psdoc_tests::{LayerSpec, PsdBuilder};

/// A document with `layers` named layers and a handful of resources,
/// the shape of a typical design file
pub fn layered_document(layers: usize) -> Vec<u8> {
    let mut builder = PsdBuilder::new(1920, 1080)
        .resource(1005, "", &[0; 16])
        .resource(1039, "", &[0; 3144])
        .resource(1060, "", &[0; 4096]);

    for index in 0..layers {
        let offset = (index % 500) as i32;
        let layer = LayerSpec::new(&format!("Layer {index}"))
            .bounds(offset, offset, offset + 100, offset + 200)
            .opacity((index % 256) as u8);

        builder = builder.layer(layer);
    }
    builder.image_data(1, &[0; 1024]).build()
}
