/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use psdoc::PSDDecoder;
use serde_json::{json, Value};

use crate::{LayerSpec, PsdBuilder};

fn document_json(data: &[u8]) -> Value {
    let document = PSDDecoder::new(data).decode().unwrap();

    serde_json::to_value(&document).unwrap()
}

#[test]
fn header_serializes_with_names() {
    let data = PsdBuilder::new(12, 7).build();

    let value = document_json(&data);
    let header = &value["header"];

    assert_eq!(header["signature"], json!("8BPS"));
    assert_eq!(header["width"], json!(12));
    assert_eq!(header["height"], json!(7));
    assert_eq!(header["color_mode"], json!("RGB"));
    assert_eq!(value["image_data"], Value::Null);
    assert_eq!(value["warnings"], json!([]));
}

#[test]
fn layers_serialize_blend_modes_as_strings() {
    let data = PsdBuilder::new(4, 4)
        .layer(LayerSpec::new("Ink").blend(b"over").hidden())
        .layer(LayerSpec::new("Odd").blend(b"XXXX"))
        .build();

    let value = document_json(&data);
    let layers = &value["layer_mask"]["info"]["records"];

    assert_eq!(layers[0]["name"], json!("Ink"));
    assert_eq!(layers[0]["blend_key"], json!("over"));
    assert_eq!(layers[0]["blend_mode"], json!("overlay"));
    assert_eq!(layers[0]["channels"][0], json!({ "id": -1, "length": 2 }));
    assert!(layers[0]["flags"].is_string());
    assert_eq!(layers[1]["blend_mode"], Value::Null);
}

#[test]
fn resource_data_is_not_serialized() {
    let data = PsdBuilder::new(1, 1)
        .resource(1028, "", &[1, 2, 3, 4])
        .image_data(1, &[0; 4])
        .build();

    let value = document_json(&data);
    let block = &value["image_resources"]["blocks"][0];

    assert_eq!(block["id"], json!(1028));
    assert_eq!(block["data_length"], json!(4));
    assert!(block.get("data").is_none());
    assert_eq!(value["image_data"]["compression"], json!("rle"));
}
