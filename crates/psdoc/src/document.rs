/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use crate::color_mode::ColorModeData;
use crate::header::PSDHeader;
use crate::image_data::ImageDataSection;
use crate::layers::{LayerMaskSection, LayerRecord};
use crate::resources::{ImageResources, ResourceBlock};
use crate::warnings::DecodeWarning;

/// A decoded document
///
/// Sections appear in file order. Offsets stored anywhere in the tree
/// are absolute offsets into the buffer the document was decoded from.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    pub header:          PSDHeader,
    pub color_mode_data: ColorModeData,
    pub image_resources: ImageResources,
    pub layer_mask:      LayerMaskSection,
    /// `None` when the buffer ends with the layer and mask section
    pub image_data:      Option<ImageDataSection>,
    /// Advisory problems found while decoding, in file order
    pub warnings:        Vec<DecodeWarning>
}

impl Document {
    /// Layer records in file order, bottom-most layer first
    pub fn layers(&self) -> &[LayerRecord] {
        self.layer_mask.layers()
    }

    /// Resource blocks in file order
    pub fn resources(&self) -> &[ResourceBlock] {
        &self.image_resources.blocks
    }

    /// The first resource block with the given ID
    pub fn resource(&self, id: u16) -> Option<&ResourceBlock> {
        self.image_resources.get(id)
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }
}
