/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The layer and mask information section
//!
//! Layer records are decoded in full. The channel image data that follows
//! them, the global layer mask and any additional layer information are
//! located and skipped.

use alloc::vec::Vec;

use psdoc_core::bytestream::ByteCursor;
use psdoc_core::log::{debug, trace};

pub use crate::layers::record::{
    ChannelInfo, ChannelKind, LayerBlendingRanges, LayerFlags, LayerMaskAdjustment, LayerRecord
};
use crate::errors::{PSDDecodeErrors, Section};
use crate::utils::{pad_to_even, seek_to_declared_end, DecodeContext};

mod record;

/// Location of the per channel image data following the layer records
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChannelImageData {
    pub offset: usize,
    /// Sum of the channel lengths declared by the layer records
    pub length: u64
}

/// The layer info block, holding the layer records
#[derive(Debug, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayerMaskInfo {
    /// Offset of the first byte after the length field
    pub offset:             usize,
    /// Length as stored, the block is padded to an even length
    pub length:             u32,
    /// Layer count as stored
    pub layer_count:        i16,
    pub records:            Vec<LayerRecord>,
    pub channel_image_data: ChannelImageData
}

impl LayerMaskInfo {
    fn decode<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>, ctx: &mut DecodeContext
    ) -> Result<LayerMaskInfo, PSDDecodeErrors> {
        let length = stream.get_u32_be_err()?;
        let offset = stream.position();

        if length == 0 {
            return Ok(LayerMaskInfo {
                offset,
                channel_image_data: ChannelImageData {
                    offset,
                    length: 0
                },
                ..LayerMaskInfo::default()
            });
        }
        let declared_end = offset as u64 + pad_to_even(u64::from(length));

        let layer_count = stream.get_i16_be_err()?;

        if layer_count < 0 {
            // The absolute value is the count, the first alpha channel
            // then holds the merged transparency.
            return Err(PSDDecodeErrors::UnsupportedFeature {
                section: Section::LayerAndMask,
                offset,
                feature: "negative layer count (merged alpha channel)"
            });
        }
        let count = layer_count as usize;

        if count > ctx.options.get_max_layers() {
            return Err(PSDDecodeErrors::LimitExceeded {
                section: Section::LayerAndMask,
                offset,
                limit: ctx.options.get_max_layers(),
                found: count
            });
        }
        trace!("Layer count: {}", count);

        let mut records = Vec::with_capacity(count);

        for index in 0..count {
            records.push(LayerRecord::decode(stream, ctx, index)?);
        }

        let channel_image_data = ChannelImageData {
            offset: stream.position(),
            length: records.iter().map(LayerRecord::channel_data_length).sum()
        };
        debug!(
            "Channel image data: {} bytes at {}",
            channel_image_data.length, channel_image_data.offset
        );

        seek_to_declared_end(stream, Section::LayerAndMask, declared_end)?;

        Ok(LayerMaskInfo {
            offset,
            length,
            layer_count,
            records,
            channel_image_data
        })
    }
}

/// The layer and mask information section
#[derive(Debug, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayerMaskSection {
    /// Offset of the first byte after the length field
    pub offset: usize,
    pub length: u32,
    pub info:   LayerMaskInfo
}

impl LayerMaskSection {
    pub(crate) fn decode<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>, ctx: &mut DecodeContext
    ) -> Result<LayerMaskSection, PSDDecodeErrors> {
        Self::decode_fields(stream, ctx).map_err(|e| e.within(Section::LayerAndMask))
    }

    fn decode_fields<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>, ctx: &mut DecodeContext
    ) -> Result<LayerMaskSection, PSDDecodeErrors> {
        let length = stream.get_u32_be_err()?;
        let offset = stream.position();

        if length == 0 {
            return Ok(LayerMaskSection {
                offset,
                length,
                info: LayerMaskInfo {
                    offset,
                    channel_image_data: ChannelImageData {
                        offset,
                        length: 0
                    },
                    ..LayerMaskInfo::default()
                }
            });
        }
        let info = LayerMaskInfo::decode(stream, ctx)?;

        // global layer mask info and additional layer information
        seek_to_declared_end(
            stream,
            Section::LayerAndMask,
            offset as u64 + u64::from(length)
        )?;

        Ok(LayerMaskSection {
            offset,
            length,
            info
        })
    }

    pub fn is_empty(&self) -> bool {
        self.info.records.is_empty()
    }

    /// Layer records in file order, bottom-most layer first
    pub fn layers(&self) -> &[LayerRecord] {
        &self.info.records
    }
}
