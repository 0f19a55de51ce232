/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use alloc::vec::Vec;

use bitflags::bitflags;
use psdoc_core::bytestream::ByteCursor;
use psdoc_core::log::{debug, trace};

use crate::constants::{BlendMode, ColorModes, FourCC, BLEND_SIGNATURE};
use crate::errors::{PSDDecodeErrors, Section};
use crate::utils::{seek_to_declared_end, DecodeContext};
use crate::warnings::{DecodeWarning, WarningKind};

bitflags! {
    /// Layer record flag bits
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
    pub struct LayerFlags: u8 {
        const TRANSPARENCY_PROTECTED = 0b0000_0001;
        const HIDDEN = 0b0000_0010;
        const OBSOLETE = 0b0000_0100;
        /// Set when `PIXEL_DATA_IRRELEVANT` carries information
        const HAS_PIXEL_RELEVANCE = 0b0000_1000;
        const PIXEL_DATA_IRRELEVANT = 0b0001_0000;
    }
}

impl LayerFlags {
    pub const fn is_visible(self) -> bool {
        !self.contains(LayerFlags::HIDDEN)
    }

    /// Whether the layer's pixels do not contribute to the document's
    /// appearance, e.g. an adjustment layer
    pub const fn pixel_data_irrelevant(self) -> bool {
        self.contains(LayerFlags::HAS_PIXEL_RELEVANCE)
            && self.contains(LayerFlags::PIXEL_DATA_IRRELEVANT)
    }
}

/// What a channel of a layer holds
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ChannelKind {
    /// Color channel by its index in the document's color mode
    Color(u16),
    /// Transparency mask, id -1
    TransparencyMask,
    /// User supplied layer mask, id -2
    UserMask,
    /// Real user supplied layer mask, id -3, present when both a user
    /// mask and a vector mask exist
    RealUserMask,
    Unknown(i16)
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChannelInfo {
    pub id:     i16,
    /// Declared length of the channel's image data
    pub length: u32
}

impl ChannelInfo {
    pub fn kind(&self) -> ChannelKind {
        match self.id {
            -1 => ChannelKind::TransparencyMask,
            -2 => ChannelKind::UserMask,
            -3 => ChannelKind::RealUserMask,
            id if id >= 0 => ChannelKind::Color(id as u16),
            id => ChannelKind::Unknown(id)
        }
    }

    /// Short channel name for a document in `color_mode`, e.g. `"R"` or `"A"`
    pub fn name(&self, color_mode: Option<ColorModes>) -> &'static str {
        match self.kind() {
            ChannelKind::TransparencyMask => "A",
            ChannelKind::UserMask => "mask",
            ChannelKind::RealUserMask => "real mask",
            ChannelKind::Unknown(_) => "unknown",
            ChannelKind::Color(index) => {
                let names: &[&'static str] = match color_mode {
                    Some(ColorModes::RGB) => &["R", "G", "B"],
                    Some(ColorModes::CMYK) => &["C", "M", "Y", "K"],
                    Some(ColorModes::LabColor) => &["L", "a", "b"],
                    Some(
                        ColorModes::Grayscale
                        | ColorModes::Bitmap
                        | ColorModes::DuoTone
                        | ColorModes::IndexedColor
                    ) => &["Gray"],
                    _ => &[]
                };
                names.get(usize::from(index)).copied().unwrap_or("color")
            }
        }
    }
}

/// Layer mask / adjustment layer data, located but not decoded
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayerMaskAdjustment {
    /// Offset of the first byte after the size field
    pub offset: usize,
    pub size:   u32
}

impl LayerMaskAdjustment {
    fn decode<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>
    ) -> Result<LayerMaskAdjustment, PSDDecodeErrors> {
        let size = stream.get_u32_be_err()?;
        let offset = stream.position();

        // mask rectangle, default color and mask flags are not decoded
        if size != 0 {
            stream.skip(size as usize)?;
        }
        Ok(LayerMaskAdjustment { offset, size })
    }

    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Layer blending ranges, located but not decoded
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayerBlendingRanges {
    /// Offset of the first byte after the size field
    pub offset: usize,
    pub size:   u32
}

impl LayerBlendingRanges {
    fn decode<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>
    ) -> Result<LayerBlendingRanges, PSDDecodeErrors> {
        let size = stream.get_u32_be_err()?;
        let offset = stream.position();

        stream.skip(size as usize)?;

        Ok(LayerBlendingRanges { offset, size })
    }
}

/// One layer's geometry, channels and blending settings
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayerRecord {
    /// Offset of the record's first byte
    pub offset:            usize,
    pub top:               i32,
    pub left:              i32,
    pub right:             i32,
    pub bottom:            i32,
    pub channels:          Vec<ChannelInfo>,
    pub blend_signature:   FourCC,
    pub blend_key:         FourCC,
    /// `None` for keys outside the blend mode table
    pub blend_mode:        Option<BlendMode>,
    pub opacity:           u8,
    /// 0 = base, 1 = non-base
    pub clipping:          u8,
    pub flags:             LayerFlags,
    pub filler:            u8,
    /// Declared length of the mask, blending ranges and name block
    pub extra_data_length: u32,
    pub mask:              LayerMaskAdjustment,
    pub blending_ranges:   LayerBlendingRanges,
    pub name:              Option<String>
}

impl LayerRecord {
    pub(crate) fn decode<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>, ctx: &mut DecodeContext, index: usize
    ) -> Result<LayerRecord, PSDDecodeErrors> {
        Self::decode_fields(stream, ctx, index).map_err(|e| e.within(Section::LayerRecord(index)))
    }

    fn decode_fields<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>, ctx: &mut DecodeContext, index: usize
    ) -> Result<LayerRecord, PSDDecodeErrors> {
        let offset = stream.position();

        // stored as top, left, right, bottom
        let top = stream.get_i32_be_err()?;
        let left = stream.get_i32_be_err()?;
        let right = stream.get_i32_be_err()?;
        let bottom = stream.get_i32_be_err()?;

        let channel_count = stream.get_u16_be_err()?;
        let mut channels = Vec::with_capacity(usize::from(channel_count));

        for _ in 0..channel_count {
            let id = stream.get_i16_be_err()?;
            let length = stream.get_u32_be_err()?;

            channels.push(ChannelInfo { id, length });
        }

        let signature_offset = stream.position();
        let blend_signature = FourCC(stream.read_fixed_bytes_or_error::<4>()?);

        if blend_signature != BLEND_SIGNATURE {
            ctx.advise(DecodeWarning::new(
                Section::LayerRecord(index),
                signature_offset,
                WarningKind::InvalidSignature {
                    expected: BLEND_SIGNATURE,
                    found:    blend_signature
                }
            ))?;
        }

        let blend_key = FourCC(stream.read_fixed_bytes_or_error::<4>()?);
        let blend_mode = BlendMode::from_key(blend_key);

        if blend_mode.is_none() {
            debug!("Layer {}: unknown blend mode key {:?}", index, blend_key);
        }

        let opacity = stream.get_u8_err()?;
        let clipping = stream.get_u8_err()?;
        let flags = LayerFlags::from_bits_retain(stream.get_u8_err()?);
        let filler = stream.get_u8_err()?;

        let extra_data_length = stream.get_u32_be_err()?;
        let extra_data_start = stream.position();

        let mut mask = LayerMaskAdjustment::default();
        let mut blending_ranges = LayerBlendingRanges::default();
        let mut name = None;

        // An empty extra data block has no mask, ranges or name to read
        if extra_data_length != 0 {
            mask = LayerMaskAdjustment::decode(stream)?;
            blending_ranges = LayerBlendingRanges::decode(stream)?;
            name = read_layer_name(stream)?;

            // Skip whatever follows the name (effects, unicode name, ...).
            // The declared length is authoritative, not what was parsed.
            seek_to_declared_end(
                stream,
                Section::LayerRecord(index),
                extra_data_start as u64 + u64::from(extra_data_length)
            )?;
        }

        trace!(
            "Layer {}: {:?} [{}, {}, {}, {}] {} channels",
            index,
            name,
            top,
            left,
            right,
            bottom,
            channels.len()
        );

        Ok(LayerRecord {
            offset,
            top,
            left,
            right,
            bottom,
            channels,
            blend_signature,
            blend_key,
            blend_mode,
            opacity,
            clipping,
            flags,
            filler,
            extra_data_length,
            mask,
            blending_ranges,
            name
        })
    }

    /// `right - left`, zero for inverted rectangles
    pub fn width(&self) -> u32 {
        u32::try_from(i64::from(self.right) - i64::from(self.left)).unwrap_or(0)
    }

    /// `bottom - top`, zero for inverted rectangles
    pub fn height(&self) -> u32 {
        u32::try_from(i64::from(self.bottom) - i64::from(self.top)).unwrap_or(0)
    }

    pub const fn is_visible(&self) -> bool {
        self.flags.is_visible()
    }

    /// Name of the blend mode, `None` for unknown keys
    pub fn blend_mode_name(&self) -> Option<&'static str> {
        self.blend_mode.map(BlendMode::name)
    }

    /// Offset of the first byte past this record
    pub fn end(&self) -> usize {
        self.data_start() + self.extra_data_length as usize
    }

    /// Offset of the extra data block, right after its length field
    fn data_start(&self) -> usize {
        // 16 bytes of bounds, channel count, 6 per channel,
        // 12 bytes of blend settings and the extra data length
        self.offset + 16 + 2 + 6 * self.channels.len() + 12 + 4
    }

    /// Sum of the declared lengths of this layer's channel image data
    pub fn channel_data_length(&self) -> u64 {
        self.channels.iter().map(|c| u64::from(c.length)).sum()
    }
}

/// Pascal string layer name
///
/// Unlike resource block names an empty name takes only the length byte.
fn read_layer_name<T: AsRef<[u8]>>(
    stream: &mut ByteCursor<T>
) -> Result<Option<String>, PSDDecodeErrors> {
    let length = stream.get_u8_err()?;

    if length == 0 {
        return Ok(None);
    }
    Ok(Some(stream.read_fixed_string(usize::from(length))?))
}
