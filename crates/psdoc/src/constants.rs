/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(clippy::upper_case_acronyms)]

use core::fmt::{Debug, Display, Formatter};

pub const PSD_IDENTIFIER_BE: u32 = 0x38425053;

/// Signature every document starts with
pub const PSD_SIGNATURE: FourCC = FourCC(*b"8BPS");
/// Signature expected at the start of every image resource block
pub const RESOURCE_SIGNATURE: FourCC = FourCC(*b"8BIM");
/// Signature expected in front of every layer's blend mode key
pub const BLEND_SIGNATURE: FourCC = FourCC(*b"8BIM");

/// Size of the fixed file header
pub const HEADER_SIZE: usize = 26;
/// Size of the color table an indexed document carries
pub const INDEXED_PALETTE_SIZE: u32 = 768;
/// Largest channel count the format allows
pub const MAX_CHANNELS: u16 = 56;

/// A four byte code, e.g. a signature or a blend mode key
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl Display for FourCC {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for byte in self.0 {
            write!(f, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

impl Debug for FourCC {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "FourCC(\"{self}\")")
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ColorModes {
    Bitmap = 0,
    Grayscale = 1,
    IndexedColor = 2,
    RGB = 3,
    CMYK = 4,
    MultiChannel = 7,
    DuoTone = 8,
    LabColor = 9
}

impl ColorModes {
    pub fn from_int(int: u16) -> Option<ColorModes> {
        use crate::constants::ColorModes::{
            Bitmap, DuoTone, Grayscale, IndexedColor, LabColor, MultiChannel, CMYK, RGB
        };

        match int {
            0 => Some(Bitmap),
            1 => Some(Grayscale),
            2 => Some(IndexedColor),
            3 => Some(RGB),
            4 => Some(CMYK),
            7 => Some(MultiChannel),
            8 => Some(DuoTone),
            9 => Some(LabColor),
            _ => None
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ColorModes::Bitmap => "Bitmap",
            ColorModes::Grayscale => "Grayscale",
            ColorModes::IndexedColor => "Indexed",
            ColorModes::RGB => "RGB",
            ColorModes::CMYK => "CMYK",
            ColorModes::MultiChannel => "Multichannel",
            ColorModes::DuoTone => "Duotone",
            ColorModes::LabColor => "Lab"
        }
    }

    /// Whether the color mode data section carries a palette for this mode
    pub const fn has_color_data(self) -> bool {
        matches!(self, ColorModes::IndexedColor | ColorModes::DuoTone)
    }
}

/// Resolve a raw color mode code to its name, `"unknown"` for codes
/// outside the table
pub fn color_mode_name(code: u16) -> &'static str {
    ColorModes::from_int(code).map_or("unknown", ColorModes::name)
}

/// Layer blend modes
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BlendMode {
    PassThrough,
    Normal,
    Dissolve,
    Darken,
    Multiply,
    ColorBurn,
    LinearBurn,
    DarkerColor,
    Lighten,
    Screen,
    ColorDodge,
    LinearDodge,
    LighterColor,
    Overlay,
    SoftLight,
    HardLight,
    VividLight,
    LinearLight,
    PinLight,
    HardMix,
    Difference,
    Exclusion,
    Subtract,
    Divide,
    Hue,
    Saturation,
    Color,
    Luminosity
}

// Keys are always four bytes, short ones are padded with spaces.
const BLEND_MODES: [([u8; 4], BlendMode, &str); 28] = [
    (*b"pass", BlendMode::PassThrough, "pass through"),
    (*b"norm", BlendMode::Normal, "normal"),
    (*b"diss", BlendMode::Dissolve, "dissolve"),
    (*b"dark", BlendMode::Darken, "darken"),
    (*b"mul ", BlendMode::Multiply, "multiply"),
    (*b"idiv", BlendMode::ColorBurn, "color burn"),
    (*b"lbrn", BlendMode::LinearBurn, "linear burn"),
    (*b"dkCl", BlendMode::DarkerColor, "darker color"),
    (*b"lite", BlendMode::Lighten, "lighten"),
    (*b"scrn", BlendMode::Screen, "screen"),
    (*b"div ", BlendMode::ColorDodge, "color dodge"),
    (*b"lddg", BlendMode::LinearDodge, "linear dodge"),
    (*b"lgCl", BlendMode::LighterColor, "lighter color"),
    (*b"over", BlendMode::Overlay, "overlay"),
    (*b"sLit", BlendMode::SoftLight, "soft light"),
    (*b"hLit", BlendMode::HardLight, "hard light"),
    (*b"vLit", BlendMode::VividLight, "vivid light"),
    (*b"lLit", BlendMode::LinearLight, "linear light"),
    (*b"pLit", BlendMode::PinLight, "pin light"),
    (*b"hMix", BlendMode::HardMix, "hard mix"),
    (*b"diff", BlendMode::Difference, "difference"),
    (*b"smud", BlendMode::Exclusion, "exclusion"),
    (*b"fsub", BlendMode::Subtract, "subtract"),
    (*b"fdiv", BlendMode::Divide, "divide"),
    (*b"hue ", BlendMode::Hue, "hue"),
    (*b"sat ", BlendMode::Saturation, "saturation"),
    (*b"colr", BlendMode::Color, "color"),
    (*b"lum ", BlendMode::Luminosity, "luminosity")
];

impl BlendMode {
    /// Resolve a blend mode key, `None` for keys outside the table
    pub fn from_key(key: FourCC) -> Option<BlendMode> {
        BLEND_MODES
            .iter()
            .find(|(bytes, ..)| *bytes == key.0)
            .map(|(_, mode, _)| *mode)
    }

    pub fn key(self) -> FourCC {
        FourCC(BLEND_MODES[self as usize].0)
    }

    /// Human readable name, e.g. `"linear dodge"`
    pub fn name(self) -> &'static str {
        BLEND_MODES[self as usize].2
    }
}

/// Compression of the merged image data
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CompressionMethod {
    NoCompression = 0,
    RLE = 1,
    Zip = 2,
    ZipPrediction = 3
}

impl CompressionMethod {
    pub fn from_int(int: u16) -> Option<CompressionMethod> {
        match int {
            0 => Some(Self::NoCompression),
            1 => Some(Self::RLE),
            2 => Some(Self::Zip),
            3 => Some(Self::ZipPrediction),
            _ => None
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NoCompression => "raw",
            Self::RLE => "rle",
            Self::Zip => "zip",
            Self::ZipPrediction => "zip with prediction"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_mode_table() {
        let expected = [
            (0, "Bitmap"),
            (1, "Grayscale"),
            (2, "Indexed"),
            (3, "RGB"),
            (4, "CMYK"),
            (5, "unknown"),
            (6, "unknown"),
            (7, "Multichannel"),
            (8, "Duotone"),
            (9, "Lab"),
            (10, "unknown")
        ];
        for (code, name) in expected {
            assert_eq!(color_mode_name(code), name, "code {code}");
        }
    }

    #[test]
    fn blend_keys_resolve() {
        assert_eq!(BlendMode::from_key(FourCC(*b"norm")), Some(BlendMode::Normal));
        assert_eq!(BlendMode::Normal.name(), "normal");
        assert_eq!(BlendMode::from_key(FourCC(*b"mul ")), Some(BlendMode::Multiply));
        assert_eq!(BlendMode::from_key(FourCC(*b"smud")).map(BlendMode::name), Some("exclusion"));
        assert_eq!(BlendMode::from_key(FourCC(*b"XXXX")), None);
        // trailing space is part of the key
        assert_eq!(BlendMode::from_key(FourCC(*b"mul\0")), None);
    }

    #[test]
    fn blend_table_is_in_declaration_order() {
        for (index, (key, mode, _)) in BLEND_MODES.iter().enumerate() {
            assert_eq!(*mode as usize, index);
            assert_eq!(mode.key(), FourCC(*key));
        }
    }

    #[test]
    fn signature_matches_identifier() {
        assert_eq!(PSD_SIGNATURE.to_u32(), PSD_IDENTIFIER_BE);
        assert_eq!(alloc::format!("{}", RESOURCE_SIGNATURE), "8BIM");
    }
}
