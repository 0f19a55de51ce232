/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The image resources section
//!
//! A length prefixed run of tagged resource blocks holding non pixel
//! data: resolution, thumbnails, ICC profiles, XMP and the like.

use alloc::string::String;
use alloc::vec::Vec;

use psdoc_core::bytestream::ByteCursor;
use psdoc_core::log::{trace, warn};

use crate::constants::{FourCC, RESOURCE_SIGNATURE};
use crate::errors::{PSDDecodeErrors, Section};
use crate::utils::{pad_to_even, DecodeContext};
use crate::warnings::{DecodeWarning, WarningKind};

#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageResources {
    /// Offset of the first block
    pub offset: usize,
    /// Declared length of the section, excluding the length field
    pub length: u32,
    pub blocks: Vec<ResourceBlock>
}

#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResourceBlock {
    /// Offset of the block's signature
    pub offset:             usize,
    pub signature:          FourCC,
    pub id:                 u16,
    pub name:               String,
    /// Bytes taken by the name, length byte and padding included
    pub name_field_size:    usize,
    /// Data length as declared in the file
    pub data_length:        u32,
    /// Data length rounded up to even, the bytes actually stored
    pub padded_data_length: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub data:               Vec<u8>,
    /// Bytes consumed by the whole block
    pub total_size:         usize
}

impl ImageResources {
    pub(crate) fn decode<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>, ctx: &mut DecodeContext
    ) -> Result<ImageResources, PSDDecodeErrors> {
        Self::decode_blocks(stream, ctx).map_err(|e| e.within(Section::ImageResources))
    }

    fn decode_blocks<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>, ctx: &mut DecodeContext
    ) -> Result<ImageResources, PSDDecodeErrors> {
        let length = stream.get_u32_be_err()?;
        let offset = stream.position();

        // subtract every block until nothing of the declared length remains
        let mut remaining = i64::from(length);
        let mut blocks = Vec::new();

        while remaining > 0 {
            if blocks.len() >= ctx.options.get_max_resources() {
                return Err(PSDDecodeErrors::LimitExceeded {
                    section: Section::ImageResources,
                    offset:  stream.position(),
                    limit:   ctx.options.get_max_resources(),
                    found:   blocks.len() + 1
                });
            }
            let block = ResourceBlock::decode(stream, ctx, blocks.len())?;

            remaining -= block.total_size as i64;
            blocks.push(block);
        }

        if remaining < 0 {
            let declared_end = offset as u64 + u64::from(length);

            warn!(
                "Image resources overrun their declared length of {} by {} bytes",
                length, -remaining
            );
            return Err(PSDDecodeErrors::StructuralMismatch {
                section: Section::ImageResources,
                offset: stream.position(),
                declared_end,
                actual_end: stream.position() as u64
            });
        }

        trace!("Image resources: {} blocks in {} bytes", blocks.len(), length);

        Ok(ImageResources {
            offset,
            length,
            blocks
        })
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// First block with the given resource id
    pub fn get(&self, id: u16) -> Option<&ResourceBlock> {
        self.blocks.iter().find(|block| block.id == id)
    }
}

impl ResourceBlock {
    fn decode<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>, ctx: &mut DecodeContext, index: usize
    ) -> Result<ResourceBlock, PSDDecodeErrors> {
        Self::decode_fields(stream, ctx, index).map_err(|e| e.within(Section::ResourceBlock(index)))
    }

    fn decode_fields<T: AsRef<[u8]>>(
        stream: &mut ByteCursor<T>, ctx: &mut DecodeContext, index: usize
    ) -> Result<ResourceBlock, PSDDecodeErrors> {
        let start = stream.position();
        let signature = FourCC(stream.read_fixed_bytes_or_error::<4>()?);

        if signature != RESOURCE_SIGNATURE {
            ctx.advise(DecodeWarning::new(
                Section::ResourceBlock(index),
                start,
                WarningKind::InvalidSignature {
                    expected: RESOURCE_SIGNATURE,
                    found:    signature
                }
            ))?;
        }

        let id = stream.get_u16_be_err()?;

        // Pascal string, padded to make the size even.
        // An empty name still takes two bytes.
        let name_length = stream.get_u8_err()?;
        let name = stream.read_fixed_string(usize::from(name_length))?;
        let name_field_size = pad_to_even(1 + u64::from(name_length)) as usize;
        stream.skip(name_field_size - 1 - usize::from(name_length))?;

        let data_length = stream.get_u32_be_err()?;
        // u32::MAX pads to 2^32 which does not fit a 32 bit usize, the
        // read fails either way
        let padded_data_length =
            usize::try_from(pad_to_even(u64::from(data_length))).unwrap_or(usize::MAX);
        let data = stream.read_bytes(padded_data_length)?.to_vec();

        let total_size = stream.position() - start;

        trace!(
            "Resource {} ({}): {} bytes",
            id,
            describe_resource_id(id).unwrap_or("unknown"),
            data_length
        );

        Ok(ResourceBlock {
            offset: start,
            signature,
            id,
            name,
            name_field_size,
            data_length,
            padded_data_length,
            data,
            total_size
        })
    }

    /// A short description of the block's resource id
    pub fn description(&self) -> Option<&'static str> {
        describe_resource_id(self.id)
    }
}

/// Describe well known image resource ids
pub fn describe_resource_id(id: u16) -> Option<&'static str> {
    let description = match id {
        1000 => "channels, rows, columns, depth and mode",
        1005 => "resolution info",
        1006 => "alpha channel names",
        1007 => "display info (obsolete)",
        1008 => "caption",
        1009 => "border information",
        1010 => "background color",
        1011 => "print flags",
        1012 => "grayscale and multichannel halftoning",
        1013 => "color halftoning",
        1014 => "duotone halftoning",
        1015 => "grayscale and multichannel transfer function",
        1016 => "color transfer functions",
        1017 => "duotone transfer functions",
        1018 => "duotone image information",
        1019 => "effective black and white values",
        1021 => "EPS options",
        1022 => "quick mask information",
        1024 => "layer state information",
        1025 => "working path",
        1026 => "layers group information",
        1028 => "IPTC-NAA record",
        1029 => "image mode for raw format files",
        1030 => "JPEG quality",
        1032 => "grid and guides information",
        1033 => "thumbnail resource (Photoshop 4.0)",
        1034 => "copyright flag",
        1035 => "URL",
        1036 => "thumbnail resource",
        1037 => "global angle",
        1038 => "color samplers resource (obsolete)",
        1039 => "ICC profile",
        1040 => "watermark",
        1041 => "ICC untagged profile",
        1042 => "effects visible",
        1043 => "spot halftone",
        1044 => "document-specific IDs seed number",
        1045 => "unicode alpha names",
        1046 => "indexed color table count",
        1047 => "transparency index",
        1049 => "global altitude",
        1050 => "slices",
        1051 => "workflow URL",
        1052 => "jump to XPEP",
        1053 => "alpha identifiers",
        1054 => "URL list",
        1057 => "version info",
        1058 => "EXIF data 1",
        1059 => "EXIF data 3",
        1060 => "XMP metadata",
        1061 => "caption digest",
        1062 => "print scale",
        1064 => "pixel aspect ratio",
        1065 => "layer comps",
        1066 => "alternate duotone colors",
        1067 => "alternate spot colors",
        1069 => "layer selection IDs",
        1070 => "HDR toning information",
        1071 => "print info",
        1072 => "layer group(s) enabled ID",
        1073 => "color samplers resource",
        1074 => "measurement scale",
        1075 => "timeline information",
        1076 => "sheet disclosure",
        1077 => "display info",
        1078 => "onion skins",
        1080 => "count information",
        1082 => "print information",
        1083 => "print style",
        1084 => "Macintosh NSPrintInfo",
        1085 => "Windows DEVMODE",
        1086 => "auto save file path",
        1087 => "auto save format",
        1088 => "path selection state",
        2000..=2997 => "path information",
        2999 => "name of clipping path",
        3000 => "origin path info",
        4000..=4999 => "plug-in resource",
        7000 => "image ready variables",
        7001 => "image ready data sets",
        7002 => "image ready default selected state",
        7003 => "image ready 7 rollover expanded state",
        7004 => "image ready rollover expanded state",
        7005 => "image ready save layer settings",
        7006 => "image ready version",
        8000 => "lightroom workflow",
        10000 => "print flags information",
        _ => return None
    };
    Some(description)
}
