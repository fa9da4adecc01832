//! Synthetic archives and PCX payloads for tests.
use std::collections::BTreeSet;

use byte_writer::ByteWriter;

use crate::{
    constants::{
        HEADER_SIZE, PALETTE_COUNT, PCX_HEADER_SIZE, PCX_MAGIC, PCX_PALETTE_MAGIC, RLE_COUNT_MASK,
        RLE_RUN_FLAG,
    },
    Version,
};

pub struct TestSprite {
    pub group: u32,
    pub number: u32,
    pub axis: (i16, i16),
    pub prev_copy: u16,
    pub format: u8,
    /// Empty means linked.
    pub data: Vec<u8>,
}

impl TestSprite {
    pub fn raw(group: u32, number: u32, data: Vec<u8>) -> Self {
        Self {
            group,
            number,
            axis: (0, 0),
            prev_copy: 0,
            format: 0,
            data,
        }
    }

    pub fn linked(group: u32, number: u32, prev_copy: u16) -> Self {
        Self {
            prev_copy,
            ..Self::raw(group, number, vec![])
        }
    }
}

/// Header at 0, subheaders start at 512 and each payload directly follows its subheader.
pub fn archive(version: Version, sprites: &[TestSprite]) -> ByteWriter {
    let mut writer = ByteWriter::new();
    let group_count = sprites
        .iter()
        .map(|sprite| sprite.group)
        .collect::<BTreeSet<u32>>()
        .len();

    writer.append_u8_slice(version.signature());
    // version bytes, unused
    writer.append_u8_slice(&[0, 1, 0, 1]);
    writer.append_u32(group_count as u32);
    writer.append_u32(sprites.len() as u32);
    writer.append_u32(if sprites.is_empty() { 0 } else { HEADER_SIZE as u32 });
    writer.append_u32(version.subheader_size());
    writer.append_u8(1);
    writer.pad_to(HEADER_SIZE);

    let mut previous_next_offset: Option<usize> = None;

    for sprite in sprites {
        let start = writer.get_offset();

        if let Some(previous) = previous_next_offset {
            writer.replace_with_u32(previous, start as u32);
        }

        previous_next_offset = Some(start);

        writer.append_u32(0);
        writer.append_u32(sprite.data.len() as u32);
        writer.append_i16(sprite.axis.0);
        writer.append_i16(sprite.axis.1);

        match version {
            Version::V1 => {
                writer.append_u16(sprite.group as u16);
                writer.append_u16(sprite.number as u16);
            }
            Version::V2 => {
                writer.append_u32(sprite.group);
                writer.append_u32(sprite.number);
            }
        }

        writer.append_u16(sprite.prev_copy);
        writer.append_u8(sprite.format);
        writer.pad_to(start + version.subheader_size() as usize);

        writer.append_u8_slice(&sprite.data);
    }

    writer
}

/// Reference encoder. Runs are capped at 63, run bytes always carry a value.
pub fn encode_rle(pixels: &[u8]) -> Vec<u8> {
    let mut res = vec![];
    let mut index = 0;

    while index < pixels.len() {
        let value = pixels[index];
        let run = pixels[index..]
            .iter()
            .take(RLE_COUNT_MASK as usize)
            .take_while(|&&pixel| pixel == value)
            .count();

        if run == 1 && value & RLE_RUN_FLAG != RLE_RUN_FLAG {
            res.push(value);
        } else {
            res.push(RLE_RUN_FLAG | run as u8);
            res.push(value);
        }

        index += run;
    }

    res
}

pub fn grey_palette() -> Vec<[u8; 3]> {
    (0..PALETTE_COUNT).map(|i| [i as u8; 3]).collect()
}

/// 8 bit PCX with bounding box `(0, 0)..=(width - 1, height - 1)`.
pub fn pcx(width: i16, height: i16, body: &[u8], palette: &[[u8; 3]]) -> Vec<u8> {
    pcx_with_box((0, 0, width - 1, height - 1), body, palette)
}

pub fn pcx_with_box(
    (xmin, ymin, xmax, ymax): (i16, i16, i16, i16),
    body: &[u8],
    palette: &[[u8; 3]],
) -> Vec<u8> {
    let mut writer = ByteWriter::new();

    // manufacturer, version, encoding, bits per pixel
    writer.append_u8_slice(&[PCX_MAGIC, 5, 1, 8]);
    writer.append_i16(xmin);
    writer.append_i16(ymin);
    writer.append_i16(xmax);
    writer.append_i16(ymax);
    writer.pad_to(PCX_HEADER_SIZE);

    writer.append_u8_slice(body);

    writer.append_u8(PCX_PALETTE_MAGIC);
    palette
        .iter()
        .for_each(|color| writer.append_u8_slice(color));
    writer.append_repeated(0, (PALETTE_COUNT - palette.len()) * 3);

    writer.data
}
