//! 8 bit run-length PCX as embedded in SFF payloads.
//!
//! Only the parts the archives actually use: a 128 byte header carrying the
//! bounding box, an RLE pixel stream and a 769 byte palette trailer.
use nom::{
    bytes::complete::take,
    combinator::map,
    multi::count,
    number::complete::le_i16,
    Parser,
};

use crate::{
    constants::{
        PALETTE_COUNT, PCX_HEADER_SIZE, PCX_MAGIC, PCX_PALETTE_MAGIC, PCX_PALETTE_TRAILER_SIZE,
        RLE_COUNT_MASK, RLE_RUN_FLAG,
    },
    error::SffError,
    parser::IResult,
    IndexedImage, Palette,
};

const BOUNDING_BOX_OFFSET: usize = 4;

fn parse_bounding_box(i: &[u8]) -> IResult<'_, (i16, i16, i16, i16)> {
    (le_i16, le_i16, le_i16, le_i16).parse(i)
}

/// `i` starts at the palette marker.
pub fn parse_palette(i: &[u8]) -> Result<Palette, SffError> {
    if i.len() < PCX_PALETTE_TRAILER_SIZE || i[0] != PCX_PALETTE_MAGIC {
        return Err(SffError::PaletteMissing);
    }

    let (_, colors) = count(
        map(take(3usize), |rgb: &[u8]| [rgb[0], rgb[1], rgb[2], 255]),
        PALETTE_COUNT,
    )
    .parse(&i[1..])
    .map_err(|_: nom::Err<nom::error::Error<&[u8]>>| SffError::PaletteMissing)?;

    Ok(Palette(colors))
}

/// Decodes until `expected` pixels are produced. Leftover input is ignored.
pub fn decode_rle(i: &[u8], expected: usize) -> Result<Vec<u8>, SffError> {
    // every two input bytes yield at most 63 pixels
    let capacity = expected.min(i.len().saturating_mul(RLE_COUNT_MASK as usize));
    let mut pixels = Vec::with_capacity(capacity);
    let mut bytes = i.iter().copied();

    while pixels.len() < expected {
        let Some(byte) = bytes.next() else {
            break;
        };

        if byte & RLE_RUN_FLAG == RLE_RUN_FLAG {
            let run = match byte & RLE_COUNT_MASK {
                0 => 1,
                run => run as usize,
            };

            let Some(value) = bytes.next() else {
                break;
            };

            let run = run.min(expected - pixels.len());
            pixels.resize(pixels.len() + run, value);
        } else {
            pixels.push(byte);
        }
    }

    if pixels.len() < expected {
        return Err(SffError::ShortRun {
            decoded: pixels.len(),
            expected,
        });
    }

    Ok(pixels)
}

pub fn decode_pcx(i: &[u8]) -> Result<IndexedImage, SffError> {
    if i.first() != Some(&PCX_MAGIC) {
        return Err(SffError::NotIndexedFormat);
    }

    // palette has to sit after the fixed header
    let palette_start = i
        .len()
        .checked_sub(PCX_PALETTE_TRAILER_SIZE)
        .filter(|&start| start >= PCX_HEADER_SIZE)
        .ok_or(SffError::PaletteMissing)?;

    let (_, (xmin, ymin, xmax, ymax)) =
        parse_bounding_box(&i[BOUNDING_BOX_OFFSET..]).map_err(|_| SffError::NotIndexedFormat)?;

    let width = i32::from(xmax) - i32::from(xmin) + 1;
    let height = i32::from(ymax) - i32::from(ymin) + 1;

    if width <= 0 || height <= 0 {
        return Err(SffError::InvalidDimensions { width, height });
    }

    // 65536 * 65536 does not fit a 32 bit usize
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or(SffError::InvalidDimensions { width, height })?;

    let palette = parse_palette(&i[palette_start..])?;

    let pixels = decode_rle(&i[PCX_HEADER_SIZE..palette_start], expected)?;

    Ok(IndexedImage {
        width: width as u32,
        height: height as u32,
        pixels,
        palette,
    })
}
