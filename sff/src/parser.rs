use std::collections::BTreeMap;

use log::{debug, trace, warn};
use nom::{
    combinator::map,
    number::complete::{le_i16, le_u16, le_u32, le_u8},
    IResult as _IResult, Parser,
};

use crate::{
    config::SffOptions,
    constants::{HEADER_FIELDS_OFFSET, HEADER_SIZE, SIGNATURE_LENGTH, SIGNATURE_V1, SIGNATURE_V2},
    error::SffError,
    Header, Sff, Sprite, SubHeader, Version,
};

pub type IResult<'a, T> = _IResult<&'a [u8], T>;

type SubHeaderParser = for<'a> fn(&'a [u8]) -> IResult<'a, SubHeader>;

pub fn detect_version(i: &[u8]) -> Result<Version, SffError> {
    if i.len() < HEADER_SIZE {
        return Err(SffError::TooSmall { size: i.len() });
    }

    let signature = &i[..SIGNATURE_LENGTH];

    if signature == SIGNATURE_V1.as_slice() {
        Ok(Version::V1)
    } else if signature == SIGNATURE_V2.as_slice() {
        Ok(Version::V2)
    } else {
        Err(SffError::UnknownSignature {
            signature: signature.to_vec(),
        })
    }
}

fn parse_header_fields(i: &[u8]) -> IResult<'_, Header> {
    map(
        (le_u32, le_u32, le_u32, le_u32, le_u8),
        |(group_count, image_count, first_subheader_offset, subheader_size, shared_palette)| {
            Header {
                group_count,
                image_count,
                first_subheader_offset,
                subheader_size,
                shared_palette: shared_palette & 1 != 0,
            }
        },
    )
    .parse(i)
}

pub fn parse_header(i: &[u8], version: Version, options: &SffOptions) -> Result<Header, SffError> {
    let fields = i.get(HEADER_FIELDS_OFFSET..).ok_or(SffError::ParseHeader)?;
    let (_, header) = parse_header_fields(fields).map_err(|_| SffError::ParseHeader)?;

    apply_tolerances(header, version, options)
}

pub fn apply_tolerances(
    mut header: Header,
    version: Version,
    options: &SffOptions,
) -> Result<Header, SffError> {
    let expected_size = version.subheader_size();

    match version {
        Version::V1 => {
            if header.subheader_size == 0 && options.tolerate_zero_subheader_size {
                warn!("v1 subheader size is 0, using {expected_size}");
                header.subheader_size = expected_size;
            }

            if header.subheader_size != expected_size {
                return Err(SffError::BadSubheaderSize {
                    version,
                    size: header.subheader_size,
                });
            }

            // not documented anywhere, only seen in the wild
            if header.first_subheader_offset == 0
                && header.image_count > 0
                && options.recover_missing_first_offset
            {
                warn!("v1 first subheader offset is 0, assuming it follows the header");
                header.first_subheader_offset = HEADER_SIZE as u32;
            }
        }
        Version::V2 => {
            if header.subheader_size != expected_size {
                return Err(SffError::BadSubheaderSize {
                    version,
                    size: header.subheader_size,
                });
            }
        }
    }

    Ok(header)
}

pub fn parse_subheader_v1(i: &[u8]) -> IResult<'_, SubHeader> {
    map(
        (le_u32, le_u32, le_i16, le_i16, le_u16, le_u16, le_u16, le_u8),
        |(next_offset, length, axis_x, axis_y, group, number, prev_copy, format)| SubHeader {
            next_offset,
            length,
            axis_x,
            axis_y,
            group: u32::from(group),
            number: u32::from(number),
            prev_copy,
            format,
        },
    )
    .parse(i)
}

pub fn parse_subheader_v2(i: &[u8]) -> IResult<'_, SubHeader> {
    map(
        (le_u32, le_u32, le_i16, le_i16, le_u32, le_u32, le_u16, le_u8),
        |(next_offset, length, axis_x, axis_y, group, number, prev_copy, format)| SubHeader {
            next_offset,
            length,
            axis_x,
            axis_y,
            group,
            number,
            prev_copy,
            format,
        },
    )
    .parse(i)
}

pub fn walk_chain(i: &[u8], version: Version, header: Header) -> Result<Sff, SffError> {
    let parse_subheader: SubHeaderParser = match version {
        Version::V1 => parse_subheader_v1,
        Version::V2 => parse_subheader_v2,
    };

    let file_length = i.len();
    let subheader_size = header.subheader_size as usize;
    let declared = header.image_count;

    // a bogus image count must not turn into a huge allocation
    let capacity = (declared as usize).min(file_length / subheader_size.max(1));
    let mut sprites: Vec<Sprite> = Vec::with_capacity(capacity);
    let mut groups: BTreeMap<u32, Vec<usize>> = BTreeMap::new();

    let mut offset = header.first_subheader_offset;

    while offset != 0 && sprites.len() < declared as usize {
        let sprite_index = sprites.len();
        let subheader_start = offset as usize;

        let payload_start = subheader_start
            .checked_add(subheader_size)
            .filter(|&end| end <= file_length)
            .ok_or(SffError::SubheaderOutOfBounds { offset })?;

        let (_, subheader) = parse_subheader(&i[subheader_start..payload_start])
            .map_err(|_| SffError::SubheaderOutOfBounds { offset })?;

        let linked = subheader.length == 0;

        let data = if linked {
            None
        } else {
            let payload_end = payload_start
                .checked_add(subheader.length as usize)
                .filter(|&end| end <= file_length)
                .ok_or(SffError::PayloadOutOfBounds { sprite_index })?;

            Some(i[payload_start..payload_end].to_vec())
        };

        trace!(
            "sprite {sprite_index} at {offset}: group {} number {} length {} linked {linked}",
            subheader.group,
            subheader.number,
            subheader.length
        );

        groups.entry(subheader.group).or_default().push(sprite_index);

        sprites.push(Sprite {
            index: sprite_index,
            group: subheader.group,
            number: subheader.number,
            axis_x: subheader.axis_x,
            axis_y: subheader.axis_y,
            linked,
            prev_copy: subheader.prev_copy,
            format: subheader.format,
            data,
        });

        offset = subheader.next_offset;
    }

    if sprites.len() != declared as usize {
        return Err(SffError::SpriteCountMismatch {
            parsed: sprites.len(),
            declared,
        });
    }

    Ok(Sff {
        version,
        header,
        sprites,
        groups,
    })
}

pub fn parse_sff(i: &[u8], options: &SffOptions) -> Result<Sff, SffError> {
    let version = detect_version(i)?;
    let header = parse_header(i, version, options)?;

    let sff = walk_chain(i, version, header)?;

    debug!(
        "parsed {version:?} archive: {} sprites in {} groups",
        sff.sprites.len(),
        sff.groups.len()
    );

    Ok(sff)
}
