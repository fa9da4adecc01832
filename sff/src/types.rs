use std::collections::BTreeMap;

use image::DynamicImage;

use crate::constants::{SIGNATURE_V1, SIGNATURE_V2, SUBHEADER_V1_SIZE, SUBHEADER_V2_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// SFF v1.01
    V1,
    /// SFF v2, MUGEN 1.1
    V2,
}

impl Version {
    pub fn signature(&self) -> &'static [u8] {
        match self {
            Self::V1 => SIGNATURE_V1,
            Self::V2 => SIGNATURE_V2,
        }
    }

    pub fn subheader_size(&self) -> u32 {
        match self {
            Self::V1 => SUBHEADER_V1_SIZE,
            Self::V2 => SUBHEADER_V2_SIZE,
        }
    }
}

/// Header values after tolerances are applied.
#[derive(Debug, Clone)]
pub struct Header {
    pub group_count: u32,
    pub image_count: u32,
    pub first_subheader_offset: u32,
    pub subheader_size: u32,
    pub shared_palette: bool,
}

/// One sub-header as laid out in file, normalized across versions.
#[derive(Debug, Clone)]
pub struct SubHeader {
    pub next_offset: u32,
    pub length: u32,
    pub axis_x: i16,
    pub axis_y: i16,
    pub group: u32,
    pub number: u32,
    pub prev_copy: u16,
    pub format: u8,
}

#[derive(Debug, Clone)]
pub struct Sprite {
    /// Position in chain order.
    pub index: usize,
    pub group: u32,
    pub number: u32,
    pub axis_x: i16,
    pub axis_y: i16,
    pub linked: bool,
    /// Only meaningful when `linked` is set.
    pub prev_copy: u16,
    /// v1: "same palette as previous sprite" flag. v2: pixel format hint (0, 3 or 4).
    pub format: u8,
    /// `None` exactly when the sprite is linked.
    pub data: Option<Vec<u8>>,
}

#[derive(Debug)]
pub struct Sff {
    pub(crate) version: Version,
    pub(crate) header: Header,
    pub(crate) sprites: Vec<Sprite>,
    // group -> indices into `sprites`, in chain order
    pub(crate) groups: BTreeMap<u32, Vec<usize>>,
}

/// 256 RGBA entries, always opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette(pub Vec<[u8; 4]>);

impl Palette {
    pub fn get_colors(&self) -> &Vec<[u8; 4]> {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct IndexedImage {
    pub width: u32,
    pub height: u32,
    // [[u8; width]; height]
    pub pixels: Vec<u8>,
    pub palette: Palette,
}

#[derive(Debug, Clone)]
pub enum DecodedImage {
    /// PCX payload, decoded in crate
    Indexed(IndexedImage),
    /// PNG payload, decoded by `image`
    TrueColor(DynamicImage),
}
