use image::{ImageFormat, RgbaImage};
use rayon::prelude::*;

use crate::{
    constants::{PCX_MAGIC, PNG_MAGIC},
    error::SffError,
    pcx::decode_pcx,
    DecodedImage, Sff, Sprite,
};

/// Picks the codec from the payload signature.
pub fn decode_payload(payload: &[u8], sprite_index: usize) -> Result<DecodedImage, SffError> {
    if payload.starts_with(PNG_MAGIC) {
        return image::load_from_memory_with_format(payload, ImageFormat::Png)
            .map(DecodedImage::TrueColor)
            .map_err(|op| SffError::TrueColor { source: op });
    }

    if payload.first() == Some(&PCX_MAGIC) {
        return decode_pcx(payload).map(DecodedImage::Indexed);
    }

    Err(SffError::UnsupportedFormat { sprite_index })
}

impl Sff {
    /// Payload bytes of a sprite, following a link by exactly one hop.
    ///
    /// A link pointing at another linked sprite is not followed further and
    /// results in [`SffError::NoData`].
    pub fn resolve_payload<'a>(&'a self, sprite: &'a Sprite) -> Result<&'a [u8], SffError> {
        let source = if sprite.linked {
            self.sprites
                .get(sprite.prev_copy as usize)
                .ok_or(SffError::LinkOutOfRange {
                    sprite_index: sprite.index,
                    prev_copy: sprite.prev_copy,
                })?
        } else {
            sprite
        };

        source.data.as_deref().ok_or(SffError::NoData {
            sprite_index: sprite.index,
        })
    }

    pub fn decode_sprite(&self, sprite: &Sprite) -> Result<DecodedImage, SffError> {
        let payload = self.resolve_payload(sprite)?;

        decode_payload(payload, sprite.index)
    }

    /// Decodes every sprite in parallel. Results are in table order.
    pub fn decode_all(&self) -> Vec<Result<DecodedImage, SffError>> {
        self.sprites
            .par_iter()
            .map(|sprite| self.decode_sprite(sprite))
            .collect()
    }
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        match self {
            Self::Indexed(image) => image.width,
            Self::TrueColor(image) => image.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Indexed(image) => image.height,
            Self::TrueColor(image) => image.height(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn to_rgba8(&self) -> RgbaImage {
        match self {
            Self::Indexed(indexed) => {
                let colors = indexed.palette.get_colors();
                let mut image = RgbaImage::new(indexed.width, indexed.height);

                image
                    .pixels_mut()
                    .zip(&indexed.pixels)
                    .for_each(|(pixel, &color_index)| {
                        let color = colors.get(color_index as usize).copied();
                        *pixel = color.unwrap_or([0, 0, 0, 255]).into();
                    });

                image
            }
            Self::TrueColor(image) => image.to_rgba8(),
        }
    }
}
