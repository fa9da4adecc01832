use std::{ffi::OsStr, path::Path};

use crate::{config::SffOptions, error::SffError, parser::parse_sff, Header, Sff, Sprite, Version};

impl Sff {
    pub fn open_from_bytes(i: &[u8]) -> Result<Sff, SffError> {
        Self::open_from_bytes_with_options(i, &SffOptions::default())
    }

    pub fn open_from_bytes_with_options(i: &[u8], options: &SffOptions) -> Result<Sff, SffError> {
        parse_sff(i, options)
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Sff, SffError> {
        Self::open_from_file_with_options(path, &SffOptions::default())
    }

    pub fn open_from_file_with_options(
        path: impl AsRef<OsStr> + AsRef<Path>,
        options: &SffOptions,
    ) -> Result<Sff, SffError> {
        let bytes = std::fs::read(path)?;

        Self::open_from_bytes_with_options(&bytes, options)
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn group_count(&self) -> u32 {
        self.header.group_count
    }

    pub fn image_count(&self) -> u32 {
        self.header.image_count
    }

    pub fn shared_palette(&self) -> bool {
        self.header.shared_palette
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn sprite(&self, index: usize) -> Option<&Sprite> {
        self.sprites.get(index)
    }

    /// Group ids in ascending order.
    pub fn groups(&self) -> impl Iterator<Item = u32> + '_ {
        self.groups.keys().copied()
    }

    /// Sprites of one group in chain order. Empty if the group does not exist.
    pub fn group(&self, group: u32) -> impl Iterator<Item = &Sprite> + '_ {
        self.groups
            .get(&group)
            .into_iter()
            .flatten()
            .filter_map(|&index| self.sprites.get(index))
    }

    /// First sprite in `group` with `number`.
    pub fn get(&self, group: u32, number: u32) -> Option<&Sprite> {
        self.group(group).find(|sprite| sprite.number == number)
    }
}
