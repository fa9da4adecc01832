//! Parse options, optionally read from a TOML file.
//!
//! ```toml
//! tolerate_zero_subheader_size = true
//! recover_missing_first_offset = false
//! ```
use std::{ffi::OsStr, path::Path};

use serde::Deserialize;

use crate::error::SffError;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SffOptions {
    /// v1 only. Some tools write a subheader size of 0; read it as 32.
    pub tolerate_zero_subheader_size: bool,
    /// v1 only. A first subheader offset of 0 with images present is read as
    /// "right after the 512 byte header".
    pub recover_missing_first_offset: bool,
}

impl Default for SffOptions {
    fn default() -> Self {
        Self {
            tolerate_zero_subheader_size: true,
            recover_missing_first_offset: true,
        }
    }
}

impl SffOptions {
    /// Rejects every malformed header instead of patching it.
    pub fn strict() -> Self {
        Self {
            tolerate_zero_subheader_size: false,
            recover_missing_first_offset: false,
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, SffError> {
        toml::from_str(s).map_err(|op| SffError::Config { source: op })
    }

    pub fn from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Self, SffError> {
        let buffer = std::fs::read_to_string(path)?;

        Self::from_toml_str(&buffer)
    }
}
