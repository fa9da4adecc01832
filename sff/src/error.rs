use crate::Version;

#[derive(Debug, thiserror::Error)]
pub enum SffError {
    #[error("File is too small to be an SFF archive: {size} bytes")]
    TooSmall { size: usize },
    #[error("Unknown SFF signature: {signature:?}")]
    UnknownSignature { signature: Vec<u8> },
    #[error("Failed to parse header")]
    ParseHeader,
    #[error("Unexpected {version:?} subheader size: {size}")]
    BadSubheaderSize { version: Version, size: u32 },
    #[error("Subheader out of bounds at offset {offset}")]
    SubheaderOutOfBounds { offset: u32 },
    #[error("Payload of sprite {sprite_index} is out of bounds")]
    PayloadOutOfBounds { sprite_index: usize },
    #[error("Mismatched sprite count. Parsed ({parsed}). Header says ({declared})")]
    SpriteCountMismatch { parsed: usize, declared: u32 },
    #[error("Sprite {sprite_index} has no data")]
    NoData { sprite_index: usize },
    #[error("Sprite {sprite_index} links to sprite {prev_copy} which does not exist")]
    LinkOutOfRange { sprite_index: usize, prev_copy: u16 },
    #[error("Unsupported image format in sprite {sprite_index}")]
    UnsupportedFormat { sprite_index: usize },
    #[error("Payload is not PCX")]
    NotIndexedFormat,
    #[error("PCX palette missing")]
    PaletteMissing,
    #[error("Invalid PCX dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("PCX pixel stream ended early. Decoded ({decoded}). Expect ({expected})")]
    ShortRun { decoded: usize, expected: usize },
    #[error("Cannot decode PNG payload: {source}")]
    TrueColor {
        #[source]
        source: image::ImageError,
    },
    #[error("Cannot parse options: {source}")]
    Config {
        #[source]
        source: toml::de::Error,
    },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
