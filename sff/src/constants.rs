pub const SIGNATURE_LENGTH: usize = 12;
// v1.01 keeps the terminating null inside the signature
pub const SIGNATURE_V1: &[u8; SIGNATURE_LENGTH] = b"ElecbyteSpr\0";
pub const SIGNATURE_V2: &[u8; SIGNATURE_LENGTH] = b"ElecbyteSFF2";

/// Fixed size of the file header. Anything shorter cannot be an archive.
pub const HEADER_SIZE: usize = 512;

// Header field offsets
pub const HEADER_FIELDS_OFFSET: usize = 16;

pub const SUBHEADER_V1_SIZE: u32 = 32;
pub const SUBHEADER_V2_SIZE: u32 = 32;

pub const PNG_MAGIC: &[u8; 4] = &[0x89, b'P', b'N', b'G'];

// PCX
pub const PCX_MAGIC: u8 = 0x0A;
pub const PCX_HEADER_SIZE: usize = 128;
pub const PCX_PALETTE_MAGIC: u8 = 0x0C;
pub const PALETTE_COUNT: usize = 256;
/// Marker byte plus 256 RGB triplets.
pub const PCX_PALETTE_TRAILER_SIZE: usize = 1 + PALETTE_COUNT * 3;

pub const RLE_RUN_FLAG: u8 = 0xC0;
pub const RLE_COUNT_MASK: u8 = 0x3F;
