//! M.U.G.E.N sprite archive (SFF) reader
//!
//! Reads both SFF v1.01 and SFF v2 containers. Sprite payloads are kept as is
//! and only decoded on request, either as embedded PCX or PNG.
mod config;
mod constants;
mod decode;
pub mod error;
#[cfg(test)]
mod fixtures;
pub mod pcx;
mod parser;
mod types;
mod utils;

pub use config::SffOptions;
pub use decode::decode_payload;
pub use types::*;
