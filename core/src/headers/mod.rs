//! headers/mod.rs
//! Encrypted file header.
//!
//! Notes:
//! - Fixed-size header (20 bytes): salt followed by the chunk count.
//! - Big-endian integers, matching the frame length prefixes.
//! - The header is not authenticated; a damaged salt only shows up as
//!   padding failures in every chunk.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
