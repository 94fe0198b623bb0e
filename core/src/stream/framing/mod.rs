//! Wire framing for encrypted chunks.
//!
//! Responsibilities:
//! - Define the chunk frame (`iv || ciphertext`)
//! - Encode frames with their big-endian length prefix
//! - Decode frames with strict validation
//!
//! Non-responsibilities:
//! - Cryptography
//! - IO
//! - Parallelism

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    ChunkFrame,
    FrameError,
};
pub use encode::{encode_frame, write_length_prefixed};
pub use decode::{decode_frame, read_frames};
