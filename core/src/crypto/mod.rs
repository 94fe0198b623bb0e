//! crypto/mod.rs
//! Key derivation, PKCS#7 padding and AES-256-CBC primitives.
//!
//! Non-responsibilities:
//! - Framing
//! - Parallelism
//! - IO

pub mod types;
pub mod kdf;
pub mod padding;
pub mod cbc;

pub use types::*;
pub use kdf::*;
pub use padding::*;
pub use cbc::*;
