//! constants.rs
//! Wire sizes, cryptographic parameters and run defaults.

use std::time::Duration;

/// Salt length stored at the start of every encrypted file.
pub const SALT_LEN: usize = 16;

/// CBC initialization vector length (one AES block).
pub const IV_LEN: usize = 16;

/// AES block size; PKCS#7 pads to a multiple of this.
pub const BLOCK_SIZE: usize = 16;

/// Derived key length (AES-256).
pub const KEY_LEN_32: usize = 32;

/// PBKDF2-HMAC-SHA-256 rounds. Not stored in the file, so changing it breaks
/// decryption of existing files.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of the big-endian `u32` prefix in front of every chunk frame.
pub const FRAME_LEN_PREFIX: usize = 4;

/// Defaults when Option<T> is None
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024; // 64 KiB
/// Max chunk size sanity bound (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Worker count used when the host core count cannot be trusted.
pub const DEFAULT_WORKERS: usize = 4;
/// Upper bound on the worker pool size.
pub const MAX_WORKERS: usize = 64;

/// Capacity of the bounded dispatch channel.
pub const DEFAULT_QUEUE_CAP: usize = 64;

/// How often a blocked collector wakes up to look at the cancellation token.
pub const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Default algorithm name when none is configured.
pub const DEFAULT_ALGORITHM: &str = "FCFS";

/// File extensions used by `default_output_path`.
pub const ENCRYPTED_EXTENSION: &str = "enc";
pub const DECRYPTED_EXTENSION: &str = "dec";
