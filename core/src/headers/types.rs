use crate::constants::SALT_LEN;

/// Leading header of every encrypted file.
///
/// ```text
/// salt        : 16 bytes
/// chunk_count : u32 (BE)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub salt: [u8; SALT_LEN],
    pub chunk_count: u32,
}

impl FileHeader {
    pub const LEN: usize = SALT_LEN // salt
        + 4;                        // chunk_count

    pub fn new(salt: [u8; SALT_LEN], chunk_count: u32) -> Self {
        Self { salt, chunk_count }
    }
}
