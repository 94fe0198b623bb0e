// ## 📂 File: `src/stream/io.rs`
// ## Normalized input loading + all-or-nothing output

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::{debug, warn};

use crate::constants::{DECRYPTED_EXTENSION, ENCRYPTED_EXTENSION};
use crate::stream::chunk_worker::Operation;
use crate::types::StreamError;

/// Canonical input abstraction
pub enum InputSource {
    Reader(Box<dyn Read + Send>),
    File(PathBuf),
    Memory(Vec<u8>),
}

impl From<Vec<u8>> for InputSource {
    fn from(v: Vec<u8>) -> Self {
        InputSource::Memory(v)
    }
}

impl From<&[u8]> for InputSource {
    fn from(v: &[u8]) -> Self {
        InputSource::Memory(v.to_vec())
    }
}

impl From<PathBuf> for InputSource {
    fn from(p: PathBuf) -> Self {
        InputSource::File(p)
    }
}

/// Canonical output abstraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    File(PathBuf),
    Memory,
}

/// Where a finished run put its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLocation {
    File { path: PathBuf, len: u64 },
    Memory(Vec<u8>),
}

impl OutputLocation {
    pub fn len(&self) -> u64 {
        match self {
            OutputLocation::File { len, .. } => *len,
            OutputLocation::Memory(v) => v.len() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            OutputLocation::Memory(v) => Some(v),
            OutputLocation::File { .. } => None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputLocation::File { path, .. } => Some(path),
            OutputLocation::Memory(_) => None,
        }
    }
}

/// Read the whole input into one shared buffer. Chunking slices it.
pub fn read_input(src: InputSource) -> Result<Bytes, StreamError> {
    let data = match src {
        InputSource::Memory(v) => v,
        InputSource::File(p) => fs::read(&p)?,
        InputSource::Reader(mut r) => {
            let mut buf = Vec::new();
            r.read_to_end(&mut buf)?;
            buf
        }
    };
    Ok(Bytes::from(data))
}

/// Emit the finished output.
///
/// File sinks are written to a hidden sibling (`.<name>.part`) and renamed
/// into place only after the write and fsync succeed, so a failure leaves
/// no file at `path`.
pub fn write_output(sink: OutputSink, data: Vec<u8>) -> Result<OutputLocation, StreamError> {
    match sink {
        OutputSink::Memory => Ok(OutputLocation::Memory(data)),
        OutputSink::File(path) => {
            let tmp = temp_sibling(&path);
            debug!(tmp = %tmp.display(), "writing output to temporary file");

            if let Err(e) = write_and_sync(&tmp, &data) {
                if let Err(cleanup) = fs::remove_file(&tmp) {
                    warn!(tmp = %tmp.display(), error = %cleanup, "could not remove temporary file");
                }
                return Err(e.into());
            }
            fs::rename(&tmp, &path)?;

            Ok(OutputLocation::File {
                path,
                len: data.len() as u64,
            })
        }
    }
}

fn write_and_sync(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut f = fs::File::create(path)?;
    f.write_all(data)?;
    f.sync_all()
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| OsStr::new("output")));
    name.push(".part");
    path.with_file_name(name)
}

/// Default output path for `input`.
///
/// Encrypt appends `.enc`. Decrypt strips a trailing `.enc`, otherwise
/// appends `.dec`.
pub fn default_output_path(input: &Path, op: Operation) -> PathBuf {
    match op {
        Operation::Encrypt => append_extension(input, ENCRYPTED_EXTENSION),
        Operation::Decrypt => {
            if input.extension().is_some_and(|e| e == ENCRYPTED_EXTENSION) {
                input.with_extension("")
            } else {
                append_extension(input, DECRYPTED_EXTENSION)
            }
        }
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}
