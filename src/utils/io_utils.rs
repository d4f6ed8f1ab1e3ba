//! I/O utility functions for archive and configuration files.
//!
//! This module provides helper functions for:
//! - Expanding `~` and environment variables in configured paths
//! - Opening archive files with resource-level errors
//! - Bounded reads that tolerate end of file
//! - Reading index lines that may not be valid UTF-8
//!
//! # Examples
//!
//! ```no_run
//! use oed::utils::io_utils::{expand_path, open_readable_file};
//!
//! let path = expand_path("~/oed/oed2index");
//! let file = open_readable_file(&path).unwrap();
//! ```

use std::fs::File;
use std::io::{BufRead, Read};
use std::path::{Path, PathBuf};

use log::debug;
use snafu::ResultExt;

use crate::error::ResourceUnavailableSnafu;
use crate::Result;

/// Expands a leading `~` and `$VAR` references in a path.
///
/// Unknown variables leave the path untouched.
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            debug!("Could not expand {}: {}", path, e);
            PathBuf::from(shellexpand::tilde(path).as_ref())
        }
    }
}

/// Opens a file for reading.
///
/// # Errors
///
/// Returns `ResourceUnavailable` naming the path if the file cannot be opened.
pub fn open_readable_file<P: AsRef<Path>>(path: P) -> Result<File> {
    let path = path.as_ref();
    File::open(path).context(ResourceUnavailableSnafu { path: path.to_path_buf() })
}

/// Reads up to `len` bytes. Reaching end of file early is not an error.
pub fn read_up_to<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(len.min(1 << 20));
    reader.take(len as u64).read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Reads one line into `line`, without the trailing `\n` or `\r\n`.
///
/// Invalid UTF-8 is replaced rather than rejected. Returns `false` at end of file.
pub fn read_index_line<R: BufRead>(reader: &mut R, raw: &mut Vec<u8>, line: &mut String) -> Result<bool> {
    raw.clear();
    line.clear();
    if reader.read_until(b'\n', raw)? == 0 {
        return Ok(false);
    }
    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }
    line.push_str(&String::from_utf8_lossy(raw));
    Ok(true)
}
