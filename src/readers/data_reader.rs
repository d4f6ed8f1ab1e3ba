//! Data file reader: offset to decoded entry.
//!
//! Reads a bounded window at a record offset and runs it through the record
//! decoder and the structural extractor. Entries longer than the window are
//! truncated silently.

use std::path::Path;

use log::debug;

use crate::storage::entry::Entry;
use crate::storage::entry_extractor::extract;
use crate::storage::record_decoder::{decode_record, RECORD_WINDOW_SIZE};
use crate::storage::shared_file::SharedFile;
use crate::Result;

/// Upper bound on a single raw read.
pub const MAX_RAW_READ: usize = 1024 * 1024;

/// Reader over the concatenated record data file.
pub struct DataReader {
    file: SharedFile,
}

impl DataReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<DataReader> {
        Ok(DataReader { file: SharedFile::open(path)? })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Reads the record window at `offset` and returns its decoded text.
    pub fn decode_at(&self, offset: u64) -> Result<(String, u32)> {
        let window = self.file.read_at(offset, RECORD_WINDOW_SIZE)?;
        let text = decode_record(&window);
        Ok((text, window.len() as u32))
    }

    /// Reads and decodes the entry at `offset`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the seek or read fails. Decode anomalies are never errors.
    pub fn read_entry(&self, offset: u64) -> Result<Entry> {
        let (definition, length) = self.decode_at(offset)?;
        let fields = extract(&definition);
        debug!("Decoded entry {:?} at offset {} ({} bytes read)", fields.headword, offset, length);
        Ok(Entry {
            word: fields.headword,
            definition,
            etymology: fields.etymology,
            offset,
            length,
        })
    }

    /// Reads up to `length` raw bytes at `offset` without decoding.
    /// `length` is capped at [`MAX_RAW_READ`].
    pub fn read_raw(&self, offset: u64, length: usize) -> Result<Vec<u8>> {
        if length > MAX_RAW_READ {
            debug!("Raw read of {} bytes capped at {}", length, MAX_RAW_READ);
        }
        self.file.read_at(offset, length.min(MAX_RAW_READ))
    }
}
