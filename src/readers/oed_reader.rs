//! OED archive reader for high-level dictionary lookups.
//!
//! This module provides the main API over an OED2 archive, which consists of
//! a data file of `0x00`-terminated records and a plain-text index mapping
//! headwords to byte offsets. It handles:
//! - Word lookup (case-insensitive, first match in file order)
//! - Prefix search over the index
//! - "Random" entry retrieval
//! - Raw byte reads for debugging
//!
//! Both files are opened once and shared by every operation. Each file sits
//! behind its own mutex, so the reader can be used from several threads.
//!
//! # Examples
//!
//! ```no_run
//! use oed::readers::OedReader;
//! use oed::render::{render, RenderFormat};
//!
//! # fn main() -> oed::Result<()> {
//! let reader = OedReader::open("/data/oed2", "/data/oed2index")?;
//! let entry = reader.lookup("serendipity")?;
//! println!("{}", render(&entry, RenderFormat::Clean, true));
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use log::*;
use serde::{Deserialize, Serialize};

use super::data_reader::DataReader;
use super::index_reader::IndexReader;
use crate::config::OedConfig;
use crate::storage::entry::Entry;
use crate::Result;

/// How [`OedReader::random_entry`] picks its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandomPolicy {
    /// The first complete line after the byte midpoint of the index. Returns
    /// the same entry every time for a given index file.
    #[default]
    Midpoint,
    /// A uniformly chosen usable index record. Costs two index scans.
    Uniform,
}

/// High-level OED archive reader.
pub struct OedReader {
    index: IndexReader,
    data: DataReader,
    random_policy: RandomPolicy,
}

impl OedReader {
    /// Opens the data and index files.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if either file cannot be opened. The data
    /// file is closed again if the index file fails.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(data_path: P, index_path: Q) -> Result<Self> {
        let data = DataReader::open(data_path)?;
        let index = IndexReader::open(index_path)?;
        info!("Opened OED archive: data {}, index {}", data.path().display(), index.path().display());
        Ok(Self { index, data, random_policy: RandomPolicy::default() })
    }

    /// Opens the files named by a validated configuration.
    pub fn from_config(config: &OedConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::open(&config.data_path, &config.index_path)?.with_random_policy(config.random_policy))
    }

    pub fn with_random_policy(mut self, policy: RandomPolicy) -> Self {
        self.random_policy = policy;
        self
    }

    pub fn random_policy(&self) -> RandomPolicy {
        self.random_policy
    }

    /// Looks up a word and decodes its entry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the index has no usable record for the word,
    /// `Io` when reading either file fails.
    pub fn lookup(&self, word: &str) -> Result<Entry> {
        let offset = self.index.find_offset(word)?;
        self.data.read_entry(offset)
    }

    /// Returns up to `limit` index words starting with `prefix`, in file order.
    pub fn search_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        self.index.find_prefix(prefix, limit)
    }

    /// Decodes the entry picked by the configured [`RandomPolicy`].
    pub fn random_entry(&self) -> Result<Entry> {
        let record = match self.random_policy {
            RandomPolicy::Midpoint => self.index.midpoint_record()?,
            RandomPolicy::Uniform => self.index.uniform_record()?,
        };
        debug!("Random pick {:?} at offset {}", record.word, record.offset);
        self.data.read_entry(record.offset)
    }

    /// Decodes the entry at a known data offset.
    pub fn entry_at(&self, offset: u64) -> Result<Entry> {
        self.data.read_entry(offset)
    }

    /// Reads raw bytes from the data file, at most [`super::MAX_RAW_READ`].
    /// No decoding is applied.
    pub fn read_raw(&self, offset: u64, length: usize) -> Result<Vec<u8>> {
        self.data.read_raw(offset, length)
    }
}
