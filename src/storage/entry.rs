//! Entry and index record structures.
//!
//! This module provides the data model shared by the readers and renderers:
//! - [`IndexRecord`]: One parsed line of the plain-text index
//! - [`Entry`]: One decoded dictionary record
//! - [`normalize_word`]: The comparison key used for every index lookup
//!
//! # Examples
//!
//! ```
//! use oed::storage::IndexRecord;
//!
//! let record = IndexRecord::parse_line("Test\t184\textra").unwrap();
//! assert_eq!(record.word, "Test");
//! assert_eq!(record.offset, 184);
//! ```

use serde::{Deserialize, Serialize};

/// Field separator used by the index file.
pub const INDEX_FIELD_SEPARATOR: char = '\t';

/// Normalizes a word for index comparison: surrounding whitespace trimmed, lowercased.
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// One record of the index file: a headword and the byte offset of its record
/// in the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// The word exactly as spelled in the index
    pub word: String,
    /// Byte offset into the data file
    pub offset: u64,
}

impl IndexRecord {
    /// Parses one index line.
    ///
    /// Field 0 is the word, field 1 the decimal offset, further fields are
    /// ignored. Returns `None` for lines without an offset field or whose
    /// offset is not a non-negative integer.
    pub fn parse_line(line: &str) -> Option<IndexRecord> {
        let mut fields = line.split(INDEX_FIELD_SEPARATOR);
        let word = fields.next()?;
        let offset = fields.next()?.trim().parse::<u64>().ok()?;
        Some(IndexRecord { word: word.to_string(), offset })
    }

    /// Returns the word field of a line without validating the offset.
    pub fn word_field(line: &str) -> &str {
        line.split(INDEX_FIELD_SEPARATOR).next().unwrap_or_default()
    }
}

/// A dictionary entry decoded from the data file.
///
/// Entries are produced fresh for every lookup and owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Headword extracted from the record
    pub word: String,
    /// Decoded record text, legacy tags still embedded
    pub definition: String,
    /// Normalized etymology, empty when the record has none
    pub etymology: String,
    /// Byte offset of the record in the data file
    pub offset: u64,
    /// Number of bytes read into the decode window
    pub length: u32,
}
