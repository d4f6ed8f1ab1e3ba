//! Index file reader: word to offset resolution.
//!
//! The index is a UTF-8 text file with one `word<TAB>offset` record per line.
//! It is neither sorted nor deduplicated, so every query is a linear scan in
//! file order and the first matching record wins. Malformed lines are
//! skipped so a corrupt record never blocks lookup of other words.

use std::path::Path;

use log::{debug, trace};
use rand::Rng;

use crate::storage::entry::{normalize_word, IndexRecord};
use crate::storage::shared_file::SharedFile;
use crate::utils::io_utils::read_index_line;
use crate::{OedError, Result};

/// Reader over the plain-text index file.
pub struct IndexReader {
    file: SharedFile,
}

impl IndexReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<IndexReader> {
        Ok(IndexReader { file: SharedFile::open(path)? })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Scans every line from the start of the file, stopping early when
    /// `visit` returns `false`.
    fn scan<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(usize, &str) -> bool,
    {
        self.file.with_reader_at(0, |reader| {
            let mut raw = Vec::new();
            let mut line = String::new();
            let mut line_no = 0usize;
            while read_index_line(reader, &mut raw, &mut line)? {
                line_no += 1;
                if !visit(line_no, line.as_str()) {
                    break;
                }
            }
            Ok(())
        })
    }

    /// Returns the offset of the first record whose word matches `word`
    /// case-insensitively, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no usable record matches, `Io` if the scan fails.
    pub fn find_offset(&self, word: &str) -> Result<u64> {
        let wanted = normalize_word(word);
        let mut found = None;
        self.scan(|line_no, line| {
            if normalize_word(IndexRecord::word_field(line)) != wanted {
                return true;
            }
            match IndexRecord::parse_line(line) {
                Some(record) => {
                    found = Some(record.offset);
                    false
                }
                None => {
                    trace!("Skipping malformed index line {}: {:?}", line_no, line);
                    true
                }
            }
        })?;

        match found {
            Some(offset) => {
                debug!("Index hit for {:?} at offset {}", wanted, offset);
                Ok(offset)
            }
            None => Err(OedError::not_found(word.trim())),
        }
    }

    /// Returns up to `cap` words, in file order and original spelling, whose
    /// normalized form starts with the normalized `prefix`.
    pub fn find_prefix(&self, prefix: &str, cap: usize) -> Result<Vec<String>> {
        let prefix = normalize_word(prefix);
        let mut results = Vec::new();
        if cap == 0 {
            return Ok(results);
        }
        self.scan(|_, line| {
            let word = IndexRecord::word_field(line);
            if !word.is_empty() && normalize_word(word).starts_with(&prefix) {
                results.push(word.to_string());
            }
            results.len() < cap
        })?;
        Ok(results)
    }

    /// Picks the record at the middle of the file: seek to half the byte
    /// length, discard the (possibly partial) line there, take the next one.
    ///
    /// The result is the same on every call for a given index file.
    pub fn midpoint_record(&self) -> Result<IndexRecord> {
        let middle = self.file.len()? / 2;
        let line = self.file.with_reader_at(middle, |reader| {
            let mut raw = Vec::new();
            let mut line = String::new();
            if !read_index_line(reader, &mut raw, &mut line)? {
                return Ok(None);
            }
            if !read_index_line(reader, &mut raw, &mut line)? {
                return Ok(None);
            }
            Ok(Some(line))
        })?;

        line.as_deref()
            .and_then(IndexRecord::parse_line)
            .ok_or_else(|| OedError::general_error("failed to get random entry"))
    }

    /// Picks one usable record uniformly at random.
    pub fn uniform_record(&self) -> Result<IndexRecord> {
        let mut usable = 0usize;
        self.scan(|_, line| {
            if IndexRecord::parse_line(line).is_some() {
                usable += 1;
            }
            true
        })?;
        if usable == 0 {
            return Err(OedError::general_error("failed to get random entry"));
        }

        let target = rand::rng().random_range(0..usable);
        let mut seen = 0usize;
        let mut picked = None;
        self.scan(|_, line| {
            if let Some(record) = IndexRecord::parse_line(line) {
                if seen == target {
                    picked = Some(record);
                    return false;
                }
                seen += 1;
            }
            true
        })?;
        picked.ok_or_else(|| OedError::general_error("failed to get random entry"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(content: &str) -> (tempfile::TempDir, IndexReader) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oed2index");
        std::fs::write(&path, content).unwrap();
        let reader = IndexReader::open(&path).unwrap();
        (dir, reader)
    }

    #[test]
    fn test_find_offset_case_insensitive() -> Result<()> {
        let (_dir, index) = index_with("test\t0\nExample\t184\n");
        for query in ["test", "TEST", "  test  ", "Test"] {
            assert_eq!(index.find_offset(query)?, 0, "query {:?}", query);
        }
        assert_eq!(index.find_offset("example")?, 184);
        Ok(())
    }

    #[test]
    fn test_first_match_wins() -> Result<()> {
        let (_dir, index) = index_with("dup\t10\nother\t20\nDUP\t30\n");
        assert_eq!(index.find_offset("dup")?, 10);
        Ok(())
    }

    #[test]
    fn test_malformed_lines_are_skipped() -> Result<()> {
        let (_dir, index) = index_with("broken\nword\tnot-a-number\nword\t-1\n\nword\t99\r\n");
        assert_eq!(index.find_offset("word")?, 99);
        assert!(index.find_offset("broken").unwrap_err().is_not_found());
        Ok(())
    }

    #[test]
    fn test_not_found() {
        let (_dir, index) = index_with("test\t0\n");
        let err = index.find_offset("zzz_not_a_real_word").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_prefix() -> Result<()> {
        let (_dir, index) = index_with("Apple\t0\nbanana\t1\napricot\t2\nAPEX\t3\navocado\t4\n");
        assert_eq!(index.find_prefix("ap", 10)?, vec!["Apple", "apricot", "APEX"]);
        assert_eq!(index.find_prefix("AP", 2)?, vec!["Apple", "apricot"]);
        assert_eq!(index.find_prefix(" a ", 1)?, vec!["Apple"]);
        assert!(index.find_prefix("ap", 0)?.is_empty());
        assert!(index.find_prefix("zz", 10)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_prefix_results_respect_cap_and_prefix() -> Result<()> {
        let content: String = (0..100).map(|i| format!("word{}\t{}\n", i, i)).collect();
        let (_dir, index) = index_with(&content);
        for cap in [1, 5, 50] {
            let results = index.find_prefix("WORD", cap)?;
            assert_eq!(results.len(), cap);
            assert!(results.iter().all(|w| w.to_lowercase().starts_with("word")));
        }
        Ok(())
    }

    #[test]
    fn test_midpoint_record() -> Result<()> {
        // 4 lines of 8 bytes each; the middle (byte 16) is the start of "ccc",
        // which is discarded as the partial line.
        let (_dir, index) = index_with("aaa\t100\nbbb\t200\nccc\t300\nddd\t400\n");
        let record = index.midpoint_record()?;
        assert_eq!(record, IndexRecord { word: "ddd".to_string(), offset: 400 });
        // Deterministic across calls.
        assert_eq!(index.midpoint_record()?, record);
        Ok(())
    }

    #[test]
    fn test_midpoint_record_without_next_line() {
        let (_dir, index) = index_with("only\t0\n");
        assert!(index.midpoint_record().is_err());
    }

    #[test]
    fn test_uniform_record() -> Result<()> {
        let (_dir, index) = index_with("a\t1\nbad line\nb\t2\n");
        for _ in 0..20 {
            let record = index.uniform_record()?;
            assert!(record.word == "a" || record.word == "b");
        }
        let (_dir, empty) = index_with("no offsets here\n");
        assert!(empty.uniform_record().is_err());
        Ok(())
    }
}
