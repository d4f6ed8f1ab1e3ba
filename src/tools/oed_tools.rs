//! Tool handlers over an open OED archive.
//!
//! Each handler takes plain parameters, validates them, and returns the text
//! a caller shows to the user. A lookup miss is an ordinary result text, not
//! an error; errors are reserved for bad parameters and I/O failures.
//!
//! Decoded entries are kept in an LRU cache keyed by the normalized word.

use std::num::NonZeroUsize;

use log::*;
use lru::LruCache;
use parking_lot::Mutex;

use crate::config::OedConfig;
use crate::readers::OedReader;
use crate::render::{render, RenderFormat};
use crate::storage::entry::{normalize_word, Entry};
use crate::utils::text_normalizer::strip_all_tags;
use crate::{OedError, Result};

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const MAX_SEARCH_LIMIT: usize = 50;

/// Parses an output format name, falling back to [`RenderFormat::Clean`]
/// for anything unrecognized.
pub fn parse_format(name: &str) -> RenderFormat {
    match name.parse::<RenderFormat>() {
        Ok(format) => format,
        Err(_) => {
            warn!("Unknown output format {:?}, using {}", name, RenderFormat::Clean);
            RenderFormat::Clean
        }
    }
}

fn not_found_text(word: &str) -> String {
    format!("Word '{}' not found in the OED.", word)
}

/// Handlers for lookup, search, etymology, random and multi-word requests.
pub struct OedTools {
    reader: OedReader,
    cache: Option<Mutex<LruCache<String, Entry>>>,
}

impl OedTools {
    /// Wraps a reader. A `cache_capacity` of 0 disables the entry cache.
    pub fn new(reader: OedReader, cache_capacity: usize) -> Self {
        let cache = NonZeroUsize::new(cache_capacity).map(|cap| Mutex::new(LruCache::new(cap)));
        Self { reader, cache }
    }

    pub fn from_config(config: &OedConfig) -> Result<Self> {
        Ok(Self::new(OedReader::from_config(config)?, config.cache_capacity))
    }

    pub fn reader(&self) -> &OedReader {
        &self.reader
    }

    /// Looks up a word, serving repeated lookups from the cache.
    fn lookup_entry(&self, word: &str) -> Result<Entry> {
        let Some(cache) = &self.cache else {
            return self.reader.lookup(word);
        };

        let key = normalize_word(word);
        if let Some(entry) = cache.lock().get(&key) {
            trace!("Cache hit for {:?}", key);
            return Ok(entry.clone());
        }

        let entry = self.reader.lookup(word)?;
        cache.lock().put(key, entry.clone());
        Ok(entry)
    }

    /// `Ok(None)` on a miss; other failures propagate.
    fn find_entry(&self, word: &str) -> Result<Option<Entry>> {
        match self.lookup_entry(word) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Looks up a word and renders it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `word` is empty.
    pub fn lookup(&self, word: &str, format: RenderFormat, include_etymology: bool) -> Result<String> {
        if word.is_empty() {
            return Err(OedError::invalid_parameter("word parameter is required"));
        }
        Ok(match self.find_entry(word)? {
            Some(entry) => render(&entry, format, include_etymology),
            None => not_found_text(word),
        })
    }

    /// Lists index words starting with `prefix`. `limit` defaults to
    /// [`DEFAULT_SEARCH_LIMIT`] and is clamped to `1..=MAX_SEARCH_LIMIT`.
    pub fn search(&self, prefix: &str, limit: Option<usize>) -> Result<String> {
        if prefix.is_empty() {
            return Err(OedError::invalid_parameter("prefix parameter is required"));
        }
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT).clamp(1, MAX_SEARCH_LIMIT);

        let words = self.reader.search_prefix(prefix, limit)?;
        if words.is_empty() {
            return Ok(format!("No words found starting with '{}'", prefix));
        }

        let mut result = format!("OED entries starting with '{}':\n", prefix);
        for (i, word) in words.iter().enumerate() {
            result.push_str(&format!("{}. {}\n", i + 1, word));
        }
        Ok(result)
    }

    /// Returns the etymology of a word, with tags stripped when `clean`.
    pub fn etymology(&self, word: &str, clean: bool) -> Result<String> {
        if word.is_empty() {
            return Err(OedError::invalid_parameter("word parameter is required"));
        }
        let Some(entry) = self.find_entry(word)? else {
            return Ok(not_found_text(word));
        };
        if entry.etymology.is_empty() {
            return Ok(format!("No etymology information found for '{}'", word));
        }

        let etymology = if clean { strip_all_tags(&entry.etymology) } else { entry.etymology };
        Ok(format!("Etymology of '{}':\n{}", word, etymology))
    }

    /// Renders the entry picked by the reader's random policy.
    pub fn random(&self, format: RenderFormat, include_etymology: bool) -> Result<String> {
        let entry = self.reader.random_entry().map_err(|e| {
            error!("Random entry failed: {}", e);
            match e {
                OedError::GeneralError { .. } => e,
                other => OedError::general_error(format!("failed to get random entry: {}", other)),
            }
        })?;
        Ok(render(&entry, format, include_etymology))
    }

    /// Looks up a comma-separated list of words. Hits are rendered brief
    /// without etymology, misses as `<word>: Not found`. A word whose lookup
    /// fails gets a `<word>: lookup failed: <error>` line and the remaining
    /// words are still looked up.
    pub fn multi_lookup(&self, words: &str) -> Result<String> {
        let words: Vec<&str> = words.split(',').map(str::trim).filter(|w| !w.is_empty()).collect();
        if words.is_empty() {
            return Err(OedError::invalid_parameter("words parameter is required"));
        }

        let mut results = Vec::with_capacity(words.len());
        for word in words {
            match self.find_entry(word) {
                Ok(Some(entry)) => results.push(render(&entry, RenderFormat::Brief, false)),
                Ok(None) => results.push(format!("{}: Not found", word)),
                Err(e) => {
                    warn!("Lookup of {:?} failed: {}", word, e);
                    results.push(format!("{}: lookup failed: {}", word, e));
                }
            }
        }
        Ok(results.join("\n\n"))
    }

    /// Reads raw data file bytes. `length` is capped at
    /// [`MAX_RAW_READ`](crate::readers::MAX_RAW_READ).
    pub fn read_raw(&self, offset: u64, length: usize) -> Result<Vec<u8>> {
        self.reader.read_raw(offset, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::MAX_RAW_READ;

    const TEST_RECORD: &str = "<e><hg><hw>test</hw> <pr><ph>tEst</ph></pr></hg>. <etym>f. <i>Latin</i> testum earthen pot</etym> <s4>A procedure for critical evaluation; a means of determining the presence, quality, or truth of something.</s4></e>";
    const BARE_RECORD: &str = "<e><hg><hw>bare</hw></hg> <s4>Without covering.</s4></e>";

    fn mock_tools(cache_capacity: usize) -> (tempfile::TempDir, OedTools) {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("oed2");
        let index_path = dir.path().join("oed2index");

        let mut data = TEST_RECORD.as_bytes().to_vec();
        data.push(0);
        let bare_offset = data.len();
        data.extend_from_slice(BARE_RECORD.as_bytes());
        data.push(0);
        std::fs::write(&data_path, &data).unwrap();
        std::fs::write(&index_path, format!("test\t0\ntesting\t0\nbare\t{}\n", bare_offset)).unwrap();

        let config = OedConfig { cache_capacity, ..OedConfig::new(&data_path, &index_path) };
        let tools = OedTools::from_config(&config).unwrap();
        (dir, tools)
    }

    #[test]
    fn test_parse_format() {
        let test_cases = [
            ("full", RenderFormat::Full),
            ("BRIEF", RenderFormat::Brief),
            ("raw", RenderFormat::Raw),
            ("clean", RenderFormat::Clean),
            ("markdown", RenderFormat::Clean),
            ("", RenderFormat::Clean),
        ];
        for (input, expected) in test_cases {
            assert_eq!(parse_format(input), expected, "format {:?}", input);
        }
    }

    #[test]
    fn test_lookup() -> Result<()> {
        let (_dir, tools) = mock_tools(4);
        let text = tools.lookup("test", RenderFormat::Clean, true)?;
        assert!(text.starts_with("OED Entry: test\n"));
        assert!(text.contains("Pronunciation: tEst"));
        assert!(text.contains("Etymology: f. Latin testum earthen pot"));

        let text = tools.lookup("nonexistent", RenderFormat::Clean, true)?;
        assert_eq!(text, "Word 'nonexistent' not found in the OED.");

        let err = tools.lookup("", RenderFormat::Clean, true).unwrap_err();
        assert!(matches!(err, OedError::InvalidParameter { .. }));
        Ok(())
    }

    #[test]
    fn test_lookup_cached_and_uncached_agree() -> Result<()> {
        let (_dir, cached) = mock_tools(2);
        let (_dir2, uncached) = mock_tools(0);
        for word in ["test", "TEST", "bare", "test", "missing"] {
            for format in RenderFormat::ALL {
                assert_eq!(cached.lookup(word, format, true)?, uncached.lookup(word, format, true)?);
            }
        }
        Ok(())
    }

    #[test]
    fn test_search() -> Result<()> {
        let (_dir, tools) = mock_tools(0);
        assert_eq!(tools.search("te", None)?, "OED entries starting with 'te':\n1. test\n2. testing\n");
        assert_eq!(tools.search("te", Some(0))?, "OED entries starting with 'te':\n1. test\n");
        assert_eq!(tools.search("zz", Some(500))?, "No words found starting with 'zz'");
        assert!(matches!(tools.search("", None), Err(OedError::InvalidParameter { .. })));
        Ok(())
    }

    #[test]
    fn test_etymology() -> Result<()> {
        let (_dir, tools) = mock_tools(0);
        assert_eq!(tools.etymology("test", true)?, "Etymology of 'test':\nf. Latin testum earthen pot");
        assert_eq!(tools.etymology("test", false)?, "Etymology of 'test':\nf. <i>Latin</i> testum earthen pot");
        assert_eq!(tools.etymology("bare", true)?, "No etymology information found for 'bare'");
        assert_eq!(tools.etymology("zzz", true)?, "Word 'zzz' not found in the OED.");
        Ok(())
    }

    #[test]
    fn test_random() -> Result<()> {
        let (_dir, tools) = mock_tools(0);
        let first = tools.random(RenderFormat::Brief, false)?;
        assert_eq!(tools.random(RenderFormat::Brief, false)?, first);
        Ok(())
    }

    #[test]
    fn test_multi_lookup() -> Result<()> {
        let (_dir, tools) = mock_tools(4);
        let text = tools.multi_lookup(" bare , nope,, test")?;
        let parts: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "bare: Without covering.");
        assert_eq!(parts[1], "nope: Not found");
        assert!(parts[2].starts_with("test: A procedure"));
        assert!(!text.contains("Etymology"));

        assert!(matches!(tools.multi_lookup(" , "), Err(OedError::InvalidParameter { .. })));
        Ok(())
    }

    /// Adds an index record whose offset cannot be seeked to.
    fn tools_with_unreadable_word(cache_capacity: usize) -> (tempfile::TempDir, OedTools) {
        let (dir, _) = mock_tools(0);
        let data_path = dir.path().join("oed2");
        let index_path = dir.path().join("oed2index");
        let mut index = std::fs::read_to_string(&index_path).unwrap();
        index.push_str(&format!("huge\t{}\n", u64::MAX));
        std::fs::write(&index_path, index).unwrap();

        let tools = OedTools::new(OedReader::open(&data_path, &index_path).unwrap(), cache_capacity);
        (dir, tools)
    }

    #[test]
    fn test_lookup_io_failure_is_an_error() -> Result<()> {
        for capacity in [0, 4] {
            let (_dir, tools) = tools_with_unreadable_word(capacity);
            let err = tools.lookup("huge", RenderFormat::Clean, true).unwrap_err();
            assert!(matches!(err, OedError::Io { .. }), "unexpected error: {:?}", err);
            assert!(matches!(tools.etymology("huge", true), Err(OedError::Io { .. })));

            assert!(tools.lookup("test", RenderFormat::Brief, false)?.starts_with("test: "));
            assert!(tools.lookup("huge", RenderFormat::Clean, true).is_err());
        }
        Ok(())
    }

    #[test]
    fn test_multi_lookup_continues_after_io_failure() -> Result<()> {
        let (_dir, tools) = tools_with_unreadable_word(4);
        let text = tools.multi_lookup("test,huge,bare,nope")?;
        let parts: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(parts.len(), 4);
        assert!(parts[0].starts_with("test: A procedure"));
        assert!(parts[1].starts_with("huge: lookup failed: IO error"));
        assert_eq!(parts[2], "bare: Without covering.");
        assert_eq!(parts[3], "nope: Not found");
        Ok(())
    }

    #[test]
    fn test_read_raw() -> Result<()> {
        let (_dir, tools) = mock_tools(0);
        assert_eq!(tools.read_raw(0, 3)?, b"<e>");
        let all = tools.read_raw(0, usize::MAX)?;
        assert!(all.len() <= MAX_RAW_READ);
        assert!(all.contains(&0));
        Ok(())
    }
}
