//! Configuration discovery for the archive paths.
//!
//! Paths are resolved field by field from, in order of precedence:
//!
//! 1. The `OED_DATA_PATH` and `OED_INDEX_PATH` environment variables
//! 2. `./oed_config.json`
//! 3. `~/.oed_mcp/config.json`
//! 4. `/etc/oed_mcp/config.json`
//!
//! Discovery stops at the first configuration file that could be read and
//! parsed. A file that exists but is not valid JSON is logged and skipped.
//!
//! # JSON Configuration
//!
//! ```json
//! {
//!     "data_path": "~/oed/oed2",
//!     "index_path": "~/oed/oed2index",
//!     "cache_capacity": 256,
//!     "random_policy": "midpoint"
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use oed::config::OedConfig;
//! use oed::readers::OedReader;
//!
//! # fn main() -> oed::Result<()> {
//! let config = OedConfig::load()?;
//! let reader = OedReader::from_config(&config)?;
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::*;
use serde::{Deserialize, Serialize};
use snafu::{Backtrace, ResultExt};

use crate::error::InvalidConfigSnafu;
use crate::readers::RandomPolicy;
use crate::utils::io_utils::expand_path;
use crate::{OedError, Result};

pub const DATA_PATH_ENV: &str = "OED_DATA_PATH";
pub const INDEX_PATH_ENV: &str = "OED_INDEX_PATH";

pub const LOCAL_CONFIG_FILE: &str = "oed_config.json";
pub const USER_CONFIG_FILE: &str = "~/.oed_mcp/config.json";
pub const SYSTEM_CONFIG_FILE: &str = "/etc/oed_mcp/config.json";

const DEFAULT_CACHE_CAPACITY: usize = 128;

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

/// Resolved configuration for opening an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OedConfig {
    /// Path to the record data file
    #[serde(default)]
    pub data_path: PathBuf,
    /// Path to the plain-text index file
    #[serde(default)]
    pub index_path: PathBuf,
    /// Capacity of the tool layer's entry cache; 0 disables it
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default)]
    pub random_policy: RandomPolicy,
}

impl Default for OedConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::new(),
            index_path: PathBuf::new(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            random_policy: RandomPolicy::default(),
        }
    }
}

/// A configuration file as written on disk: every field optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    data_path: Option<String>,
    index_path: Option<String>,
    cache_capacity: Option<usize>,
    random_policy: Option<RandomPolicy>,
}

impl OedConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(data_path: P, index_path: Q) -> Self {
        Self { data_path: data_path.into(), index_path: index_path.into(), ..Self::default() }
    }

    /// Resolves the configuration from the environment and the standard
    /// configuration file locations, then validates it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationMissing` if either path stays unresolved and
    /// `ResourceUnavailable` if a resolved path does not exist.
    pub fn load() -> Result<Self> {
        let config = Self::discover();
        config.validate()?;
        Ok(config)
    }

    /// Same discovery as [`OedConfig::load`] without validation, so callers
    /// can override fields first.
    pub fn discover() -> Self {
        let candidates = [
            PathBuf::from(LOCAL_CONFIG_FILE),
            expand_path(USER_CONFIG_FILE),
            PathBuf::from(SYSTEM_CONFIG_FILE),
        ];
        Self::resolve(|key| std::env::var(key).ok(), &candidates)
    }

    /// Loads a single configuration file. Relative fields are not resolved.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = Self::read_config_file(path)?;
        let mut config = Self::default();
        config.merge_missing(file);
        Ok(config)
    }

    /// Resolution without validation. `env` looks up an environment
    /// variable; `candidates` are tried in order until one parses.
    pub fn resolve<F>(env: F, candidates: &[PathBuf]) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(path) = env(DATA_PATH_ENV).filter(|p| !p.is_empty()) {
            config.data_path = expand_path(&path);
        }
        if let Some(path) = env(INDEX_PATH_ENV).filter(|p| !p.is_empty()) {
            config.index_path = expand_path(&path);
        }

        for candidate in candidates {
            match Self::read_config_file(candidate) {
                Ok(file) => {
                    debug!("Using config file {}", candidate.display());
                    config.merge_missing(file);
                    break;
                }
                Err(OedError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                    trace!("No config file at {}", candidate.display());
                }
                Err(e) => warn!("Skipping config file {}: {}", candidate.display(), e),
            }
        }
        config
    }

    fn read_config_file(path: &Path) -> Result<ConfigFile> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).context(InvalidConfigSnafu { path: path.to_path_buf() })
    }

    /// Fills fields not set yet from a configuration file.
    fn merge_missing(&mut self, file: ConfigFile) {
        if self.data_path.as_os_str().is_empty() {
            if let Some(path) = file.data_path.filter(|p| !p.is_empty()) {
                self.data_path = expand_path(&path);
            }
        }
        if self.index_path.as_os_str().is_empty() {
            if let Some(path) = file.index_path.filter(|p| !p.is_empty()) {
                self.index_path = expand_path(&path);
            }
        }
        if let Some(capacity) = file.cache_capacity {
            self.cache_capacity = capacity;
        }
        if let Some(policy) = file.random_policy {
            self.random_policy = policy;
        }
    }

    fn has_paths(&self) -> bool {
        !self.data_path.as_os_str().is_empty() && !self.index_path.as_os_str().is_empty()
    }

    /// Checks that both paths are set and exist.
    pub fn validate(&self) -> Result<()> {
        if !self.has_paths() {
            return Err(OedError::configuration_missing(format!(
                "OED data paths not configured. Set {} and {} or create a config file",
                DATA_PATH_ENV, INDEX_PATH_ENV
            )));
        }
        for path in [&self.data_path, &self.index_path] {
            if !path.exists() {
                return Err(OedError::ResourceUnavailable {
                    path: path.clone(),
                    source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
                    backtrace: Backtrace::capture(),
                });
            }
        }
        Ok(())
    }
}
