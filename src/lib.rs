//! # OED - Read-only access to an OED2 dictionary archive
//!
//! This crate reads a locally held OED2 archive: a data file of
//! `0x00`-terminated entry records and a plain-text index mapping headwords
//! to byte offsets in that data file.
//!
//! ## Features
//!
//! - **Word lookup**: Case-insensitive lookup through the index
//! - **Prefix search**: List index words starting with a prefix
//! - **Entry decoding**: Turn raw record bytes into clean text and pull out
//!   the headword and etymology
//! - **Rendering**: Present entries as full, clean, brief or raw text
//! - **Configuration discovery**: Environment variables and JSON config files
//!
//! ## Quick Start
//!
//! ```no_run
//! use oed::readers::OedReader;
//! use oed::render::{render, RenderFormat};
//!
//! # fn main() -> oed::Result<()> {
//! let reader = OedReader::open("/path/to/oed2", "/path/to/oed2index")?;
//!
//! let entry = reader.lookup("serendipity")?;
//! println!("{}", render(&entry, RenderFormat::Brief, false));
//!
//! for word in reader.search_prefix("seren", 10)? {
//!     println!("{}", word);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Readers**: [`readers`] for the index, the data file, and the combined engine
//! - **Storage & core types**: [`storage`] for entries, record decoding and field extraction
//! - **Rendering**: [`render`] for the output presentations
//! - **Configuration**: [`config`] for locating the archive files
//! - **Tools**: [`tools`] for parameter-validated text handlers
//! - **Utilities**: [`utils`] for entity normalization and I/O helpers
//!
//! ## Error Handling
//!
//! All fallible operations return a [`Result<T>`] type, where errors are represented by
//! [`OedError`]. The crate uses the `snafu` library for error handling with
//! context and backtraces.
//!
//! ```
//! use oed::{OedError, Result};
//!
//! fn example() -> Result<String> {
//!     Err(OedError::not_found("zzz"))
//! }
//!
//! assert!(example().unwrap_err().is_not_found());
//! ```

pub mod config;
pub mod error;
pub mod readers;
pub mod render;
pub mod storage;
pub mod tools;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::OedConfig;
pub use readers::{OedReader, RandomPolicy};
pub use render::{render, RenderFormat};
pub use storage::Entry;
pub use tools::OedTools;

// Re-export error types for convenience
pub use error::{OedError, Result, snafu};
