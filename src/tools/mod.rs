// Tool handlers
//
// Text-in, text-out handlers over an `OedReader`, shared by the command-line
// front end and any embedding service.

pub mod oed_tools;

pub use oed_tools::{parse_format, OedTools, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
