// Utility functions and helpers
//
// This module provides text normalization for archive markup and the file
// helpers used by the readers and the configuration loader.

pub mod io_utils;
pub mod text_normalizer;

pub use io_utils::{expand_path, open_readable_file, read_up_to};
pub use text_normalizer::{decode_xml_entities, normalize, strip_all_tags, strip_tags_preserving_lines};
