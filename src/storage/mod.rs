// Storage structures and record decoding
//
// This module defines the entry and index record types, the byte-level
// record decoder, the headword/etymology extractor, and the mutex-guarded
// file handle shared by the readers.

pub mod entry;
pub mod entry_extractor;
pub mod record_decoder;
pub mod shared_file;

pub use entry::{normalize_word, Entry, IndexRecord};
pub use entry_extractor::{extract, ExtractedFields};
pub use record_decoder::{decode_record, RECORD_WINDOW_SIZE};
pub use shared_file::SharedFile;
