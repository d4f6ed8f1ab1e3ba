// Readers for the OED archive files
//
// This module provides the index and data file readers and the `OedReader`
// engine that combines them.

pub mod data_reader;
pub mod index_reader;
pub mod oed_reader;

pub use data_reader::{DataReader, MAX_RAW_READ};
pub use index_reader::IndexReader;
pub use oed_reader::{OedReader, RandomPolicy};
