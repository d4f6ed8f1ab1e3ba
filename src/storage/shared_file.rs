//! Seekable file handle shared between concurrent operations.
//!
//! Every operation on an archive file is a seek followed by a read or scan.
//! [`SharedFile`] owns the handle behind a mutex and only hands it out for
//! the duration of a closure, so a seek and its paired read can never
//! interleave with another operation's.

use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::utils::io_utils::{open_readable_file, read_up_to};
use crate::Result;

/// An open, read-only archive file guarded by a mutex.
pub struct SharedFile {
    path: PathBuf,
    reader: Mutex<BufReader<File>>,
}

impl SharedFile {
    /// Opens the file, failing with `ResourceUnavailable` if it cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<SharedFile> {
        let path = path.as_ref().to_path_buf();
        let file = open_readable_file(&path)?;
        Ok(SharedFile { path, reader: Mutex::new(BufReader::new(file)) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current length of the file in bytes.
    pub fn len(&self) -> Result<u64> {
        let reader = self.reader.lock();
        Ok(reader.get_ref().metadata()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Runs `f` with exclusive access to the reader, positioned at `offset`.
    ///
    /// The cursor position left behind by `f` is irrelevant: every access
    /// seeks first.
    pub fn with_reader_at<T, F>(&self, offset: u64, f: F) -> Result<T>
    where
        F: FnOnce(&mut BufReader<File>) -> Result<T>,
    {
        let mut reader = self.reader.lock();
        reader.seek(SeekFrom::Start(offset))?;
        f(&mut *reader)
    }

    /// Reads up to `len` bytes starting at `offset`. End of file is not an
    /// error; the returned buffer is simply shorter.
    pub fn read_at(&self, offset: u64, len: usize) -> Result<Vec<u8>> {
        self.with_reader_at(offset, |reader| read_up_to(reader, len))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    fn write_fixture(content: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.bin");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_read_at() -> Result<()> {
        let (_dir, path) = write_fixture(b"0123456789");
        let file = SharedFile::open(&path)?;
        assert_eq!(file.len()?, 10);
        assert!(!file.is_empty()?);
        assert_eq!(file.read_at(2, 3)?, b"234");
        // Short read at end of file.
        assert_eq!(file.read_at(8, 100)?, b"89");
        assert_eq!(file.read_at(50, 4)?, b"");
        Ok(())
    }

    #[test]
    fn test_each_access_seeks() -> Result<()> {
        let (_dir, path) = write_fixture(b"abcdef");
        let file = SharedFile::open(&path)?;
        let first = file.with_reader_at(0, |reader| {
            let mut buf = [0u8; 4];
            reader.read_exact(&mut buf)?;
            Ok(buf)
        })?;
        assert_eq!(&first, b"abcd");
        // The previous cursor position must not leak into the next access.
        assert_eq!(file.read_at(0, 2)?, b"ab");
        Ok(())
    }

    #[test]
    fn test_open_missing_file() {
        let result = SharedFile::open("/nonexistent/oed2");
        assert!(matches!(result, Err(crate::OedError::ResourceUnavailable { .. })));
    }

    #[test]
    fn test_concurrent_reads_do_not_interleave() -> Result<()> {
        let content: Vec<u8> = (0..64u8).collect();
        let (_dir, path) = write_fixture(&content);
        let file = std::sync::Arc::new(SharedFile::open(&path)?);

        let handles: Vec<_> = (0..8u64)
            .map(|i| {
                let file = file.clone();
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let bytes = file.read_at(i * 8, 8).unwrap();
                        let expected: Vec<u8> = (i as u8 * 8..i as u8 * 8 + 8).collect();
                        assert_eq!(bytes, expected);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        Ok(())
    }
}
