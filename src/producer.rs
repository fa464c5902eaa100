//! C3: the k-mer stream producer. Walks a directory of FASTA-like files and
//! emits fixed-length windows over each file's concatenated sequence.
//!
//! Header lines (`>`-prefixed) are stripped and do not interrupt
//! concatenation *within* a file — a k-mer window may span two records of
//! the same file. Windows never span two different files: each file's
//! cursor starts fresh at position 0, so concatenated sequence from one
//! file never bridges into the next.

use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::error::{Result, SketchError};

const RECOGNIZED_EXTENSIONS: [&str; 3] = ["fa", "fna", "fasta"];

/// Walks a directory (non-recursively) for recognized FASTA-like files and
/// emits k-mer windows from their concatenated, header-stripped sequences.
pub struct KmerProducer {
    files: Vec<PathBuf>,
    current_file: usize,
    sequence: String,
    cursor: usize,
}

impl KmerProducer {
    /// Scans `dir` for `.fa`/`.fna`/`.fasta` files. Errors with `NoInputs`
    /// if none are found, or `IoFailure` if the directory cannot be read.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| SketchError::IoFailure {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SketchError::IoFailure {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let matches_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| RECOGNIZED_EXTENSIONS.contains(&ext));
            if matches_extension {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(SketchError::NoInputs);
        }

        let mut producer = KmerProducer {
            files,
            current_file: 0,
            sequence: String::new(),
            cursor: 0,
        };
        producer.load_current_file()?;
        Ok(producer)
    }

    fn load_current_file(&mut self) -> Result<()> {
        let path = &self.files[self.current_file];
        let contents = fs::read_to_string(path).map_err(|source| SketchError::IoFailure {
            path: path.clone(),
            source,
        })?;
        self.sequence = contents
            .lines()
            .filter(|line| !line.starts_with('>'))
            .collect::<Vec<_>>()
            .join("");
        self.cursor = 0;
        Ok(())
    }

    /// Resets the emission cursor to position 0 of the currently loaded file.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Advances to the next file, reloading its sequence and resetting the
    /// cursor. Returns `false` if there are no more files.
    fn advance_file(&mut self) -> Result<bool> {
        if self.current_file + 1 >= self.files.len() {
            return Ok(false);
        }
        self.current_file += 1;
        self.load_current_file()?;
        Ok(true)
    }

    /// True iff another k-mer window of length `k` is available, either in
    /// the current file or in a later one.
    pub fn has_more(&self, k: usize) -> bool {
        if self.cursor + k <= self.sequence.len() {
            return true;
        }
        self.current_file + 1 < self.files.len()
    }

    /// Emits the next k-length window and advances the cursor by one.
    /// Automatically advances to the next file when the current one is
    /// exhausted. Returns `None` (end-of-stream sentinel) once no files
    /// remain.
    pub fn next_kmer(&mut self, k: usize) -> Result<Option<Bytes>> {
        if k == 0 {
            return Err(SketchError::InvalidParameter("k"));
        }

        loop {
            if self.cursor + k <= self.sequence.len() {
                let window = &self.sequence.as_bytes()[self.cursor..self.cursor + k];
                let bytes = Bytes::copy_from_slice(window);
                self.cursor += 1;
                return Ok(Some(bytes));
            }

            if !self.advance_file()? {
                return Ok(None);
            }
        }
    }
}
