//! Error types for this crate.
//!
//! One exhaustive, strongly-typed enum per the error taxonomy: construction-time
//! errors are fatal, per-k-mer errors are recovered locally by the ingestion loop.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur anywhere in the sketching pipeline.
#[derive(Debug, Error)]
pub enum SketchError {
    /// Character outside {A,C,G,T} encountered where an encoded base was required.
    #[error("invalid base '{0}'")]
    InvalidBase(char),

    /// A 2-bit slot held a value outside {0..3}; indicates corruption.
    #[error("invalid 2-bit code {0}")]
    InvalidCode(u8),

    /// Sequence access beyond stored length.
    #[error("index {0} out of range")]
    OutOfRange(usize),

    /// Could not open, read, or enumerate a file.
    #[error("I/O failure on '{path}': {source}")]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input directory contained no matching FASTA file.
    #[error("no matching .fa/.fna/.fasta files found")]
    NoInputs,

    /// A construction-time parameter was invalid (k, d, w, or phi).
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// JSON serialization of a report failed.
    #[error("failed to serialize JSON: {source}")]
    JsonError {
        #[source]
        source: serde_json::Error,
    },

    /// Writing CSV/JSON output failed.
    #[error("failed to write output: {source}")]
    WriteError {
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for SketchError {
    fn from(source: serde_json::Error) -> Self {
        SketchError::JsonError { source }
    }
}

pub type Result<T> = std::result::Result<T, SketchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_base_display() {
        let err = SketchError::InvalidBase('N');
        assert_eq!(err.to_string(), "invalid base 'N'");
    }

    #[test]
    fn invalid_parameter_display() {
        let err = SketchError::InvalidParameter("phi");
        assert_eq!(err.to_string(), "invalid parameter: phi");
    }

    #[test]
    fn io_failure_display_includes_path() {
        let err = SketchError::IoFailure {
            path: PathBuf::from("genomes/a.fa"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("genomes/a.fa"));
    }
}
