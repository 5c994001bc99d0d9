//! Error types for the skeleton record parser.
//!
//! Every failure while decoding a clip, whether in its filename or its
//! contents, is a [`RecordError`]. Errors raised from file contents carry the
//! path and the 1-based line number of the offending line so the bad record
//! can be located directly.
//!
//! # Example
//!
//! ```rust
//! use ntu_skeleton_core::error::RecordError;
//!
//! let err = RecordError::malformed("S001C001P001R001A024.skeleton", 7, "expected joint count");
//! assert_eq!(err.line(), Some(7));
//! assert!(err.to_string().contains("line 7"));
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A specialized `Result` type for record parsing.
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors produced while decoding a clip file or its filename.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RecordError {
    /// The file contents disagree with their own declared counts, or a
    /// field cannot be parsed.
    #[error("Malformed record in `{}` at line {line}: {reason}", .path.display())]
    MalformedRecord {
        /// Path of the offending file.
        path: PathBuf,
        /// 1-based line number of the offending line.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// The filename does not follow the `SsssCcccPpppRrrrAaaa` convention.
    #[error("Invalid clip filename `{name}`: {reason}")]
    InvalidFilename {
        /// The filename (or stem) that failed to decode.
        name: String,
        /// Description of the problem.
        reason: String,
    },

    /// The file could not be read.
    #[error("I/O error reading `{}`: {source}", .path.display())]
    Io {
        /// Path being read when the error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl RecordError {
    /// Creates a new malformed-record error.
    #[must_use]
    pub fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Creates a new invalid-filename error.
    #[must_use]
    pub fn invalid_filename(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFilename {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new I/O error.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Line number of the offending record, when the error came from file
    /// contents.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedRecord { line, .. } => Some(*line),
            Self::InvalidFilename { .. } | Self::Io { .. } => None,
        }
    }

    /// Path of the offending file, when known.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::MalformedRecord { path, .. } | Self::Io { path, .. } => Some(path),
            Self::InvalidFilename { .. } => None,
        }
    }
}
