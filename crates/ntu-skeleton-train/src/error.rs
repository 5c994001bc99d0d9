//! Error types for the dataset builder.
//!
//! This module is the single source of truth for all error types in the
//! builder crate. Record-level failures come from
//! [`ntu_skeleton_core::RecordError`] and are wrapped rather than re-declared.
//!
//! ## Hierarchy
//!
//! ```text
//! TrainError (top-level)
//! ├── ConfigError      (config validation / file loading / directory layout)
//! └── DatasetError     (record parsing, indexing, padding, export)
//!     └── RecordError  (from ntu-skeleton-core)
//! ```

use ntu_skeleton_core::RecordError;
use std::path::PathBuf;
use thiserror::Error;

// ---------------------------------------------------------------------------
// TrainResult
// ---------------------------------------------------------------------------

/// Convenient `Result` alias used by orchestration-level functions.
pub type TrainResult<T> = Result<T, TrainError>;

// ---------------------------------------------------------------------------
// TrainError
// ---------------------------------------------------------------------------

/// Top-level error type for the dataset builder.
///
/// Lower-level functions in [`crate::config`] and [`crate::dataset`] return
/// their own module-specific error types which are automatically coerced into
/// `TrainError` via [`From`].
#[derive(Debug, Error)]
pub enum TrainError {
    /// A configuration validation or loading error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A dataset construction or access error.
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// The built dataset holds no items.
    #[error("Dataset is empty")]
    EmptyDataset,
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors produced when loading or validating a [`DatasetConfig`].
///
/// [`DatasetConfig`]: crate::config::DatasetConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field has an invalid value.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Name of the field.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// The split scheme name is not recognised.
    #[error("Unknown split scheme `{name}` (expected `cross_subject` or `cross_setup`)")]
    UnknownSplit {
        /// The name that was given.
        name: String,
    },

    /// A configuration file could not be read or written.
    #[error("Cannot access config file `{}`: {source}", .path.display())]
    FileRead {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file contains malformed JSON.
    #[error("Cannot parse config file `{}`: {source}", .path.display())]
    ParseError {
        /// Path that was being parsed.
        path: PathBuf,
        /// Underlying JSON parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A required directory does not exist.
    #[error("Path `{}` does not exist", .path.display())]
    PathNotFound {
        /// The missing path.
        path: PathBuf,
    },
}

impl ConfigError {
    /// Construct a [`ConfigError::InvalidValue`].
    pub fn invalid_value<S: Into<String>>(field: &'static str, reason: S) -> Self {
        ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// Construct a [`ConfigError::PathNotFound`].
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::PathNotFound { path: path.into() }
    }
}

// ---------------------------------------------------------------------------
// DatasetError
// ---------------------------------------------------------------------------

/// Errors produced while building or accessing a dataset.
///
/// A malformed clip aborts the whole construction: normalization needs the
/// complete collection, so there is no partial fallback.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A clip file or its name could not be decoded.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The configuration is invalid or the directory layout is wrong.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Requested index is outside the valid range.
    #[error("Index {idx} out of range (dataset has {len} items)")]
    IndexOutOfRange {
        /// The requested index.
        idx: usize,
        /// Total number of items.
        len: usize,
    },

    /// A body sequence is longer than the eval padding length.
    #[error("Sequence of {len} frames exceeds the padding length {max_len}")]
    SequenceTooLong {
        /// Frame count of the sequence.
        len: usize,
        /// Configured padding length.
        max_len: usize,
    },

    /// The assembled buffer does not match the expected array shape.
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// A directory could not be listed.
    #[error("I/O error reading `{}`: {source}", .path.display())]
    Io {
        /// Path being read when the error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An array could not be written to disk.
    #[error("Cannot export `{}`: {message}", .path.display())]
    Export {
        /// Destination path.
        path: PathBuf,
        /// Error description.
        message: String,
    },
}

impl DatasetError {
    /// Construct a [`DatasetError::Io`].
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.into(),
            source,
        }
    }

    /// Construct a [`DatasetError::Export`].
    pub fn export<S: Into<String>>(path: impl Into<PathBuf>, msg: S) -> Self {
        DatasetError::Export {
            path: path.into(),
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_to_train_error() {
        let err: TrainError = ConfigError::invalid_value("seq_len", "must be > 0").into();
        assert!(matches!(err, TrainError::Config(_)));
        assert!(err.to_string().contains("seq_len"));
    }

    #[test]
    fn record_error_is_transparent() {
        let err: DatasetError = RecordError::malformed("a.skeleton", 4, "bad count").into();
        let msg = err.to_string();
        assert!(msg.contains("a.skeleton"));
        assert!(msg.contains("line 4"));
    }

    #[test]
    fn index_error_display() {
        let err = DatasetError::IndexOutOfRange { idx: 9, len: 3 };
        assert_eq!(err.to_string(), "Index 9 out of range (dataset has 3 items)");
    }
}
