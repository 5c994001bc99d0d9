//! Dataset construction configuration.
//!
//! [`DatasetConfig`] is the single source of truth for every parameter the
//! builder consults: where the clips live, how they are windowed or padded,
//! and which subjects and actions are admitted. It is serializable via
//! [`serde`] so a run can be stored to / restored from JSON.
//!
//! # Example
//!
//! ```rust
//! use ntu_skeleton_train::config::DatasetConfig;
//!
//! let cfg = DatasetConfig::default();
//! cfg.validate().expect("default config is valid");
//!
//! assert_eq!(cfg.max_len, 500);
//! assert_eq!(cfg.labels, vec![1, 24, 27]);
//! ```

use ntu_skeleton_core::{NUM_JOINTS, SKELETON_SUBDIR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::filter::DEFAULT_ACTION_LABELS;
use crate::split::{SplitScheme, SubjectSplit, CROSS_SUBJECT_TRAINING_IDS};

/// Default eval padding length in frames.
pub const DEFAULT_MAX_LEN: usize = 500;

// ---------------------------------------------------------------------------
// DatasetConfig
// ---------------------------------------------------------------------------

/// Complete configuration for building a skeleton dataset.
///
/// Use [`DatasetConfig::new`] for the five core parameters or
/// [`DatasetConfig::default()`] as a starting point, then override individual
/// fields as needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Dataset root; clips are read from `<root>/nturgb+d_skeletons/`.
    pub root: PathBuf,

    /// Window length in frames (train mode). Default: **10**.
    pub seq_len: usize,

    /// Frame offset between an input window and its target. Default: **1**.
    pub stride: usize,

    /// `true` for windowed training pairs, `false` for padded eval
    /// sequences. Default: **true**.
    pub is_train: bool,

    /// Subject split scheme. Default: **cross_subject**.
    pub split: SplitScheme,

    /// Eval padding length in frames. Default: **500**.
    pub max_len: usize,

    /// Admitted action labels. Default: **[1, 24, 27]** (drink water, kick
    /// something, jump up).
    pub labels: Vec<u16>,

    /// Training subjects for the cross-subject scheme. Default: the 53
    /// benchmark ids.
    pub training_subjects: Vec<u16>,

    /// Joint capacity per body. Default: **25**.
    pub num_joints: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            root: PathBuf::from("data/ntu"),
            seq_len: 10,
            stride: 1,
            is_train: true,
            split: SplitScheme::CrossSubject,
            max_len: DEFAULT_MAX_LEN,
            labels: DEFAULT_ACTION_LABELS.to_vec(),
            training_subjects: CROSS_SUBJECT_TRAINING_IDS.to_vec(),
            num_joints: NUM_JOINTS,
        }
    }
}

impl DatasetConfig {
    /// Create a configuration from the core construction parameters, keeping
    /// defaults for everything else.
    pub fn new(
        root: impl Into<PathBuf>,
        seq_len: usize,
        stride: usize,
        is_train: bool,
        split: SplitScheme,
    ) -> Self {
        DatasetConfig {
            root: root.into(),
            seq_len,
            stride,
            is_train,
            split,
            ..DatasetConfig::default()
        }
    }

    /// Load a [`DatasetConfig`] from a JSON file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the file cannot be opened,
    /// [`ConfigError::ParseError`] if the JSON is malformed, and any
    /// validation error.
    pub fn from_json(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: DatasetConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialize this configuration to pretty-printed JSON and write it to
    /// `path`, creating parent directories if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the directory cannot be created or
    /// the file cannot be written.
    pub fn to_json(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::FileRead {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::invalid_value("(serialization)", e.to_string()))?;
        std::fs::write(path, json).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Directory holding the clip files.
    pub fn skeleton_dir(&self) -> PathBuf {
        self.root.join(SKELETON_SUBDIR)
    }

    /// The subject split described by this configuration.
    pub fn subject_split(&self) -> SubjectSplit {
        SubjectSplit::new(self.split, self.training_subjects.iter().copied())
    }

    /// Validate all fields and return an error describing the first problem
    /// found, or `Ok(())` if the configuration is coherent.
    ///
    /// # Validated invariants
    ///
    /// - `seq_len` must be at least 1.
    /// - `seq_len + stride` must fit in `usize`.
    /// - `max_len` must be at least 1.
    /// - `num_joints` must be at least 1.
    /// - `labels` must not be empty.
    /// - `training_subjects` must not be empty under the cross-subject scheme.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seq_len == 0 {
            return Err(ConfigError::invalid_value("seq_len", "must be > 0"));
        }
        if self.seq_len.checked_add(self.stride).is_none() {
            return Err(ConfigError::invalid_value(
                "stride",
                format!("seq_len + stride overflows ({} + {})", self.seq_len, self.stride),
            ));
        }
        if self.max_len == 0 {
            return Err(ConfigError::invalid_value("max_len", "must be > 0"));
        }
        if self.num_joints == 0 {
            return Err(ConfigError::invalid_value("num_joints", "must be > 0"));
        }
        if self.labels.is_empty() {
            return Err(ConfigError::invalid_value(
                "labels",
                "at least one action label must be admitted",
            ));
        }
        if self.split == SplitScheme::CrossSubject && self.training_subjects.is_empty() {
            return Err(ConfigError::invalid_value(
                "training_subjects",
                "cross_subject split needs at least one training subject",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
