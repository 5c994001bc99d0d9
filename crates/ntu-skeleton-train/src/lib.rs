//! # NTU RGB+D Skeleton Dataset Builder
//!
//! Turns a directory of NTU RGB+D `.skeleton` clips into in-memory arrays for
//! sequence-model training: subject/label filtering, per-body sliding windows
//! (train) or NaN-padded sequences (eval), and per-channel min-max scaling.
//!
//! ## Architecture
//!
//! ```text
//! DatasetConfig ──► NtuRgbdDataset::new
//!       │                 │
//!       │           discover_clips ──► ClipFilter (SubjectSplit + labels)
//!       │                 │
//!       │           ntu_skeleton_core::read_skeleton_with
//!       │                 │
//!       │           window_pairs | pad_sequence
//!       │                 │
//!       │           MinMaxScaler
//!       │
//!       └──► export_npy
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ntu_skeleton_train::config::DatasetConfig;
//! use ntu_skeleton_train::dataset::{NtuRgbdDataset, SkeletonDataset};
//! use ntu_skeleton_train::split::SplitScheme;
//!
//! let config = DatasetConfig::new("data/ntu", 10, 1, true, SplitScheme::CrossSubject);
//! let dataset = NtuRgbdDataset::new(config).expect("dataset builds");
//!
//! let sample = dataset.get(0).unwrap();
//! println!("{} items, first label {}", dataset.len(), sample.label());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod filter;
pub mod normalize;
pub mod split;
pub mod window;

// Convenient re-exports at the crate root.
pub use config::DatasetConfig;
pub use dataset::{discover_clips, DatasetSummary, NtuRgbdDataset, Sample, SkeletonDataset};
pub use error::{ConfigError, DatasetError, TrainError, TrainResult};
pub use export::export_npy;
pub use filter::ClipFilter;
pub use normalize::MinMaxScaler;
pub use split::{SplitScheme, SubjectSplit};
pub use window::{pad_sequence, split_sequence, window_count, window_pairs};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
