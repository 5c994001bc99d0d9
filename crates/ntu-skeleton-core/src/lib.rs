//! # NTU RGB+D Skeleton Core
//!
//! Core types and the record parser for NTU RGB+D `.skeleton` files.
//!
//! This crate provides the leaf layer of the skeleton pipeline:
//!
//! - **Clip names**: [`ClipName`] decodes the fixed-width
//!   `SsssCcccPpppRrrrAaaa` filename convention into setup, camera, subject,
//!   replication, and action fields.
//! - **Parsed clips**: [`ParsedClip`] holds per-body joint arrays keyed by
//!   `(slot, Projection)` together with the clip metadata.
//! - **Parser**: [`read_skeleton`] and [`parse_skeleton`] decode the
//!   count-driven text format.
//! - **Errors**: [`RecordError`] carries the file path and line number of
//!   every malformed record.
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//! use ntu_skeleton_core::{parse_skeleton, Projection, ReadOptions};
//!
//! let text = "1\n1\nbody-info\n1\n0.1 0.2 0.3 1 2 3 4\n";
//! let clip = parse_skeleton(text, 24, &ReadOptions::default(), Path::new("inline")).unwrap();
//!
//! assert_eq!(clip.label, 24);
//! let positions = clip.array(0, Projection::Skeleton3d).unwrap();
//! assert_eq!(positions.shape(), &[1, 25, 3]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod parser;
pub mod types;

pub use error::{RecordError, RecordResult};
pub use parser::{parse_skeleton, read_skeleton, read_skeleton_with, ReadOptions};
pub use types::{BodyKey, ClipName, ParsedClip, Projection};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of body slots pre-allocated per clip.
pub const MAX_BODIES: usize = 4;

/// Number of joints per tracked skeleton.
pub const NUM_JOINTS: usize = 25;

/// Minimum number of numeric fields on a joint line.
pub const JOINT_FIELDS: usize = 7;

/// File extension of clip files.
pub const SKELETON_EXTENSION: &str = "skeleton";

/// Name of the subdirectory that holds all clip files under a dataset root.
pub const SKELETON_SUBDIR: &str = "nturgb+d_skeletons";
