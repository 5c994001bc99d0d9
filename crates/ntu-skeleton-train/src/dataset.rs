//! Dataset construction over a directory of NTU RGB+D clips.
//!
//! [`NtuRgbdDataset::new`] runs the whole pipeline once, synchronously:
//!
//! 1. [`discover_clips`] lists `<root>/nturgb+d_skeletons/*.skeleton` in
//!    path order.
//! 2. Each filename is decoded and checked by the [`ClipFilter`]; rejected
//!    clips are never opened.
//! 3. Admitted clips are parsed one at a time. Every retained body slot
//!    contributes either sliding `(input, target)` windows (train) or one
//!    NaN-padded sequence with its true length (eval).
//! 4. The assembled arrays are min-max scaled per coordinate channel.
//!
//! The result is immutable and indexable through [`SkeletonDataset`].
//!
//! # Directory layout
//!
//! ```text
//! <root>/
//!   nturgb+d_skeletons/
//!     S001C001P001R001A001.skeleton
//!     S001C001P001R001A002.skeleton
//!     ...
//! ```

use ndarray::{Array3, Array4, ArrayView3, ArrayView4, Axis};
use ntu_skeleton_core::{read_skeleton_with, ClipName, ReadOptions, SKELETON_EXTENSION};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::DatasetConfig;
use crate::error::{ConfigError, DatasetError};
use crate::filter::ClipFilter;
use crate::normalize::MinMaxScaler;
use crate::window::{pad_sequence, window_pairs};

/// Number of coordinates per joint in the windowed arrays.
const COORDS: usize = 3;

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// One item of a built dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    /// A train-mode window pair.
    Window {
        /// Input window, shape `[seq_len, joints, 3]`.
        input: Array3<f32>,
        /// Target window shifted by `stride` frames, shape
        /// `[seq_len, joints, 3]`.
        target: Array3<f32>,
        /// Action label of the source clip.
        label: u16,
    },
    /// An eval-mode padded sequence.
    Padded {
        /// Sequence padded with NaN, shape `[max_len, joints, 3]`.
        sequence: Array3<f32>,
        /// Frame count before padding.
        true_len: usize,
        /// Action label of the source clip.
        label: u16,
    },
}

impl Sample {
    /// Action label of the source clip.
    pub fn label(&self) -> u16 {
        match self {
            Sample::Window { label, .. } | Sample::Padded { label, .. } => *label,
        }
    }
}

// ---------------------------------------------------------------------------
// SkeletonDataset trait
// ---------------------------------------------------------------------------

/// Common interface for indexed skeleton datasets.
///
/// Implementations must be `Send + Sync` so they can be shared with
/// data-loading threads of the consuming training loop.
pub trait SkeletonDataset: Send + Sync {
    /// Total number of items.
    fn len(&self) -> usize;

    /// Return the item at position `idx`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::IndexOutOfRange`] when `idx >= self.len()`.
    fn get(&self, idx: usize) -> Result<Sample, DatasetError>;

    /// Returns `true` when the dataset contains no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// DatasetSummary
// ---------------------------------------------------------------------------

/// Counters collected while building a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    /// Clip files found in the skeleton directory.
    pub files_scanned: usize,
    /// Clips that passed the subject and label filter and had bodies.
    pub clips_accepted: usize,
    /// Admitted clips skipped because no frame contained a body.
    pub clips_without_bodies: usize,
    /// Body slots contributing to the collection.
    pub bodies: usize,
    /// Items in the collection.
    pub items: usize,
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// List every `.skeleton` file under `<root>/nturgb+d_skeletons/`, sorted by
/// path.
///
/// # Errors
///
/// Returns [`ConfigError::PathNotFound`] (wrapped) if the root or the
/// skeleton subdirectory does not exist, and [`DatasetError::Io`] if the
/// directory cannot be listed.
pub fn discover_clips(root: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    if !root.is_dir() {
        return Err(ConfigError::path_not_found(root).into());
    }
    let dir = root.join(ntu_skeleton_core::SKELETON_SUBDIR);
    if !dir.is_dir() {
        return Err(ConfigError::path_not_found(dir).into());
    }

    let entries = std::fs::read_dir(&dir).map_err(|e| DatasetError::io_error(&dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| DatasetError::io_error(&dir, e))?.path();
        let is_clip = path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(SKELETON_EXTENSION);
        if is_clip {
            files.push(path);
        } else {
            debug!("Ignoring {}", path.display());
        }
    }
    files.sort();

    info!("Found {} clip files in {}", files.len(), dir.display());
    Ok(files)
}

// ---------------------------------------------------------------------------
// Accumulators
// ---------------------------------------------------------------------------

/// Flat row-major buffers the per-body arrays are appended to.
enum Accumulator {
    Windows {
        seq_len: usize,
        stride: usize,
        inputs: Vec<f32>,
        targets: Vec<f32>,
    },
    Padded {
        max_len: usize,
        sequences: Vec<f32>,
        lengths: Vec<usize>,
    },
}

impl Accumulator {
    fn for_config(config: &DatasetConfig) -> Self {
        if config.is_train {
            Accumulator::Windows {
                seq_len: config.seq_len,
                stride: config.stride,
                inputs: Vec::new(),
                targets: Vec::new(),
            }
        } else {
            Accumulator::Padded {
                max_len: config.max_len,
                sequences: Vec::new(),
                lengths: Vec::new(),
            }
        }
    }

    /// Append one body and return the number of items it produced.
    fn push_body(&mut self, positions: ArrayView3<'_, f32>) -> Result<usize, DatasetError> {
        match self {
            Accumulator::Windows {
                seq_len,
                stride,
                inputs,
                targets,
            } => {
                let mut produced = 0;
                for (input, target) in window_pairs(positions, *seq_len, *stride) {
                    inputs.extend(input.iter());
                    targets.extend(target.iter());
                    produced += 1;
                }
                Ok(produced)
            }
            Accumulator::Padded {
                max_len,
                sequences,
                lengths,
            } => {
                let padded = pad_sequence(positions, *max_len)?;
                sequences.extend(padded.iter());
                lengths.push(positions.len_of(Axis(0)));
                Ok(1)
            }
        }
    }

    fn finish(self, items: usize, joints: usize) -> Result<Collection, DatasetError> {
        match self {
            Accumulator::Windows {
                seq_len,
                inputs,
                targets,
                ..
            } => {
                let shape = (items, seq_len, joints, COORDS);
                Ok(Collection::Windows {
                    inputs: Array4::from_shape_vec(shape, inputs)?,
                    targets: Array4::from_shape_vec(shape, targets)?,
                })
            }
            Accumulator::Padded {
                max_len,
                sequences,
                lengths,
            } => Ok(Collection::Padded {
                sequences: Array4::from_shape_vec((items, max_len, joints, COORDS), sequences)?,
                lengths,
            }),
        }
    }
}

/// The assembled, normalized arrays.
enum Collection {
    Windows {
        inputs: Array4<f32>,
        targets: Array4<f32>,
    },
    Padded {
        sequences: Array4<f32>,
        lengths: Vec<usize>,
    },
}

// ---------------------------------------------------------------------------
// NtuRgbdDataset
// ---------------------------------------------------------------------------

/// Windowed (train) or padded (eval) NTU RGB+D skeleton dataset.
///
/// Built once by [`NtuRgbdDataset::new`]; every item is available in memory
/// afterwards. Item order is clip path, then body slot, then window.
pub struct NtuRgbdDataset {
    config: DatasetConfig,
    labels: Vec<u16>,
    collection: Collection,
    input_scaler: MinMaxScaler,
    target_scaler: Option<MinMaxScaler>,
    summary: DatasetSummary,
}

impl NtuRgbdDataset {
    /// Scan, filter, parse, window or pad, and normalize every clip under
    /// `config.root`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, a missing directory, any clip that
    /// cannot be decoded, or (eval mode) a body longer than `max_len`. No
    /// partial dataset is returned.
    pub fn new(config: DatasetConfig) -> Result<Self, DatasetError> {
        config.validate()?;
        let files = discover_clips(&config.root)?;
        let filter = ClipFilter::from_config(&config);
        let options = ReadOptions {
            num_joints: config.num_joints,
            ..ReadOptions::skeleton_only()
        };

        let mut summary = DatasetSummary {
            files_scanned: files.len(),
            ..Default::default()
        };
        let mut labels: Vec<u16> = Vec::new();
        let mut acc = Accumulator::for_config(&config);

        for path in &files {
            let name = ClipName::from_path(path)?;
            if !filter.accepts(&name, config.is_train) {
                debug!(subject = name.subject, label = name.action, "Filtered out {name}");
                continue;
            }

            let clip = read_skeleton_with(path, &options)?;
            if clip.is_empty() {
                warn!("Skipping {}: no frame contains a body", path.display());
                summary.clips_without_bodies += 1;
                continue;
            }
            summary.clips_accepted += 1;

            for (slot, positions) in clip.body_positions() {
                let produced = acc.push_body(positions.view())?;
                debug!(slot, produced, "Body of {name}");
                labels.extend(std::iter::repeat(clip.label).take(produced));
                summary.bodies += 1;
            }
        }

        summary.items = labels.len();
        let collection = acc.finish(labels.len(), config.num_joints)?;
        let (collection, input_scaler, target_scaler) = normalize(collection);

        info!(
            "Built {} dataset: {} items from {} of {} clips ({} bodies, {} without bodies)",
            if config.is_train { "train" } else { "eval" },
            summary.items,
            summary.clips_accepted,
            summary.files_scanned,
            summary.bodies,
            summary.clips_without_bodies
        );

        Ok(NtuRgbdDataset {
            config,
            labels,
            collection,
            input_scaler,
            target_scaler,
            summary,
        })
    }

    /// The configuration the dataset was built from.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Counters collected during construction.
    pub fn summary(&self) -> DatasetSummary {
        self.summary
    }

    /// Returns `true` for a train-mode (windowed) dataset.
    pub fn is_train(&self) -> bool {
        matches!(self.collection, Collection::Windows { .. })
    }

    /// Labels, one per item.
    pub fn labels(&self) -> &[u16] {
        &self.labels
    }

    /// Primary array: input windows (train) or padded sequences (eval).
    pub fn inputs(&self) -> ArrayView4<'_, f32> {
        match &self.collection {
            Collection::Windows { inputs, .. } => inputs.view(),
            Collection::Padded { sequences, .. } => sequences.view(),
        }
    }

    /// Target windows; `None` in eval mode.
    pub fn targets(&self) -> Option<ArrayView4<'_, f32>> {
        match &self.collection {
            Collection::Windows { targets, .. } => Some(targets.view()),
            Collection::Padded { .. } => None,
        }
    }

    /// True sequence lengths; `None` in train mode.
    pub fn lengths(&self) -> Option<&[usize]> {
        match &self.collection {
            Collection::Windows { .. } => None,
            Collection::Padded { lengths, .. } => Some(lengths),
        }
    }

    /// Bounds fitted on [`inputs`](Self::inputs).
    pub fn input_scaler(&self) -> &MinMaxScaler {
        &self.input_scaler
    }

    /// Bounds fitted on [`targets`](Self::targets); `None` in eval mode.
    pub fn target_scaler(&self) -> Option<&MinMaxScaler> {
        self.target_scaler.as_ref()
    }
}

/// Scale each array with its own bounds.
fn normalize(collection: Collection) -> (Collection, MinMaxScaler, Option<MinMaxScaler>) {
    match collection {
        Collection::Windows {
            mut inputs,
            mut targets,
        } => {
            let input_scaler = MinMaxScaler::fit_transform(&mut inputs);
            let target_scaler = MinMaxScaler::fit_transform(&mut targets);
            (Collection::Windows { inputs, targets }, input_scaler, Some(target_scaler))
        }
        Collection::Padded {
            mut sequences,
            lengths,
        } => {
            let scaler = MinMaxScaler::fit_transform(&mut sequences);
            (Collection::Padded { sequences, lengths }, scaler, None)
        }
    }
}

impl SkeletonDataset for NtuRgbdDataset {
    fn len(&self) -> usize {
        self.labels.len()
    }

    fn get(&self, idx: usize) -> Result<Sample, DatasetError> {
        let len = self.len();
        if idx >= len {
            return Err(DatasetError::IndexOutOfRange { idx, len });
        }
        let label = self.labels[idx];

        Ok(match &self.collection {
            Collection::Windows { inputs, targets } => Sample::Window {
                input: inputs.index_axis(Axis(0), idx).to_owned(),
                target: targets.index_axis(Axis(0), idx).to_owned(),
                label,
            },
            Collection::Padded { sequences, lengths } => Sample::Padded {
                sequence: sequences.index_axis(Axis(0), idx).to_owned(),
                true_len: lengths[idx],
                label,
            },
        })
    }

    fn name(&self) -> &str {
        "NtuRgbdDataset"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
