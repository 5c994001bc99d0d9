//! NPY export of a built dataset.
//!
//! Arrays are written with `ndarray_npy` so they load directly with
//! `numpy.load`:
//!
//! | file           | mode  | dtype   | shape                           |
//! |----------------|-------|---------|---------------------------------|
//! | `x0.npy`       | both  | float32 | `[N, seq_len or max_len, J, 3]` |
//! | `x1.npy`       | train | float32 | `[N, seq_len, J, 3]`            |
//! | `seq_len.npy`  | eval  | int64   | `[N]`                           |
//! | `labels.npy`   | both  | int64   | `[N]`                           |

use ndarray::Array1;
use ndarray_npy::write_npy;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::dataset::NtuRgbdDataset;
use crate::error::DatasetError;

/// Primary array file name.
pub const INPUTS_FILE: &str = "x0.npy";
/// Target array file name (train mode).
pub const TARGETS_FILE: &str = "x1.npy";
/// True-length file name (eval mode).
pub const LENGTHS_FILE: &str = "seq_len.npy";
/// Label file name.
pub const LABELS_FILE: &str = "labels.npy";

/// Write the arrays of `dataset` into `dir`, creating it if necessary.
///
/// Returns the paths written, primary array first.
///
/// # Errors
///
/// Returns [`DatasetError::Io`] if `dir` cannot be created and
/// [`DatasetError::Export`] if an array cannot be written.
pub fn export_npy(dataset: &NtuRgbdDataset, dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    std::fs::create_dir_all(dir).map_err(|e| DatasetError::io_error(dir, e))?;
    let mut written = Vec::with_capacity(3);

    let path = dir.join(INPUTS_FILE);
    write_npy(&path, &dataset.inputs()).map_err(|e| DatasetError::export(&path, e.to_string()))?;
    written.push(path);

    if let Some(targets) = dataset.targets() {
        let path = dir.join(TARGETS_FILE);
        write_npy(&path, &targets).map_err(|e| DatasetError::export(&path, e.to_string()))?;
        written.push(path);
    }

    if let Some(lengths) = dataset.lengths() {
        let path = dir.join(LENGTHS_FILE);
        let lengths: Array1<i64> = lengths.iter().map(|&l| l as i64).collect();
        write_npy(&path, &lengths).map_err(|e| DatasetError::export(&path, e.to_string()))?;
        written.push(path);
    }

    let path = dir.join(LABELS_FILE);
    let labels: Array1<i64> = dataset.labels().iter().map(|&l| i64::from(l)).collect();
    write_npy(&path, &labels).map_err(|e| DatasetError::export(&path, e.to_string()))?;
    written.push(path);

    info!("Exported {} arrays to {}", written.len(), dir.display());
    Ok(written)
}
