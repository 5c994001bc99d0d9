//! Sliding windows and padding over body sequences.
//!
//! A body sequence is a `[frames, joints, coords]` array. Train mode cuts it
//! into `(input, target)` pairs where the target is the input shifted forward
//! by `stride` frames; eval mode keeps the whole sequence and right-pads the
//! frame axis with NaN.
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array3;
//! use ntu_skeleton_train::window::{window_count, window_pairs};
//!
//! let seq = Array3::<f32>::zeros((5, 25, 3));
//! assert_eq!(window_count(5, 2, 1), 3);
//! assert_eq!(window_pairs(seq.view(), 2, 1).count(), 3);
//! ```

use ndarray::{s, Array3, ArrayView3};

use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Train windows
// ---------------------------------------------------------------------------

/// Number of `(input, target)` pairs a sequence of `len` frames yields:
/// `max(0, len - seq_len - stride + 1)`.
///
/// A window span `seq_len + stride` that overflows `usize` yields no pairs.
pub fn window_count(len: usize, seq_len: usize, stride: usize) -> usize {
    match seq_len.checked_add(stride) {
        Some(span) => len.saturating_add(1).saturating_sub(span),
        None => 0,
    }
}

/// Iterate the `(input, target)` pairs of `seq`.
///
/// Pair `i` is `(seq[i..i + seq_len], seq[i + stride..i + stride + seq_len])`.
pub fn window_pairs<'a>(
    seq: ArrayView3<'a, f32>,
    seq_len: usize,
    stride: usize,
) -> impl Iterator<Item = (ArrayView3<'a, f32>, ArrayView3<'a, f32>)> + 'a {
    let count = window_count(seq.len_of(ndarray::Axis(0)), seq_len, stride);
    (0..count).map(move |i| {
        (
            seq.slice_move(s![i..i + seq_len, .., ..]),
            seq.slice_move(s![i + stride..i + stride + seq_len, .., ..]),
        )
    })
}

/// Owned copies of every `(input, target)` pair of `seq`.
pub fn split_sequence(
    seq: ArrayView3<'_, f32>,
    seq_len: usize,
    stride: usize,
) -> (Vec<Array3<f32>>, Vec<Array3<f32>>) {
    window_pairs(seq, seq_len, stride)
        .map(|(input, target)| (input.to_owned(), target.to_owned()))
        .unzip()
}

// ---------------------------------------------------------------------------
// Eval padding
// ---------------------------------------------------------------------------

/// Right-pad the frame axis of `seq` with NaN up to `max_len` frames.
///
/// The joint and coordinate axes are untouched.
///
/// # Errors
///
/// Returns [`DatasetError::SequenceTooLong`] when `seq` already has more than
/// `max_len` frames.
pub fn pad_sequence(seq: ArrayView3<'_, f32>, max_len: usize) -> Result<Array3<f32>, DatasetError> {
    let (len, joints, coords) = seq.dim();
    if len > max_len {
        return Err(DatasetError::SequenceTooLong { len, max_len });
    }
    let mut padded = Array3::from_elem((max_len, joints, coords), f32::NAN);
    padded.slice_mut(s![..len, .., ..]).assign(&seq);
    Ok(padded)
}
