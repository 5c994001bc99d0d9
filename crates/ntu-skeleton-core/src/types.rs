//! Core data types for NTU RGB+D skeleton clips.
//!
//! # Type Categories
//!
//! - **Naming**: [`ClipName`], the decoded fixed-width clip filename
//! - **Projections**: [`Projection`], the three coordinate spaces a joint
//!   record carries
//! - **Clips**: [`ParsedClip`], the per-body joint arrays of one clip

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

use ndarray::Array3;

use crate::error::{RecordError, RecordResult};

// =============================================================================
// Clip names
// =============================================================================

/// Decoded clip filename.
///
/// NTU RGB+D clips are named `SsssCcccPpppRrrrAaaa`, five one-letter tags
/// each followed by a zero-padded 3-digit number:
///
/// | Tag | Field         | Offset |
/// |-----|---------------|--------|
/// | `S` | setup         | 0..4   |
/// | `C` | camera        | 4..8   |
/// | `P` | performer     | 8..12  |
/// | `R` | replication   | 12..16 |
/// | `A` | action label  | 16..20 |
///
/// The performer number is the subject id used by the train/eval split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipName {
    /// Setup number (`Sxxx`).
    pub setup: u16,
    /// Camera number (`Cxxx`).
    pub camera: u16,
    /// Performer / subject id (`Pxxx`).
    pub subject: u16,
    /// Replication number (`Rxxx`).
    pub replication: u16,
    /// Action class label (`Axxx`).
    pub action: u16,
}

const NAME_TAGS: [char; 5] = ['S', 'C', 'P', 'R', 'A'];
const FIELD_WIDTH: usize = 4;
const NAME_LEN: usize = NAME_TAGS.len() * FIELD_WIDTH;

impl ClipName {
    /// Decodes a filename stem such as `S001C002P003R002A024`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidFilename`] when the stem is not exactly
    /// 20 ASCII characters, a tag letter is wrong, or a numeric field holds a
    /// non-digit.
    pub fn parse(stem: &str) -> RecordResult<Self> {
        if !stem.is_ascii() || stem.len() != NAME_LEN {
            return Err(RecordError::invalid_filename(
                stem,
                format!("expected {NAME_LEN} ASCII characters like `S001C001P001R001A001`"),
            ));
        }

        let mut fields = [0u16; 5];
        for (i, tag) in NAME_TAGS.iter().enumerate() {
            let start = i * FIELD_WIDTH;
            let chunk = &stem[start..start + FIELD_WIDTH];
            if !chunk.starts_with(*tag) {
                return Err(RecordError::invalid_filename(
                    stem,
                    format!("expected tag `{tag}` at offset {start}, found `{chunk}`"),
                ));
            }
            let digits = &chunk[1..];
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(RecordError::invalid_filename(
                    stem,
                    format!("field `{chunk}` is not a 3-digit number"),
                ));
            }
            fields[i] = digits
                .parse()
                .map_err(|e| RecordError::invalid_filename(stem, format!("field `{chunk}`: {e}")))?;
        }

        Ok(Self {
            setup: fields[0],
            camera: fields[1],
            subject: fields[2],
            replication: fields[3],
            action: fields[4],
        })
    }

    /// Decodes the clip name from a file path, ignoring directories and the
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidFilename`] when the path has no UTF-8
    /// file stem or the stem fails [`ClipName::parse`].
    pub fn from_path(path: &Path) -> RecordResult<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                RecordError::invalid_filename(path.display().to_string(), "no UTF-8 file stem")
            })?;
        Self::parse(stem)
    }

    /// Action class label of the clip.
    #[must_use]
    pub fn label(&self) -> u16 {
        self.action
    }
}

impl fmt::Display for ClipName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S{:03}C{:03}P{:03}R{:03}A{:03}",
            self.setup, self.camera, self.subject, self.replication, self.action
        )
    }
}

impl FromStr for ClipName {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// Projections
// =============================================================================

/// Coordinate space of a joint position.
///
/// Each joint line carries the same joint in three spaces, laid out as
/// consecutive fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Projection {
    /// Camera-space 3D position (fields 0..3).
    Skeleton3d,
    /// 2D projection onto the depth image (fields 3..5).
    Depth2d,
    /// 2D projection onto the color image (fields 5..7).
    Color2d,
}

impl Projection {
    /// All projection kinds in field order.
    pub const ALL: [Projection; 3] = [Self::Skeleton3d, Self::Depth2d, Self::Color2d];

    /// Number of coordinates in this projection.
    #[must_use]
    pub const fn dims(self) -> usize {
        match self {
            Self::Skeleton3d => 3,
            Self::Depth2d | Self::Color2d => 2,
        }
    }

    /// Field range of this projection within a joint line.
    #[must_use]
    pub const fn fields(self) -> Range<usize> {
        match self {
            Self::Skeleton3d => 0..3,
            Self::Depth2d => 3..5,
            Self::Color2d => 5..7,
        }
    }

    /// Short lowercase name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Skeleton3d => "skel",
            Self::Depth2d => "depth",
            Self::Color2d => "rgb",
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Parsed clips
// =============================================================================

/// Key of a per-body array: body slot index and projection kind.
pub type BodyKey = (usize, Projection);

/// The decoded contents of one clip file.
///
/// Every array has shape `[frame_count, joint_count, projection.dims()]`.
/// Rows are indexed by the nominal frame index: a frame that reported no
/// bodies leaves an all-zero row in every array rather than being compacted
/// away. Only slots below the largest per-frame body count are present.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedClip {
    /// Action class label, taken from the filename.
    pub label: u16,
    /// Frame count declared on the first line of the file.
    pub frame_count: usize,
    /// Body count of each frame that had at least one body, in frame order.
    pub body_counts: Vec<usize>,
    /// Joint capacity of every array.
    pub joint_count: usize,
    arrays: BTreeMap<BodyKey, Array3<f32>>,
}

impl ParsedClip {
    pub(crate) fn new(
        label: u16,
        frame_count: usize,
        body_counts: Vec<usize>,
        joint_count: usize,
        arrays: BTreeMap<BodyKey, Array3<f32>>,
    ) -> Self {
        Self {
            label,
            frame_count,
            body_counts,
            joint_count,
            arrays,
        }
    }

    /// Array for `slot` in the given projection, if the slot was retained
    /// and the projection was read.
    #[must_use]
    pub fn array(&self, slot: usize, kind: Projection) -> Option<&Array3<f32>> {
        self.arrays.get(&(slot, kind))
    }

    /// 3D position array for `slot`.
    #[must_use]
    pub fn positions(&self, slot: usize) -> Option<&Array3<f32>> {
        self.array(slot, Projection::Skeleton3d)
    }

    /// All retained arrays keyed by `(slot, projection)`.
    #[must_use]
    pub fn arrays(&self) -> &BTreeMap<BodyKey, Array3<f32>> {
        &self.arrays
    }

    /// 3D position arrays in ascending slot order.
    pub fn body_positions(&self) -> impl Iterator<Item = (usize, &Array3<f32>)> + '_ {
        self.arrays
            .iter()
            .filter(|((_, kind), _)| *kind == Projection::Skeleton3d)
            .map(|(&(slot, _), arr)| (slot, arr))
    }

    /// Retained slot indices in ascending order.
    #[must_use]
    pub fn slots(&self) -> Vec<usize> {
        let mut slots: Vec<usize> = self.arrays.keys().map(|&(slot, _)| slot).collect();
        slots.dedup();
        slots
    }

    /// Largest number of bodies seen in any single frame.
    #[must_use]
    pub fn max_bodies(&self) -> usize {
        self.body_counts.iter().copied().max().unwrap_or(0)
    }

    /// Returns `true` when no frame of the clip contained a body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }
}
