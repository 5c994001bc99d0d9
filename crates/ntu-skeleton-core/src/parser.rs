//! Record parser for `.skeleton` clip files.
//!
//! A clip file is plain text whose structure is driven by embedded counts:
//!
//! ```text
//! <frame count N>
//! repeated N times:
//!   <body count B>
//!   repeated B times:
//!     <body metadata line>            (ignored)
//!     <joint count J>
//!     repeated J times:
//!       x y z depthX depthY colorX colorY [more fields...]
//! ```
//!
//! Arrays are pre-allocated to `N` rows for every body slot. A frame with
//! `B == 0` writes nothing, so its row stays zero in every array. After the
//! last frame, slots at or above the largest per-frame body count are
//! dropped.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::Lines;

use ndarray::Array3;
use tracing::{debug, trace};

use crate::error::{RecordError, RecordResult};
use crate::types::{BodyKey, ClipName, ParsedClip, Projection};
use crate::{JOINT_FIELDS, MAX_BODIES, NUM_JOINTS};

// ---------------------------------------------------------------------------
// ReadOptions
// ---------------------------------------------------------------------------

/// Selects which projections are materialised and the joint capacity of
/// every array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Keep 3D positions. Default: **true**.
    pub skeleton: bool,
    /// Keep depth-image projections. Default: **true**.
    pub depth: bool,
    /// Keep color-image projections. Default: **true**.
    pub color: bool,
    /// Joint capacity per body. Default: **25**.
    pub num_joints: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            skeleton: true,
            depth: true,
            color: true,
            num_joints: NUM_JOINTS,
        }
    }
}

impl ReadOptions {
    /// Options that keep only the 3D positions.
    #[must_use]
    pub fn skeleton_only() -> Self {
        ReadOptions {
            skeleton: true,
            depth: false,
            color: false,
            num_joints: NUM_JOINTS,
        }
    }

    /// Returns `true` if `kind` should be materialised.
    #[must_use]
    pub fn wants(&self, kind: Projection) -> bool {
        match kind {
            Projection::Skeleton3d => self.skeleton,
            Projection::Depth2d => self.depth,
            Projection::Color2d => self.color,
        }
    }

    fn projections(&self) -> impl Iterator<Item = Projection> + '_ {
        Projection::ALL.into_iter().filter(move |&k| self.wants(k))
    }
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Read and parse a clip file with [`ReadOptions::default`].
///
/// The label is decoded from the filename; see [`ClipName`].
///
/// # Errors
///
/// Returns [`RecordError::InvalidFilename`] for an undecodable filename,
/// [`RecordError::Io`] if the file cannot be read, and
/// [`RecordError::MalformedRecord`] for inconsistent contents.
pub fn read_skeleton(path: &Path) -> RecordResult<ParsedClip> {
    read_skeleton_with(path, &ReadOptions::default())
}

/// Read and parse a clip file with explicit options.
///
/// # Errors
///
/// Same as [`read_skeleton`].
pub fn read_skeleton_with(path: &Path, options: &ReadOptions) -> RecordResult<ParsedClip> {
    let name = ClipName::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| RecordError::io(path, e))?;
    parse_skeleton(&text, name.label(), options, path)
}

/// Parse the text of a clip file.
///
/// `source` is only used to attribute errors.
///
/// # Errors
///
/// Returns [`RecordError::MalformedRecord`] when a count line is not an
/// integer, a joint line has fewer than 7 numeric fields, the text ends before
/// the declared frames are consumed, or a declared body or joint count
/// exceeds the pre-allocated capacity.
pub fn parse_skeleton(
    text: &str,
    label: u16,
    options: &ReadOptions,
    source: &Path,
) -> RecordResult<ParsedClip> {
    let mut cursor = LineCursor::new(text, source);
    let frame_count = cursor.next_count("frame count")?;
    let remaining = cursor.remaining();
    if frame_count > remaining {
        return Err(cursor.malformed(format!(
            "declares {frame_count} frames but only {remaining} lines follow"
        )));
    }
    let capacity = options.num_joints;

    let mut arrays: BTreeMap<BodyKey, Array3<f32>> = BTreeMap::new();
    for slot in 0..MAX_BODIES {
        for kind in options.projections() {
            arrays.insert((slot, kind), Array3::zeros((frame_count, capacity, kind.dims())));
        }
    }

    let mut body_counts = Vec::with_capacity(frame_count);
    for frame in 0..frame_count {
        let bodies = cursor.next_count("body count")?;
        if bodies == 0 {
            trace!(frame, "empty frame in {}", source.display());
            continue;
        }
        if bodies > MAX_BODIES {
            return Err(cursor.malformed(format!(
                "frame {frame} declares {bodies} bodies, at most {MAX_BODIES} are supported"
            )));
        }
        body_counts.push(bodies);

        for slot in 0..bodies {
            cursor.next_line("body metadata")?;
            let joints = cursor.next_count("joint count")?;
            if joints > capacity {
                return Err(cursor.malformed(format!(
                    "body declares {joints} joints, capacity is {capacity}"
                )));
            }

            for joint in 0..joints {
                let fields = cursor.next_joint()?;
                for kind in options.projections() {
                    if let Some(arr) = arrays.get_mut(&(slot, kind)) {
                        for (c, f) in kind.fields().enumerate() {
                            arr[[frame, joint, c]] = fields[f];
                        }
                    }
                }
            }
        }
    }

    let keep = body_counts.iter().copied().max().unwrap_or(0);
    arrays.retain(|&(slot, _), _| slot < keep);
    debug!(
        frames = frame_count,
        kept_slots = keep,
        "parsed {}",
        source.display()
    );

    Ok(ParsedClip::new(label, frame_count, body_counts, capacity, arrays))
}

// ---------------------------------------------------------------------------
// LineCursor
// ---------------------------------------------------------------------------

/// Read cursor over the lines of a clip file, tracking the 1-based number of
/// the most recently consumed line.
struct LineCursor<'a> {
    lines: Lines<'a>,
    line: usize,
    source: &'a Path,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str, source: &'a Path) -> Self {
        LineCursor {
            lines: text.lines(),
            line: 0,
            source,
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> RecordError {
        RecordError::malformed(self.source, self.line, reason)
    }

    /// Lines not consumed yet. Every frame needs at least one.
    fn remaining(&self) -> usize {
        self.lines.clone().count()
    }

    fn next_line(&mut self, expected: &str) -> RecordResult<&'a str> {
        self.line += 1;
        match self.lines.next() {
            Some(line) => Ok(line),
            None => Err(self.malformed(format!("unexpected end of file, expected {expected}"))),
        }
    }

    fn next_count(&mut self, expected: &str) -> RecordResult<usize> {
        let raw = self.next_line(expected)?.trim();
        raw.parse::<usize>()
            .map_err(|e| self.malformed(format!("expected {expected}, found `{raw}`: {e}")))
    }

    fn next_joint(&mut self) -> RecordResult<[f32; JOINT_FIELDS]> {
        let raw = self.next_line("joint record")?;
        let mut fields = [0.0f32; JOINT_FIELDS];
        let mut found = 0;
        for (slot, token) in fields.iter_mut().zip(raw.split_whitespace()) {
            *slot = token
                .parse::<f32>()
                .map_err(|e| self.malformed(format!("joint field `{token}`: {e}")))?;
            found += 1;
        }
        if found < JOINT_FIELDS {
            return Err(self.malformed(format!(
                "joint record has {found} fields, expected at least {JOINT_FIELDS}"
            )));
        }
        Ok(fields)
    }
}
