//! Integration tests for [`ntu_skeleton_core::parser`].
//!
//! Clip files are written into a [`tempfile::TempDir`] with NTU-style names
//! and read back through the public entry points.

use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;
use ndarray::Axis;
use ntu_skeleton_core::{
    parse_skeleton, read_skeleton, read_skeleton_with, ClipName, Projection, ReadOptions,
    RecordError, NUM_JOINTS,
};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const BODY_INFO: &str = "72057594037931101 0 1 1 1 1 0 0.02 0.3 2";

/// Render a clip. `frames[f][b]` is the number of joints of body `b` in
/// frame `f`; joint `j` of that body sits at `(f + j, b, 10 * f)` in 3D.
fn render(frames: &[Vec<usize>]) -> String {
    let mut out = format!("{}\n", frames.len());
    for (f, bodies) in frames.iter().enumerate() {
        out.push_str(&format!("{}\n", bodies.len()));
        for (b, &joints) in bodies.iter().enumerate() {
            out.push_str(&format!("{BODY_INFO}\n{joints}\n"));
            for j in 0..joints {
                out.push_str(&format!(
                    "{} {} {} 250.1 180.2 1010.3 560.4 -0.2 0.1 0.9 0.3 2\n",
                    f + j,
                    b,
                    10 * f
                ));
            }
        }
    }
    out
}

fn write_clip(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(format!("{name}.skeleton"));
    std::fs::write(&path, text).expect("fixture write must succeed");
    path
}

// ---------------------------------------------------------------------------
// Worked example: subject 001, label 024, middle frame empty
// ---------------------------------------------------------------------------

#[test]
fn example_clip_with_empty_middle_frame() {
    let tmp = TempDir::new().unwrap();
    let text = render(&[vec![25], vec![], vec![25]]);
    let path = write_clip(tmp.path(), "S001C001P001R001A024", &text);

    let clip = read_skeleton(&path).expect("example clip must parse");

    assert_eq!(clip.label, 24);
    assert_eq!(clip.frame_count, 3);
    assert_eq!(clip.body_counts, vec![1, 1]);
    assert_eq!(clip.slots(), vec![0], "only slot 0 may be retained");

    let skel = clip.positions(0).unwrap();
    assert_eq!(skel.shape(), &[3, 25, 3]);
    assert!(
        skel.index_axis(Axis(0), 1).iter().all(|&v| v == 0.0),
        "row of the empty frame must be all-zero"
    );
    assert_abs_diff_eq!(skel[[2, 4, 0]], 6.0);
    assert_abs_diff_eq!(skel[[2, 4, 2]], 20.0);

    let name = ClipName::from_path(&path).unwrap();
    assert_eq!(name.subject, 1);
    assert_eq!(name.label(), clip.label);
}

// ---------------------------------------------------------------------------
// Frame-axis invariants
// ---------------------------------------------------------------------------

/// When every frame has a body, every row of every array is populated.
#[test]
fn every_frame_populated_has_no_zero_rows() {
    let tmp = TempDir::new().unwrap();
    let frames: Vec<Vec<usize>> = (0..6).map(|_| vec![NUM_JOINTS, NUM_JOINTS]).collect();
    let path = write_clip(tmp.path(), "S002C001P003R001A001", &render(&frames));

    let clip = read_skeleton(&path).unwrap();
    assert_eq!(clip.slots(), vec![0, 1]);
    for (slot, arr) in clip.body_positions() {
        assert_eq!(arr.shape()[0], clip.frame_count);
        for (f, row) in arr.axis_iter(Axis(0)).enumerate() {
            assert!(
                row.iter().any(|&v| v != 0.0),
                "slot {slot} frame {f} must not be an all-zero gap row"
            );
        }
    }
}

/// A zero-body frame leaves a zero row in every projection of every slot.
#[test]
fn zero_body_frame_is_zero_in_every_projection() {
    let tmp = TempDir::new().unwrap();
    let frames = vec![vec![2, 2], vec![], vec![2], vec![]];
    let path = write_clip(tmp.path(), "S001C002P004R002A027", &render(&frames));

    let clip = read_skeleton(&path).unwrap();
    assert_eq!(clip.arrays().len(), 2 * Projection::ALL.len());
    for ((slot, kind), arr) in clip.arrays() {
        assert_eq!(arr.shape(), &[4, NUM_JOINTS, kind.dims()]);
        for empty in [1, 3] {
            assert!(
                arr.index_axis(Axis(0), empty).iter().all(|&v| v == 0.0),
                "slot {slot} {kind} row {empty} must be zero"
            );
        }
    }
}

/// Slots at or above the largest per-frame body count are absent.
#[test]
fn unused_slots_are_absent() {
    let tmp = TempDir::new().unwrap();
    let frames = vec![vec![1], vec![1, 1, 1], vec![1]];
    let path = write_clip(tmp.path(), "S001C001P001R001A001", &render(&frames));

    let clip = read_skeleton(&path).unwrap();
    assert_eq!(clip.max_bodies(), 3);
    assert_eq!(clip.slots(), vec![0, 1, 2]);
    assert!(clip.positions(3).is_none());
}

/// Slot 1 only appears in frame 1, so its other rows stay zero while the
/// slot itself is retained.
#[test]
fn partially_used_slot_keeps_zero_rows() {
    let tmp = TempDir::new().unwrap();
    let frames = vec![vec![1], vec![1, 1], vec![1]];
    let path = write_clip(tmp.path(), "S001C001P001R001A001", &render(&frames));

    let clip = read_skeleton(&path).unwrap();
    let second = clip.positions(1).unwrap();
    assert!(second.index_axis(Axis(0), 0).iter().all(|&v| v == 0.0));
    assert_abs_diff_eq!(second[[1, 0, 1]], 1.0);
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[test]
fn read_options_select_projections() {
    let tmp = TempDir::new().unwrap();
    let path = write_clip(tmp.path(), "S001C001P001R001A001", &render(&[vec![3]]));

    let options = ReadOptions {
        skeleton: false,
        depth: true,
        color: false,
        num_joints: 3,
    };
    let clip = read_skeleton_with(&path, &options).unwrap();
    assert_eq!(clip.joint_count, 3);
    assert!(clip.positions(0).is_none());
    let depth = clip.array(0, Projection::Depth2d).unwrap();
    assert_eq!(depth.shape(), &[1, 3, 2]);
    assert_abs_diff_eq!(depth[[0, 2, 0]], 250.1, epsilon = 1e-4);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn missing_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("S001C001P001R001A001.skeleton");
    let err = read_skeleton(&path).unwrap_err();
    assert!(matches!(err, RecordError::Io { .. }), "{err}");
}

#[test]
fn bad_filename_is_rejected_before_reading() {
    let tmp = TempDir::new().unwrap();
    let path = write_clip(tmp.path(), "clip_001", &render(&[vec![1]]));
    let err = read_skeleton(&path).unwrap_err();
    assert!(matches!(err, RecordError::InvalidFilename { .. }), "{err}");
}

#[test]
fn truncated_file_names_path_and_line() {
    let tmp = TempDir::new().unwrap();
    let full = render(&[vec![2], vec![2]]);
    let cut: String = full.lines().take(7).map(|l| format!("{l}\n")).collect();
    let path = write_clip(tmp.path(), "S001C001P001R001A001", &cut);

    let err = read_skeleton(&path).unwrap_err();
    assert_eq!(err.line(), Some(8));
    assert_eq!(err.path(), Some(path.as_path()));
    assert!(err.to_string().contains("S001C001P001R001A001.skeleton"));
}

#[test]
fn oversized_frame_count_is_rejected_before_allocation() {
    let source = Path::new("S001C001P001R001A001.skeleton");
    let err = parse_skeleton("4000000000000\n", 1, &ReadOptions::default(), source).unwrap_err();
    assert!(matches!(err, RecordError::MalformedRecord { line: 1, .. }), "{err}");
    assert!(err.to_string().contains("4000000000000 frames"));
}
