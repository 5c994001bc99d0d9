//! Integration tests for [`ntu_skeleton_train::config`].
//!
//! All tests are deterministic: they use only fixed values and the
//! `DatasetConfig::default()` constructor.

use ntu_skeleton_train::config::{DatasetConfig, DEFAULT_MAX_LEN};
use ntu_skeleton_train::error::ConfigError;
use ntu_skeleton_train::split::{SplitScheme, CROSS_SUBJECT_TRAINING_IDS};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Default config invariants
// ---------------------------------------------------------------------------

/// The default configuration must pass its own validation.
#[test]
fn default_config_is_valid() {
    let cfg = DatasetConfig::default();
    cfg.validate()
        .expect("default DatasetConfig must be valid");
}

/// Defaults match the benchmark loader this crate reproduces.
#[test]
fn default_config_values() {
    let cfg = DatasetConfig::default();
    assert_eq!(cfg.seq_len, 10);
    assert_eq!(cfg.stride, 1);
    assert!(cfg.is_train);
    assert_eq!(cfg.split, SplitScheme::CrossSubject);
    assert_eq!(cfg.max_len, DEFAULT_MAX_LEN);
    assert_eq!(cfg.labels, vec![1, 24, 27]);
    assert_eq!(cfg.training_subjects, CROSS_SUBJECT_TRAINING_IDS.to_vec());
    assert_eq!(cfg.num_joints, 25);
}

/// `new` overrides the five construction parameters only.
#[test]
fn new_keeps_remaining_defaults() {
    let cfg = DatasetConfig::new("/data/ntu", 16, 2, false, SplitScheme::SubjectParity);
    assert_eq!(cfg.seq_len, 16);
    assert_eq!(cfg.stride, 2);
    assert!(!cfg.is_train);
    assert_eq!(cfg.max_len, DEFAULT_MAX_LEN);
    assert_eq!(cfg.labels, vec![1, 24, 27]);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn zero_num_joints_is_invalid() {
    let mut cfg = DatasetConfig::default();
    cfg.num_joints = 0;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::InvalidValue {
            field: "num_joints",
            ..
        })
    ));
}

/// A stride of zero is allowed: the target then equals the input.
#[test]
fn zero_stride_is_valid() {
    let mut cfg = DatasetConfig::default();
    cfg.stride = 0;
    assert!(cfg.validate().is_ok());
}

/// A window span that does not fit in `usize` is rejected.
#[test]
fn overflowing_window_span_is_invalid() {
    let cfg = DatasetConfig {
        stride: usize::MAX,
        ..DatasetConfig::default()
    };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::InvalidValue {
            field: "stride",
            ..
        })
    ));

    let cfg = DatasetConfig {
        seq_len: usize::MAX,
        stride: 0,
        ..DatasetConfig::default()
    };
    assert!(cfg.validate().is_ok());
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[test]
fn missing_config_file_is_file_read_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("absent.json");
    let err = DatasetConfig::from_json(&path).unwrap_err();
    assert!(matches!(err, ConfigError::FileRead { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn invalid_values_in_json_fail_validation() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");
    std::fs::write(&path, r#"{"labels": []}"#).unwrap();
    assert!(matches!(
        DatasetConfig::from_json(&path),
        Err(ConfigError::InvalidValue {
            field: "labels",
            ..
        })
    ));
}

#[test]
fn serialized_split_uses_configuration_name() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.json");
    DatasetConfig::new("/data", 4, 1, true, SplitScheme::SubjectParity)
        .to_json(&path)
        .unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"cross_setup\""), "got {text}");
}
