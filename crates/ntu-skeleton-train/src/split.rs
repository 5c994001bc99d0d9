//! Subject-based train/eval split.
//!
//! Two schemes are supported:
//!
//! - [`SplitScheme::CrossSubject`]: a subject trains when its id is in an
//!   injected training set (by default [`CROSS_SUBJECT_TRAINING_IDS`]).
//! - [`SplitScheme::SubjectParity`]: a subject trains when its id is even.
//!   It is configured under the name `cross_setup` but never looks at the
//!   setup number; the upstream loader this mirrors spelled it
//!   `cross_suetup`, which is accepted as an alias.
//!
//! Eval membership is always the complement of train membership.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Subject ids that form the training half of the cross-subject benchmark.
pub const CROSS_SUBJECT_TRAINING_IDS: [u16; 53] = [
    1, 2, 4, 5, 8, 9, 13, 14, 15, 16, 17, 18, 19, 25, 27, 28, 31, 34, 35, 38, 45, 46, 47, 49, 50,
    52, 53, 54, 55, 56, 57, 58, 59, 70, 74, 78, 80, 81, 82, 83, 84, 85, 86, 89, 91, 92, 93, 94, 95,
    97, 98, 100, 103,
];

// ---------------------------------------------------------------------------
// SplitScheme
// ---------------------------------------------------------------------------

/// Rule partitioning subjects into train and eval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SplitScheme {
    /// Membership in an explicit training-subject set.
    #[default]
    #[serde(rename = "cross_subject")]
    CrossSubject,
    /// Even subject ids train, odd ones evaluate.
    #[serde(rename = "cross_setup", alias = "cross_suetup")]
    SubjectParity,
}

impl SplitScheme {
    /// Configuration name of the scheme.
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitScheme::CrossSubject => "cross_subject",
            SplitScheme::SubjectParity => "cross_setup",
        }
    }
}

impl fmt::Display for SplitScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cross_subject" => Ok(SplitScheme::CrossSubject),
            "cross_setup" | "cross_suetup" => Ok(SplitScheme::SubjectParity),
            other => Err(ConfigError::UnknownSplit {
                name: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// SubjectSplit
// ---------------------------------------------------------------------------

/// A split scheme together with the training-subject set it consults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSplit {
    scheme: SplitScheme,
    training_subjects: BTreeSet<u16>,
}

impl SubjectSplit {
    /// Create a split. `training_subjects` is only consulted by
    /// [`SplitScheme::CrossSubject`].
    pub fn new(scheme: SplitScheme, training_subjects: impl IntoIterator<Item = u16>) -> Self {
        SubjectSplit {
            scheme,
            training_subjects: training_subjects.into_iter().collect(),
        }
    }

    /// Cross-subject split over [`CROSS_SUBJECT_TRAINING_IDS`].
    pub fn cross_subject() -> Self {
        Self::new(SplitScheme::CrossSubject, CROSS_SUBJECT_TRAINING_IDS)
    }

    /// Parity split.
    pub fn subject_parity() -> Self {
        Self::new(SplitScheme::SubjectParity, std::iter::empty::<u16>())
    }

    /// The active scheme.
    pub fn scheme(&self) -> SplitScheme {
        self.scheme
    }

    /// Returns `true` if `subject` belongs to the training half.
    pub fn is_training_subject(&self, subject: u16) -> bool {
        match self.scheme {
            SplitScheme::CrossSubject => self.training_subjects.contains(&subject),
            SplitScheme::SubjectParity => subject % 2 == 0,
        }
    }

    /// Returns `true` if `subject` belongs to the half selected by `is_train`.
    pub fn admits(&self, subject: u16, is_train: bool) -> bool {
        self.is_training_subject(subject) == is_train
    }
}

impl Default for SubjectSplit {
    fn default() -> Self {
        Self::cross_subject()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn training_ids_are_sorted_and_unique() {
        let set: BTreeSet<u16> = CROSS_SUBJECT_TRAINING_IDS.into_iter().collect();
        assert_eq!(set.len(), CROSS_SUBJECT_TRAINING_IDS.len());
        assert!(CROSS_SUBJECT_TRAINING_IDS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn cross_subject_membership() {
        let split = SubjectSplit::cross_subject();
        assert!(split.is_training_subject(1));
        assert!(split.is_training_subject(103));
        assert!(!split.is_training_subject(3));
        assert!(!split.is_training_subject(104));
    }

    #[test]
    fn parity_membership() {
        let split = SubjectSplit::subject_parity();
        assert!(split.is_training_subject(2));
        assert!(split.is_training_subject(0));
        assert!(!split.is_training_subject(1));
        // The training list is ignored under parity.
        assert!(!split.is_training_subject(13));
    }

    #[test]
    fn admits_is_exclusive() {
        for split in [SubjectSplit::cross_subject(), SubjectSplit::subject_parity()] {
            for sid in 0..120u16 {
                assert_ne!(split.admits(sid, true), split.admits(sid, false));
            }
        }
    }

    #[test]
    fn injected_training_set() {
        let split = SubjectSplit::new(SplitScheme::CrossSubject, [7, 9]);
        assert!(split.admits(7, true));
        assert!(split.admits(1, false));
    }

    #[test]
    fn scheme_names() {
        assert_eq!("cross_subject".parse::<SplitScheme>().unwrap(), SplitScheme::CrossSubject);
        assert_eq!("cross_setup".parse::<SplitScheme>().unwrap(), SplitScheme::SubjectParity);
        assert_eq!("cross_suetup".parse::<SplitScheme>().unwrap(), SplitScheme::SubjectParity);
        assert!(matches!(
            "cross_view".parse::<SplitScheme>(),
            Err(ConfigError::UnknownSplit { .. })
        ));
        assert_eq!(SplitScheme::SubjectParity.to_string(), "cross_setup");
    }

    #[test]
    fn scheme_serde_names() {
        let json = serde_json::to_string(&SplitScheme::SubjectParity).unwrap();
        assert_eq!(json, "\"cross_setup\"");
        let alias: SplitScheme = serde_json::from_str("\"cross_suetup\"").unwrap();
        assert_eq!(alias, SplitScheme::SubjectParity);
        assert!(serde_json::from_str::<SplitScheme>("\"cross_view\"").is_err());
    }
}
