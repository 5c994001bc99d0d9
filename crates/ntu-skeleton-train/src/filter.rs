//! Filename-level clip admission.
//!
//! A clip is admitted when its subject falls in the half of the split
//! selected by the mode and its action label is in the allow-list. The
//! decision uses only the decoded filename, so rejected clips are never
//! opened.

use ntu_skeleton_core::ClipName;
use std::collections::BTreeSet;

use crate::config::DatasetConfig;
use crate::split::SubjectSplit;

/// Action labels admitted by default: drink water (1), kick something (24),
/// jump up (27).
pub const DEFAULT_ACTION_LABELS: [u16; 3] = [1, 24, 27];

/// Subject and label filter applied to clip names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipFilter {
    split: SubjectSplit,
    labels: BTreeSet<u16>,
}

impl ClipFilter {
    /// Create a filter from a split and an action allow-list.
    pub fn new(split: SubjectSplit, labels: impl IntoIterator<Item = u16>) -> Self {
        ClipFilter {
            split,
            labels: labels.into_iter().collect(),
        }
    }

    /// Build the filter described by `config`.
    pub fn from_config(config: &DatasetConfig) -> Self {
        Self::new(config.subject_split(), config.labels.iter().copied())
    }

    /// The subject split in use.
    pub fn split(&self) -> &SubjectSplit {
        &self.split
    }

    /// Returns `true` if `label` is in the allow-list.
    pub fn admits_label(&self, label: u16) -> bool {
        self.labels.contains(&label)
    }

    /// Returns `true` if the clip belongs to the requested mode and carries
    /// an admitted label.
    pub fn accepts(&self, clip: &ClipName, is_train: bool) -> bool {
        self.split.admits(clip.subject, is_train) && self.admits_label(clip.label())
    }
}

impl Default for ClipFilter {
    fn default() -> Self {
        Self::new(SubjectSplit::default(), DEFAULT_ACTION_LABELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(stem: &str) -> ClipName {
        ClipName::parse(stem).unwrap()
    }

    #[test]
    fn default_filter_cross_subject() {
        let filter = ClipFilter::default();
        // Subject 1 trains, label 24 admitted.
        assert!(filter.accepts(&name("S001C001P001R001A024"), true));
        assert!(!filter.accepts(&name("S001C001P001R001A024"), false));
        // Subject 3 evaluates.
        assert!(filter.accepts(&name("S001C001P003R001A027"), false));
        assert!(!filter.accepts(&name("S001C001P003R001A027"), true));
    }

    #[test]
    fn unlisted_label_is_rejected_in_both_modes() {
        let filter = ClipFilter::default();
        for stem in ["S001C001P001R001A002", "S001C001P003R001A060"] {
            let clip = name(stem);
            assert!(!filter.accepts(&clip, true), "{stem} must not train");
            assert!(!filter.accepts(&clip, false), "{stem} must not evaluate");
        }
    }

    #[test]
    fn parity_filter() {
        let filter = ClipFilter::new(SubjectSplit::subject_parity(), DEFAULT_ACTION_LABELS);
        assert!(filter.accepts(&name("S001C001P002R001A001"), true));
        assert!(filter.accepts(&name("S001C001P001R001A001"), false));
    }

    #[test]
    fn from_config_uses_custom_labels() {
        let mut cfg = DatasetConfig::default();
        cfg.labels = vec![60];
        let filter = ClipFilter::from_config(&cfg);
        assert!(filter.admits_label(60));
        assert!(!filter.admits_label(1));
    }
}
