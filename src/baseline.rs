//! Baseline selection
//!
//! Position 0 of the store listing is the current snapshot. Baselines are
//! either named explicitly by the caller or taken as the N snapshots that
//! immediately precede the current one.

use crate::error::{CompareError, Result};
use crate::snapshot::SnapshotEntry;
use crate::store::TestIdentity;

/// Default number of historical snapshots compared against
pub const MAX_HISTORY: usize = 5;

/// How baselines are chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaselineSelection {
    /// Caller-supplied snapshot file names, in the caller's order
    ExplicitList(Vec<String>),
    /// The N snapshots immediately preceding the current one
    MostRecentN(usize),
}

impl Default for BaselineSelection {
    fn default() -> Self {
        Self::MostRecentN(MAX_HISTORY)
    }
}

/// Current snapshot plus the baselines chosen for it
#[derive(Debug, Clone)]
pub struct SelectedRun {
    pub current: SnapshotEntry,
    pub baselines: Vec<SnapshotEntry>,
}

impl SelectedRun {
    /// Baseline closest in time to the current snapshot
    ///
    /// Explicit lists keep the caller's order, so this is not always the first.
    pub fn most_recent_baseline(&self) -> Option<&SnapshotEntry> {
        self.baselines
            .iter()
            .max_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.name.cmp(&b.name)))
    }
}

/// Choose the current snapshot and its baselines from a descending listing
///
/// # Errors
/// - `NoHistory` when no listing exists or most-recent mode finds nothing
///   before the current snapshot
/// - `MissingBaseline` when an explicit name cannot be resolved, including
///   when the store is empty
/// - `Configuration` for a zero count, an empty explicit list, or an explicit
///   list that names the current snapshot
pub fn select_baselines(
    entries: &[SnapshotEntry],
    selection: &BaselineSelection,
    identity: &TestIdentity,
) -> Result<SelectedRun> {
    let Some((current, history)) = entries.split_first() else {
        // Explicitly requested baselines cannot exist in an empty store
        if let BaselineSelection::ExplicitList(names) = selection {
            if let Some(name) = names.first() {
                return Err(CompareError::MissingBaseline {
                    name: name.clone(),
                    identity: identity.to_string(),
                });
            }
        }
        return Err(CompareError::NoHistory {
            identity: identity.to_string(),
        });
    };

    let baselines = match selection {
        BaselineSelection::MostRecentN(count) => {
            if *count == 0 {
                return Err(CompareError::config("history count must be at least 1"));
            }
            let chosen: Vec<SnapshotEntry> = history.iter().take(*count).cloned().collect();
            if chosen.is_empty() {
                tracing::debug!("Only the current snapshot exists for {}", identity);
                return Err(CompareError::NoHistory {
                    identity: identity.to_string(),
                });
            }
            chosen
        }
        BaselineSelection::ExplicitList(names) => {
            if names.is_empty() {
                return Err(CompareError::config("explicit baseline list is empty"));
            }
            resolve_explicit(current, entries, names, identity)?
        }
    };

    tracing::debug!(
        "Comparing {} against {} baseline(s): {}",
        current.name,
        baselines.len(),
        baselines
            .iter()
            .map(|b| b.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(SelectedRun {
        current: current.clone(),
        baselines,
    })
}

fn resolve_explicit(
    current: &SnapshotEntry,
    entries: &[SnapshotEntry],
    names: &[String],
    identity: &TestIdentity,
) -> Result<Vec<SnapshotEntry>> {
    let mut resolved: Vec<SnapshotEntry> = Vec::with_capacity(names.len());

    for name in names {
        let found = entries
            .iter()
            .find(|e| e.name == *name)
            .or_else(|| entries.iter().find(|e| e.name == format!("{name}.json")))
            .ok_or_else(|| CompareError::MissingBaseline {
                name: name.clone(),
                identity: identity.to_string(),
            })?;

        if found.name == current.name {
            return Err(CompareError::config(format!(
                "baseline '{}' is the current snapshot",
                name
            )));
        }

        if !resolved.iter().any(|r| r.name == found.name) {
            resolved.push(found.clone());
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn listing(count: usize) -> Vec<SnapshotEntry> {
        (0..count)
            .rev()
            .map(|i| SnapshotEntry {
                name: format!("run-{i:03}.json"),
                path: PathBuf::from(format!("run-{i:03}.json")),
                modified: Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap(),
            })
            .collect()
    }

    fn identity() -> TestIdentity {
        TestIdentity::new("acme", "checkout").unwrap()
    }

    fn names(entries: &[SnapshotEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_most_recent_n_takes_following_entries() {
        let entries = listing(8);
        let run = select_baselines(&entries, &BaselineSelection::MostRecentN(3), &identity())
            .unwrap();
        assert_eq!(run.current.name, "run-007.json");
        assert_eq!(
            names(&run.baselines),
            ["run-006.json", "run-005.json", "run-004.json"]
        );
        assert_eq!(run.most_recent_baseline().unwrap().name, "run-006.json");
    }

    #[test]
    fn test_most_recent_n_bounded_by_availability() {
        let entries = listing(3);
        let run = select_baselines(&entries, &BaselineSelection::default(), &identity()).unwrap();
        assert_eq!(run.baselines.len(), 2);
    }

    #[test]
    fn test_single_snapshot_is_no_history() {
        let entries = listing(1);
        let err =
            select_baselines(&entries, &BaselineSelection::default(), &identity()).unwrap_err();
        assert!(err.is_informational());
    }

    #[test]
    fn test_empty_listing_is_no_history() {
        let err = select_baselines(&[], &BaselineSelection::default(), &identity()).unwrap_err();
        assert!(matches!(err, CompareError::NoHistory { .. }));
    }

    #[test]
    fn test_explicit_on_empty_listing_is_missing_baseline() {
        let selection = BaselineSelection::ExplicitList(vec!["run-000.json".to_string()]);
        let err = select_baselines(&[], &selection, &identity()).unwrap_err();
        assert!(matches!(err, CompareError::MissingBaseline { .. }));
    }

    #[test]
    fn test_zero_count_rejected() {
        let entries = listing(3);
        let err = select_baselines(&entries, &BaselineSelection::MostRecentN(0), &identity())
            .unwrap_err();
        assert!(matches!(err, CompareError::Configuration(_)));
    }

    #[test]
    fn test_explicit_list_preserves_order() {
        let entries = listing(5);
        let selection = BaselineSelection::ExplicitList(vec![
            "run-001.json".to_string(),
            "run-003".to_string(),
        ]);
        let run = select_baselines(&entries, &selection, &identity()).unwrap();
        assert_eq!(names(&run.baselines), ["run-001.json", "run-003.json"]);
        assert_eq!(run.most_recent_baseline().unwrap().name, "run-003.json");
    }

    #[test]
    fn test_explicit_list_collapses_duplicates() {
        let entries = listing(3);
        let selection = BaselineSelection::ExplicitList(vec![
            "run-000.json".to_string(),
            "run-000".to_string(),
        ]);
        let run = select_baselines(&entries, &selection, &identity()).unwrap();
        assert_eq!(names(&run.baselines), ["run-000.json"]);
    }

    #[test]
    fn test_explicit_missing_name_fails() {
        let entries = listing(3);
        let selection = BaselineSelection::ExplicitList(vec![
            "run-000.json".to_string(),
            "run-999.json".to_string(),
        ]);
        match select_baselines(&entries, &selection, &identity()) {
            Err(CompareError::MissingBaseline { name, .. }) => assert_eq!(name, "run-999.json"),
            other => panic!("Expected MissingBaseline, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_current_rejected() {
        let entries = listing(3);
        let selection = BaselineSelection::ExplicitList(vec!["run-002.json".to_string()]);
        let err = select_baselines(&entries, &selection, &identity()).unwrap_err();
        assert!(matches!(err, CompareError::Configuration(_)));
    }
}
