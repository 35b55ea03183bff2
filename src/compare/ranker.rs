// Ranking and summary views over comparison results
//
// Two deliberately different views of the same results:
// - ranked lists across all baselines, surfacing the largest changes
// - a summary table against the most recent baseline only, one row per
//   catalog metric, for quick visual scanning

use crate::catalog::MetricCatalog;
use crate::compare::comparator::{Classification, ComparisonResult};
use crate::compare::config::CompareConfig;
use serde::{Deserialize, Serialize};

/// Top improvements and degradations above the significance floor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedChanges {
    pub improvements: Vec<ComparisonResult>,
    pub degradations: Vec<ComparisonResult>,
}

/// Select the `k` largest changes of one classification
///
/// Results with `|percent_delta| <= floor` are dropped. Sorting is stable, so
/// equal magnitudes keep comparator order.
pub fn top_changes(
    results: &[ComparisonResult],
    classification: Classification,
    floor: f64,
    k: usize,
) -> Vec<ComparisonResult> {
    let mut selected: Vec<&ComparisonResult> = results
        .iter()
        .filter(|r| r.classification == classification && r.magnitude() > floor)
        .collect();
    selected.sort_by(|a, b| b.magnitude().total_cmp(&a.magnitude()));
    selected.into_iter().take(k).cloned().collect()
}

/// Rank improvements and degradations using the configured floor and K
pub fn rank(results: &[ComparisonResult], config: &CompareConfig) -> RankedChanges {
    RankedChanges {
        improvements: top_changes(
            results,
            Classification::Improvement,
            config.significance_floor,
            config.top_k,
        ),
        degradations: top_changes(
            results,
            Classification::Degradation,
            config.significance_floor,
            config.top_k,
        ),
    }
}

/// Status glyph category of a summary row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStatus {
    Good,
    Bad,
    Flat,
    /// Metric absent from the current or the baseline snapshot
    Missing,
}

impl SummaryStatus {
    /// Status for a change, flat when within `flat_threshold` percent
    pub fn from_result(result: &ComparisonResult, flat_threshold: f64) -> Self {
        if result.magnitude() <= flat_threshold {
            return Self::Flat;
        }
        match result.classification {
            Classification::Improvement => Self::Good,
            Classification::Degradation => Self::Bad,
            Classification::Neutral => Self::Flat,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Good => "✅",
            Self::Bad => "❌",
            Self::Flat => "➖",
            Self::Missing => "❔",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
            Self::Flat => "flat",
            Self::Missing => "missing",
        }
    }
}

/// One row of the single-baseline summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub metric_key: String,
    pub display_name: String,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ComparisonResult>,
    pub status: SummaryStatus,
}

/// Summary against a single baseline, covering every catalog metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    /// File name of the most recent baseline
    pub baseline: String,
    pub rows: Vec<SummaryRow>,
}

/// Build the summary table for `baseline` from the full result set
pub fn summary_table(
    catalog: &MetricCatalog,
    results: &[ComparisonResult],
    baseline: &str,
    flat_threshold: f64,
) -> SummaryTable {
    let rows = catalog
        .metrics()
        .iter()
        .map(|metric| {
            let result = results
                .iter()
                .find(|r| r.baseline_identity == baseline && r.metric_key == metric.key)
                .cloned();
            let status = result
                .as_ref()
                .map_or(SummaryStatus::Missing, |r| {
                    SummaryStatus::from_result(r, flat_threshold)
                });
            SummaryRow {
                metric_key: metric.key.clone(),
                display_name: metric.display_name.clone(),
                unit: metric.unit.clone(),
                result,
                status,
            }
        })
        .collect();

    SummaryTable {
        baseline: baseline.to_string(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(key: &str, baseline: &str, pct: f64, class: Classification) -> ComparisonResult {
        ComparisonResult {
            metric_key: key.to_string(),
            current_value: 100.0 + pct,
            baseline_value: 100.0,
            baseline_identity: baseline.to_string(),
            absolute_delta: pct,
            percent_delta: pct,
            classification: class,
        }
    }

    #[test]
    fn test_top_changes_filters_floor_exclusive() {
        let results = vec![
            result("a", "b1", 1.0, Classification::Degradation),
            result("b", "b1", 1.5, Classification::Degradation),
        ];
        let top = top_changes(&results, Classification::Degradation, 1.0, 3);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].metric_key, "b");
    }

    #[test]
    fn test_top_changes_sorted_by_magnitude_and_truncated() {
        let results = vec![
            result("a", "b1", -5.0, Classification::Improvement),
            result("b", "b1", -40.0, Classification::Improvement),
            result("c", "b2", -12.0, Classification::Improvement),
            result("d", "b2", -20.0, Classification::Improvement),
            result("e", "b2", 30.0, Classification::Degradation),
        ];
        let top = top_changes(&results, Classification::Improvement, 1.0, 3);
        let keys: Vec<_> = top.iter().map(|r| r.metric_key.as_str()).collect();
        assert_eq!(keys, ["b", "d", "c"]);
    }

    #[test]
    fn test_top_changes_ties_keep_order() {
        let results = vec![
            result("first", "b1", 10.0, Classification::Degradation),
            result("second", "b2", -10.0, Classification::Degradation),
        ];
        let top = top_changes(&results, Classification::Degradation, 1.0, 3);
        assert_eq!(top[0].metric_key, "first");
        assert_eq!(top[1].metric_key, "second");
    }

    #[test]
    fn test_rank_splits_classifications() {
        let results = vec![
            result("a", "b1", -5.0, Classification::Improvement),
            result("b", "b1", 8.0, Classification::Degradation),
            result("c", "b1", 0.0, Classification::Neutral),
        ];
        let ranked = rank(&results, &CompareConfig::default());
        assert_eq!(ranked.improvements.len(), 1);
        assert_eq!(ranked.degradations.len(), 1);
    }

    #[test]
    fn test_summary_status_thresholds() {
        let flat = result("a", "b1", 5.0, Classification::Degradation);
        let bad = result("a", "b1", 5.1, Classification::Degradation);
        let good = result("a", "b1", -6.0, Classification::Improvement);
        assert_eq!(SummaryStatus::from_result(&flat, 5.0), SummaryStatus::Flat);
        assert_eq!(SummaryStatus::from_result(&bad, 5.0), SummaryStatus::Bad);
        assert_eq!(SummaryStatus::from_result(&good, 5.0), SummaryStatus::Good);
    }

    #[test]
    fn test_summary_table_uses_single_baseline_and_covers_catalog() {
        use crate::catalog::{MetricCatalog, MetricDefinition};

        let catalog = MetricCatalog::new(vec![
            MetricDefinition::new("a", "A", "avg", "ms", true),
            MetricDefinition::new("b", "B", "avg", "ms", true),
        ])
        .unwrap();
        let results = vec![
            result("a", "older.json", 50.0, Classification::Degradation),
            result("a", "newest.json", -2.0, Classification::Improvement),
        ];

        let table = summary_table(&catalog, &results, "newest.json", 5.0);
        assert_eq!(table.baseline, "newest.json");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].status, SummaryStatus::Flat);
        assert_eq!(
            table.rows[0].result.as_ref().unwrap().baseline_identity,
            "newest.json"
        );
        assert_eq!(table.rows[1].status, SummaryStatus::Missing);
        assert!(table.rows[1].result.is_none());
    }
}
