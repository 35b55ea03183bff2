// Per-metric comparison of the current snapshot against each baseline
//
// Pure numeric code: no I/O, no shared state. The same inputs always produce
// the same collection of results, in baseline order then catalog order.

use crate::catalog::{MetricCatalog, MetricDefinition};
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};

/// Direction of a change relative to the metric's notion of "better"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Improvement,
    Degradation,
    Neutral,
}

impl Classification {
    /// Classify a delta by its sign and the metric's direction
    pub fn from_delta(absolute_delta: f64, lower_is_better: bool) -> Self {
        if absolute_delta == 0.0 {
            Self::Neutral
        } else if (absolute_delta < 0.0) == lower_is_better {
            Self::Improvement
        } else {
            Self::Degradation
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improvement => "improvement",
            Self::Degradation => "degradation",
            Self::Neutral => "neutral",
        }
    }
}

/// Outcome of comparing one metric against one baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub metric_key: String,
    pub current_value: f64,
    pub baseline_value: f64,
    /// File name of the baseline snapshot
    pub baseline_identity: String,
    pub absolute_delta: f64,
    pub percent_delta: f64,
    pub classification: Classification,
}

impl ComparisonResult {
    /// Magnitude of the percentage change, used for ranking and thresholds
    pub fn magnitude(&self) -> f64 {
        self.percent_delta.abs()
    }
}

/// Percentage change relative to the baseline; zero when the baseline is zero
pub fn percent_delta(absolute_delta: f64, baseline_value: f64) -> f64 {
    if baseline_value != 0.0 {
        absolute_delta / baseline_value * 100.0
    } else {
        0.0
    }
}

/// Compare already-extracted values for one metric
pub fn compare_values(
    metric: &MetricDefinition,
    current_value: f64,
    baseline_value: f64,
    baseline_identity: &str,
) -> ComparisonResult {
    let absolute_delta = current_value - baseline_value;
    ComparisonResult {
        metric_key: metric.key.clone(),
        current_value,
        baseline_value,
        baseline_identity: baseline_identity.to_string(),
        absolute_delta,
        percent_delta: percent_delta(absolute_delta, baseline_value),
        classification: Classification::from_delta(absolute_delta, metric.lower_is_better),
    }
}

/// Compare one metric between two snapshots
///
/// Returns `None` when the metric is absent from either side.
pub fn compare_metric(
    metric: &MetricDefinition,
    current: &Snapshot,
    baseline: &Snapshot,
) -> Option<ComparisonResult> {
    let Some(current_value) = current.extract(metric) else {
        tracing::debug!("{} missing from current {}", metric.key, current.name());
        return None;
    };
    let Some(baseline_value) = baseline.extract(metric) else {
        tracing::debug!("{} missing from baseline {}", metric.key, baseline.name());
        return None;
    };
    let result = compare_values(metric, current_value, baseline_value, baseline.name());
    if !result.absolute_delta.is_finite() || !result.percent_delta.is_finite() {
        tracing::debug!(
            "{} delta overflows against baseline {}",
            metric.key,
            baseline.name()
        );
        return None;
    }
    Some(result)
}

/// Compare every catalog metric against every baseline
///
/// # Example
/// ```
/// use chrono::Utc;
/// use loadgate::catalog::{MetricCatalog, MetricDefinition};
/// use loadgate::compare::{compare_snapshots, Classification};
/// use loadgate::snapshot::Snapshot;
///
/// let catalog = MetricCatalog::new(vec![
///     MetricDefinition::new("http_req_duration", "p95", "p(95)", "ms", true),
/// ]).unwrap();
/// let current = Snapshot::from_json_str(
///     "b.json", Utc::now(), r#"{"http_req_duration": {"values": {"p(95)": 420}}}"#,
/// ).unwrap();
/// let baseline = Snapshot::from_json_str(
///     "a.json", Utc::now(), r#"{"http_req_duration": {"values": {"p(95)": 480}}}"#,
/// ).unwrap();
///
/// let results = compare_snapshots(&catalog, &current, &[baseline]);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].classification, Classification::Improvement);
/// ```
pub fn compare_snapshots(
    catalog: &MetricCatalog,
    current: &Snapshot,
    baselines: &[Snapshot],
) -> Vec<ComparisonResult> {
    baselines
        .iter()
        .flat_map(move |baseline| {
            catalog
                .metrics()
                .iter()
                .filter_map(move |metric| compare_metric(metric, current, baseline))
        })
        .collect()
}
