// Snapshot comparison: per-metric deltas, classification and ranking
//
// The comparator turns (metric, baseline) pairs into an immutable list of
// results. The ranker derives two views from that list: top-K improvements
// and degradations across all baselines, and a single-baseline summary table
// against the most recent baseline.
//
// Thresholds are independent named constants (see `config`):
// - 1% significance floor before ranking
// - 5% flat band for summary status glyphs
// - 10% hard fail threshold for the gate

mod comparator;
mod config;
mod ranker;

pub use comparator::{
    compare_metric, compare_snapshots, compare_values, percent_delta, Classification,
    ComparisonResult,
};
pub use config::{
    CompareConfig, DEFAULT_HARD_FAIL_THRESHOLD, DEFAULT_SIGNIFICANCE_FLOOR,
    DEFAULT_SUMMARY_FLAT_THRESHOLD, DEFAULT_TOP_K,
};
pub use ranker::{
    rank, summary_table, top_changes, RankedChanges, SummaryRow, SummaryStatus, SummaryTable,
};
