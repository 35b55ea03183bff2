//! JSON report document
//!
//! Stable top-level keys so downstream tooling can rely on them.

use super::ComparisonReport;
use crate::compare::{CompareConfig, ComparisonResult, SummaryTable};
use crate::error::Result;
use crate::gate::GateVerdict;
use crate::snapshot::SnapshotEntry;
use serde::{Deserialize, Serialize};

/// Format identifier written into every JSON report
pub const REPORT_FORMAT: &str = "loadgate-report-v1";

/// Test identity section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonIdentity {
    pub client: String,
    pub test: String,
}

/// Reference to a compared snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSnapshotRef {
    /// Snapshot file name
    pub name: String,
    /// Modification time (RFC 3339)
    pub modified: String,
}

impl From<&SnapshotEntry> for JsonSnapshotRef {
    fn from(entry: &SnapshotEntry) -> Self {
        Self {
            name: entry.name.clone(),
            modified: entry.modified.to_rfc3339(),
        }
    }
}

/// Root JSON report structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Tool version that wrote the report
    pub version: String,
    /// Format name
    pub format: String,
    /// Generation time (RFC 3339)
    pub generated_at: String,
    pub identity: JsonIdentity,
    pub current: JsonSnapshotRef,
    pub baselines: Vec<JsonSnapshotRef>,
    /// Thresholds in effect for this run
    pub thresholds: CompareConfig,
    /// Top-K improvements across all baselines
    pub improvements: Vec<ComparisonResult>,
    /// Top-K degradations across all baselines
    pub degradations: Vec<ComparisonResult>,
    /// Single-baseline summary table
    pub summary: SummaryTable,
    /// Every (metric, baseline) result
    pub comparisons: Vec<ComparisonResult>,
    pub verdict: GateVerdict,
}

impl From<&ComparisonReport> for JsonReport {
    fn from(report: &ComparisonReport) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: REPORT_FORMAT.to_string(),
            generated_at: report.generated_at.to_rfc3339(),
            identity: JsonIdentity {
                client: report.identity.client.clone(),
                test: report.identity.test.clone(),
            },
            current: JsonSnapshotRef::from(&report.current),
            baselines: report.baselines.iter().map(JsonSnapshotRef::from).collect(),
            thresholds: report.config.clone(),
            improvements: report.ranked.improvements.clone(),
            degradations: report.ranked.degradations.clone(),
            summary: report.summary.clone(),
            comparisons: report.comparisons.clone(),
            verdict: report.verdict.clone(),
        }
    }
}

/// Serialize the report as pretty-printed JSON
pub fn to_json_string(report: &ComparisonReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&JsonReport::from(report))?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn test_json_report_stable_keys() {
        let json = to_json_string(&sample_report()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        for key in [
            "version",
            "format",
            "generated_at",
            "identity",
            "current",
            "baselines",
            "thresholds",
            "improvements",
            "degradations",
            "summary",
            "comparisons",
            "verdict",
        ] {
            assert!(parsed.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(parsed["format"], REPORT_FORMAT);
        assert_eq!(parsed["identity"]["client"], "acme");
        assert_eq!(parsed["current"]["name"], "run-002.json");
        assert_eq!(parsed["generated_at"], "2026-10-17T09:30:05+00:00");
    }

    #[test]
    fn test_json_report_verdict_and_lists() {
        let json = to_json_string(&sample_report()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["verdict"]["status"], "fail");
        assert_eq!(
            parsed["verdict"]["regressions"][0]["metric_key"],
            "http_req_failed"
        );
        assert_eq!(parsed["improvements"][0]["classification"], "improvement");
        assert_eq!(parsed["comparisons"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["thresholds"]["hard_fail_threshold"], 10.0);
    }

    #[test]
    fn test_json_report_summary_rows() {
        let json = to_json_string(&sample_report()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let rows = parsed["summary"]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0]["status"], "good");
        assert!(rows[4].get("result").is_none());
        assert_eq!(rows[4]["status"], "missing");
    }
}
