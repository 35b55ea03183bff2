//! Comparison report: console rendering and persisted document
//!
//! Both artifacts are rendered from the same [`ComparisonReport`]. The
//! persisted document is assembled fully in memory and written through a
//! temporary file in the destination directory that is renamed into place, so
//! a failed write never leaves a partial report behind.

pub mod console;
pub mod csv;
pub mod json;

use crate::catalog::MetricCatalog;
use crate::cli::ReportFormat;
use crate::compare::{CompareConfig, ComparisonResult, RankedChanges, SummaryTable};
use crate::error::{CompareError, Result};
use crate::gate::GateVerdict;
use crate::snapshot::SnapshotEntry;
use crate::store::TestIdentity;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Everything one comparison run produced
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub identity: TestIdentity,
    pub generated_at: DateTime<Utc>,
    pub current: SnapshotEntry,
    pub baselines: Vec<SnapshotEntry>,
    pub config: CompareConfig,
    pub catalog: MetricCatalog,
    pub ranked: RankedChanges,
    pub summary: SummaryTable,
    /// Every (metric, baseline) result, unfiltered
    pub comparisons: Vec<ComparisonResult>,
    pub verdict: GateVerdict,
}

impl ComparisonReport {
    /// Display name and unit for a metric key, falling back to the key
    pub fn metric_label<'a>(&'a self, key: &'a str) -> (&'a str, &'a str) {
        self.catalog
            .get(key)
            .map_or((key, ""), |m| (m.display_name.as_str(), m.unit.as_str()))
    }

    /// Render the persisted document in `format`
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => json::to_json_string(self),
            ReportFormat::Csv => Ok(csv::to_csv(self)),
        }
    }
}

/// Path of the report for `identity` generated at `generated_at`
///
/// `<report_dir>/<client>/<test>/comparison-<YYYYMMDDTHHMMSSZ>.<ext>`
pub fn report_path(
    report_dir: &Path,
    identity: &TestIdentity,
    generated_at: DateTime<Utc>,
    format: ReportFormat,
) -> PathBuf {
    report_dir.join(identity.relative_dir()).join(format!(
        "comparison-{}.{}",
        generated_at.format("%Y%m%dT%H%M%SZ"),
        format.extension()
    ))
}

/// Render and persist the report, returning the written path
pub fn write_report(
    report: &ComparisonReport,
    report_dir: &Path,
    format: ReportFormat,
) -> Result<PathBuf> {
    let path = report_path(report_dir, &report.identity, report.generated_at, format);
    let document = report.render(format)?;
    write_atomic(&path, document.as_bytes())?;
    tracing::info!("Wrote {} report to {}", format.extension(), path.display());
    Ok(path)
}

/// Write `contents` to `path` in one step via temp file and rename
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let write_err = |source: std::io::Error| CompareError::ReportWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Format a value with its unit, e.g. `420.00 ms`
pub(crate) fn format_value(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{:.2}", value)
    } else {
        format!("{:.2} {}", value, unit)
    }
}

/// Format a signed percentage, e.g. `-12.50%`
pub(crate) fn format_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}
