//! Single batch pass: store → baselines → compare → rank → report → gate

use crate::baseline::{select_baselines, BaselineSelection};
use crate::catalog::MetricCatalog;
use crate::cli::ReportFormat;
use crate::compare::{compare_snapshots, rank, summary_table, CompareConfig};
use crate::error::{CompareError, Result, EXIT_OK};
use crate::gate::evaluate;
use crate::report::{write_report, ComparisonReport};
use crate::snapshot::{Snapshot, SnapshotEntry};
use crate::store::{ResultStore, TestIdentity};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Fully resolved inputs of one comparison run
#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub identity: TestIdentity,
    pub results_dir: PathBuf,
    pub report_dir: PathBuf,
    pub selection: BaselineSelection,
    pub config: CompareConfig,
    pub catalog: MetricCatalog,
    pub format: ReportFormat,
    /// Persist the report document (console output is always produced)
    pub write_report: bool,
}

/// What a run produced
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// First run for this identity: nothing to compare, nothing written
    NoHistory { identity: String },
    /// Comparison completed
    Compared {
        report: Box<ComparisonReport>,
        report_path: Option<PathBuf>,
    },
}

impl RunOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoHistory { .. } => EXIT_OK,
            Self::Compared { report, .. } => report.verdict.exit_code(),
        }
    }
}

/// Run a comparison, stamping the report with the current time
pub fn run(request: &CompareRequest) -> Result<RunOutcome> {
    run_at(request, Utc::now())
}

/// Run a comparison with an explicit report timestamp
pub fn run_at(request: &CompareRequest, now: DateTime<Utc>) -> Result<RunOutcome> {
    request
        .config
        .validate()
        .map_err(CompareError::Configuration)?;
    request.catalog.validate()?;

    let store = ResultStore::new(&request.results_dir);
    let entries = match store.list(&request.identity) {
        Ok(entries) => entries,
        Err(e) if e.is_informational() => Vec::new(),
        Err(e) => return Err(e),
    };

    let selected = match select_baselines(&entries, &request.selection, &request.identity) {
        Ok(selected) => selected,
        Err(CompareError::NoHistory { identity }) => {
            tracing::info!("No history for {}, skipping comparison", identity);
            return Ok(RunOutcome::NoHistory { identity });
        }
        Err(e) => return Err(e),
    };

    // Any unreadable snapshot aborts the run before anything is compared
    let current = selected.current.load()?;
    let baselines = selected
        .baselines
        .iter()
        .map(SnapshotEntry::load)
        .collect::<Result<Vec<Snapshot>>>()?;

    let comparisons = compare_snapshots(&request.catalog, &current, &baselines);
    tracing::debug!(
        "{} comparison results for {} baseline(s)",
        comparisons.len(),
        baselines.len()
    );

    let ranked = rank(&comparisons, &request.config);
    let latest = selected
        .most_recent_baseline()
        .map(|b| b.name.clone())
        .unwrap_or_default();
    let summary = summary_table(
        &request.catalog,
        &comparisons,
        &latest,
        request.config.summary_flat_threshold,
    );
    let verdict = evaluate(&ranked.degradations, request.config.hard_fail_threshold);

    let report = ComparisonReport {
        identity: request.identity.clone(),
        generated_at: now,
        current: selected.current,
        baselines: selected.baselines,
        config: request.config.clone(),
        catalog: request.catalog.clone(),
        ranked,
        summary,
        comparisons,
        verdict,
    };

    let report_path = if request.write_report {
        Some(write_report(&report, &request.report_dir, request.format)?)
    } else {
        None
    };

    Ok(RunOutcome::Compared {
        report: Box::new(report),
        report_path,
    })
}
