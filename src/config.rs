//! Run configuration: defaults, optional TOML file, command line
//!
//! Precedence, lowest to highest: built-in defaults, `--config` file, flags.
//!
//! # Example TOML
//! ```toml
//! results_dir = "load-results"
//! report_dir = "load-reports"
//! format = "csv"
//!
//! [thresholds]
//! hard_fail_threshold = 15.0
//! top_k = 5
//! ```

use crate::baseline::BaselineSelection;
use crate::catalog::MetricCatalog;
use crate::cli::{Cli, ReportFormat};
use crate::compare::CompareConfig;
use crate::error::{CompareError, Result};
use crate::pipeline::CompareRequest;
use crate::store::TestIdentity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default snapshot directory
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Default report directory
pub const DEFAULT_REPORT_DIR: &str = "reports";

/// Contents of a `--config` file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub results_dir: Option<PathBuf>,
    pub report_dir: Option<PathBuf>,
    /// Catalog file, relative paths resolved against the working directory
    pub catalog: Option<PathBuf>,
    pub format: Option<ReportFormat>,
    pub thresholds: CompareConfig,
}

impl FileConfig {
    /// Load a configuration file
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CompareError::config(format!("failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            CompareError::config(format!("invalid config {}: {e}", path.display()))
        })
    }
}

/// Resolve command-line arguments into a validated comparison request
pub fn resolve(cli: &Cli) -> Result<CompareRequest> {
    let file = match &cli.config {
        Some(path) => FileConfig::from_toml(path)?,
        None => FileConfig::default(),
    };

    let client = cli
        .client
        .as_deref()
        .ok_or_else(|| CompareError::config("missing required --client (or LOADGATE_CLIENT)"))?;
    let test = cli
        .test
        .as_deref()
        .ok_or_else(|| CompareError::config("missing required --test (or LOADGATE_TEST)"))?;
    let identity = TestIdentity::new(client, test)?;

    let mut config = file.thresholds;
    if let Some(floor) = cli.significance_floor {
        config.significance_floor = floor;
    }
    if let Some(flat) = cli.flat_threshold {
        config.summary_flat_threshold = flat;
    }
    if let Some(fail) = cli.fail_threshold {
        config.hard_fail_threshold = fail;
    }
    if let Some(k) = cli.top_k {
        config.top_k = k;
    }
    if let Some(history) = cli.history {
        config.max_history = history;
    }
    config.validate().map_err(CompareError::Configuration)?;

    let catalog = match cli.catalog.as_ref().or(file.catalog.as_ref()) {
        Some(path) => MetricCatalog::from_toml(path)?,
        None => MetricCatalog::builtin()?,
    };

    let selection = if cli.baselines.is_empty() {
        BaselineSelection::MostRecentN(config.max_history)
    } else {
        BaselineSelection::ExplicitList(cli.baselines.clone())
    };

    let results_dir = cli
        .results_dir
        .clone()
        .or(file.results_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR));
    let report_dir = cli
        .report_dir
        .clone()
        .or(file.report_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR));
    // Reports written into the result store would be listed as snapshots
    if same_directory(&results_dir, &report_dir) {
        return Err(CompareError::config(format!(
            "report directory {} must differ from results directory",
            report_dir.display()
        )));
    }

    Ok(CompareRequest {
        identity,
        results_dir,
        report_dir,
        selection,
        config,
        catalog,
        format: cli.format.or(file.format).unwrap_or_default(),
        write_report: !cli.no_report,
    })
}

fn same_directory(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
