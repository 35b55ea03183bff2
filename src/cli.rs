//! CLI argument parsing for loadgate

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Format of the persisted report document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// JSON document for machine parsing (default)
    #[default]
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

impl ReportFormat {
    /// File extension for reports in this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "loadgate")]
#[command(version)]
#[command(
    about = "Compare a load-test snapshot against its history and gate on regressions",
    long_about = None
)]
pub struct Cli {
    /// Client name (first component of the test identity)
    #[arg(long, env = "LOADGATE_CLIENT", value_name = "CLIENT")]
    pub client: Option<String>,

    /// Test name (second component of the test identity)
    #[arg(long, env = "LOADGATE_TEST", value_name = "TEST")]
    pub test: Option<String>,

    /// Directory holding <client>/<test>/*.json snapshots (default: results)
    #[arg(long = "results-dir", value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    /// Directory reports are written under (default: reports)
    #[arg(long = "report-dir", value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Compare against these snapshot files instead of the most recent ones
    #[arg(
        short = 'b',
        long = "baseline",
        value_name = "NAME",
        value_delimiter = ','
    )]
    pub baselines: Vec<String>,

    /// Number of preceding snapshots to compare against (default: 5)
    #[arg(long = "history", value_name = "N")]
    pub history: Option<usize>,

    /// Entries per ranked list (default: 3)
    #[arg(long = "top-k", value_name = "K")]
    pub top_k: Option<usize>,

    /// Minimum percent change to rank a result (default: 1.0)
    #[arg(long = "significance-floor", value_name = "PCT")]
    pub significance_floor: Option<f64>,

    /// Percent change shown as flat in the summary table (default: 5.0)
    #[arg(long = "flat-threshold", value_name = "PCT")]
    pub flat_threshold: Option<f64>,

    /// Percent degradation that fails the run (default: 10.0)
    #[arg(long = "fail-threshold", value_name = "PCT")]
    pub fail_threshold: Option<f64>,

    /// TOML metric catalog replacing the built-in one
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// TOML configuration file (directories, catalog, thresholds)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report format (json or csv)
    #[arg(long = "format", value_enum)]
    pub format: Option<ReportFormat>,

    /// Print the console report only, do not persist a report file
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_identity() {
        let cli = Cli::parse_from(["loadgate", "--client", "acme", "--test", "checkout"]);
        assert_eq!(cli.client.as_deref(), Some("acme"));
        assert_eq!(cli.test.as_deref(), Some("checkout"));
        assert!(cli.baselines.is_empty());
        assert!(!cli.no_report);
    }

    #[test]
    fn test_cli_baselines_repeatable_and_comma_separated() {
        let cli = Cli::parse_from([
            "loadgate",
            "--baseline",
            "run-1.json,run-2.json",
            "-b",
            "run-3.json",
        ]);
        assert_eq!(cli.baselines, ["run-1.json", "run-2.json", "run-3.json"]);
    }

    #[test]
    fn test_cli_thresholds() {
        let cli = Cli::parse_from([
            "loadgate",
            "--significance-floor",
            "2.5",
            "--flat-threshold",
            "4",
            "--fail-threshold",
            "20",
            "--top-k",
            "5",
            "--history",
            "2",
        ]);
        assert_eq!(cli.significance_floor, Some(2.5));
        assert_eq!(cli.flat_threshold, Some(4.0));
        assert_eq!(cli.fail_threshold, Some(20.0));
        assert_eq!(cli.top_k, Some(5));
        assert_eq!(cli.history, Some(2));
    }

    #[test]
    fn test_cli_thresholds_default_unset() {
        let cli = Cli::parse_from(["loadgate"]);
        assert!(cli.significance_floor.is_none());
        assert!(cli.fail_threshold.is_none());
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_cli_format_csv() {
        let cli = Cli::parse_from(["loadgate", "--format", "csv", "--no-report"]);
        assert_eq!(cli.format, Some(ReportFormat::Csv));
        assert!(cli.no_report);
    }

    #[test]
    fn test_report_format_extension() {
        assert_eq!(ReportFormat::Json.extension(), "json");
        assert_eq!(ReportFormat::Csv.extension(), "csv");
        assert_eq!(ReportFormat::default(), ReportFormat::Json);
    }
}
