// Integration test utilities
//
// Builds a results tree of k6-style snapshots with controlled modification
// times so the store ordering is deterministic.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Aggregate values written into one snapshot
#[derive(Debug, Clone, Copy)]
pub struct Run {
    pub p95_ms: f64,
    pub avg_ms: f64,
    pub error_rate: f64,
    pub rps: f64,
}

impl Default for Run {
    fn default() -> Self {
        Self {
            p95_ms: 480.0,
            avg_ms: 210.0,
            error_rate: 0.01,
            rps: 250.0,
        }
    }
}

impl Run {
    pub fn to_json(&self) -> String {
        format!(
            r#"{{
  "metrics": {{
    "http_req_duration": {{"type": "trend", "values": {{"avg": {avg}, "p(95)": {p95}}}}},
    "http_req_failed": {{"type": "rate", "values": {{"rate": {err}}}}},
    "http_reqs": {{"type": "counter", "values": {{"count": 15000, "rate": {rps}}}}}
  }}
}}
"#,
            avg = self.avg_ms,
            p95 = self.p95_ms,
            err = self.error_rate,
            rps = self.rps
        )
    }
}

/// Temporary workspace with `results/` and `reports/` roots
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn results_dir(&self) -> PathBuf {
        self.dir.path().join("results")
    }

    pub fn report_dir(&self) -> PathBuf {
        self.dir.path().join("reports")
    }

    pub fn snapshot_dir(&self, client: &str, test: &str) -> PathBuf {
        let dir = self.results_dir().join(client).join(test);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write a snapshot aged `age_secs` seconds
    pub fn write_run(&self, client: &str, test: &str, name: &str, age_secs: u64, run: Run) {
        self.write_raw(client, test, name, age_secs, &run.to_json());
    }

    pub fn write_raw(&self, client: &str, test: &str, name: &str, age_secs: u64, body: &str) {
        let path = self.snapshot_dir(client, test).join(name);
        fs::write(&path, body).unwrap();
        set_age(&path, age_secs);
    }

    /// Report files written for the identity
    pub fn reports(&self, client: &str, test: &str) -> Vec<PathBuf> {
        let dir = self.report_dir().join(client).join(test);
        match fs::read_dir(dir) {
            Ok(entries) => {
                let mut paths: Vec<PathBuf> = entries.map(|e| e.unwrap().path()).collect();
                paths.sort();
                paths
            }
            Err(_) => Vec::new(),
        }
    }

    /// Command with results and report directories pointed into the workspace
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("loadgate");
        cmd.env_remove("LOADGATE_CLIENT")
            .env_remove("LOADGATE_TEST")
            .env_remove("RUST_LOG")
            .arg("--results-dir")
            .arg(self.results_dir())
            .arg("--report-dir")
            .arg(self.report_dir());
        cmd
    }
}

fn set_age(path: &Path, age_secs: u64) {
    let mtime = SystemTime::now() - Duration::from_secs(age_secs);
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}
