//! Load-test metrics snapshots
//!
//! A snapshot maps metric names to either a flat number or an object of named
//! statistics (`{"values": {"avg": .., "p(95)": ..}}`). Documents written by
//! k6 `--summary-export` wrap these entries in a top-level `metrics` object;
//! bare metric maps are accepted too.
//!
//! Extraction is fail-soft: an absent metric or statistic yields `None`.
//! Parsing is fail-hard: a document that is not a JSON object is an error.

use crate::catalog::{MetricDefinition, SCALAR_ACCESSOR};
use crate::error::{CompareError, Result};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// A snapshot file discovered in the result store, not yet parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// File name, the snapshot's identity
    pub name: String,
    /// Full path
    pub path: PathBuf,
    /// Filesystem modification time
    pub modified: DateTime<Utc>,
}

impl SnapshotEntry {
    /// Parse the file behind this entry
    pub fn load(&self) -> Result<Snapshot> {
        let content = fs::read_to_string(&self.path).map_err(|source| CompareError::FileRead {
            path: self.path.clone(),
            source,
        })?;
        let metrics = parse_metrics(&content).map_err(|source| CompareError::Parse {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(
            "Loaded snapshot {} ({} metrics)",
            self.name,
            metrics.len()
        );
        Ok(Snapshot {
            entry: self.clone(),
            metrics,
        })
    }
}

/// One complete metrics capture from a single test execution
#[derive(Debug, Clone)]
pub struct Snapshot {
    entry: SnapshotEntry,
    metrics: Map<String, Value>,
}

impl Snapshot {
    /// Build a snapshot from JSON text, mainly for tests and tooling
    pub fn from_json_str(
        name: impl Into<String>,
        modified: DateTime<Utc>,
        content: &str,
    ) -> std::result::Result<Self, serde_json::Error> {
        let name = name.into();
        Ok(Self {
            entry: SnapshotEntry {
                path: PathBuf::from(&name),
                name,
                modified,
            },
            metrics: parse_metrics(content)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Read a named statistic of a metric entry
    ///
    /// Returns `None` when the entry or the statistic is missing, or the value
    /// is not a finite number.
    pub fn statistic(&self, metric: &str, accessor: &str) -> Option<f64> {
        let value = match self.metrics.get(metric)? {
            Value::Number(n) => n.as_f64(),
            Value::Object(entry) => {
                let stats = match entry.get("values") {
                    Some(Value::Object(values)) => values,
                    _ => entry,
                };
                match stats.get(accessor) {
                    Some(Value::Number(n)) => n.as_f64(),
                    None if accessor == SCALAR_ACCESSOR => {
                        entry.get(SCALAR_ACCESSOR).and_then(Value::as_f64)
                    }
                    _ => None,
                }
            }
            _ => None,
        }?;
        value.is_finite().then_some(value)
    }

    /// Extract a catalog metric with its scale applied
    pub fn extract(&self, metric: &MetricDefinition) -> Option<f64> {
        let scaled = self.statistic(metric.source_key(), &metric.accessor)? * metric.scale;
        scaled.is_finite().then_some(scaled)
    }
}

/// Parse a snapshot document into its metric map
pub fn parse_metrics(content: &str) -> std::result::Result<Map<String, Value>, serde_json::Error> {
    match serde_json::from_str::<Value>(content)? {
        Value::Object(mut root) => match root.remove("metrics") {
            Some(Value::Object(metrics)) => Ok(metrics),
            Some(other) => {
                root.insert("metrics".to_string(), other);
                Ok(root)
            }
            None => Ok(root),
        },
        _ => Err(serde::de::Error::custom(
            "snapshot must be a JSON object of metrics",
        )),
    }
}
