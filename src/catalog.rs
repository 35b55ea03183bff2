//! Metric catalog: the enumerable table of comparable metrics
//!
//! Every supported metric and its direction is declared once, either by the
//! embedded `metrics-default.toml` or by a user catalog file, and validated
//! before any snapshot is read.

use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const DEFAULT_CATALOG: &str = include_str!("../metrics-default.toml");

/// Accessor that reads a flat scalar metric entry
pub const SCALAR_ACCESSOR: &str = "value";

fn default_scale() -> f64 {
    1.0
}

/// One comparable metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricDefinition {
    /// Unique key used in reports
    pub key: String,

    /// Human-readable name for console output
    pub display_name: String,

    /// Snapshot entry to read (defaults to `key`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Statistic inside the entry, e.g. `p(95)`, `avg`, `rate`
    pub accessor: String,

    /// Unit label after scaling
    #[serde(default)]
    pub unit: String,

    /// Whether a decrease is an improvement
    pub lower_is_better: bool,

    /// Multiplier applied to both sides (e.g. 100 for rate → percent)
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl MetricDefinition {
    /// Create a definition reading `accessor` from the entry named `key`
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        accessor: impl Into<String>,
        unit: impl Into<String>,
        lower_is_better: bool,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            source: None,
            accessor: accessor.into(),
            unit: unit.into(),
            lower_is_better,
            scale: 1.0,
        }
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Read from a differently named snapshot entry
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Snapshot entry this metric is read from
    pub fn source_key(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.key)
    }
}

/// Validated, ordered set of metric definitions
#[derive(Debug, Clone)]
pub struct MetricCatalog {
    metrics: Vec<MetricDefinition>,
}

#[derive(Deserialize)]
struct CatalogFile {
    metric: Vec<MetricDefinition>,
}

impl MetricCatalog {
    /// Build a catalog from definitions, validating them
    pub fn new(metrics: Vec<MetricDefinition>) -> Result<Self> {
        let catalog = Self { metrics };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Built-in catalog for k6-style snapshots
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CATALOG)
    }

    /// Parse a catalog from TOML text
    ///
    /// # Example TOML
    /// ```toml
    /// [[metric]]
    /// key = "http_req_failed"
    /// display_name = "HTTP error rate"
    /// accessor = "rate"
    /// unit = "%"
    /// lower_is_better = true
    /// scale = 100.0
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| CompareError::config(format!("invalid metric catalog: {e}")))?;
        Self::new(file.metric)
    }

    /// Load a catalog file that replaces the built-in one
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CompareError::config(format!(
                "failed to read metric catalog {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Check keys are unique and every definition is usable
    pub fn validate(&self) -> Result<()> {
        if self.metrics.is_empty() {
            return Err(CompareError::config("metric catalog is empty"));
        }

        let mut seen = HashSet::new();
        for metric in &self.metrics {
            if metric.key.trim().is_empty() {
                return Err(CompareError::config("metric with empty key in catalog"));
            }
            if !seen.insert(metric.key.as_str()) {
                return Err(CompareError::config(format!(
                    "duplicate metric key '{}' in catalog",
                    metric.key
                )));
            }
            if metric.accessor.trim().is_empty() {
                return Err(CompareError::config(format!(
                    "metric '{}' has an empty accessor",
                    metric.key
                )));
            }
            if metric.source.as_deref().is_some_and(|s| s.trim().is_empty()) {
                return Err(CompareError::config(format!(
                    "metric '{}' has an empty source",
                    metric.key
                )));
            }
            if !metric.scale.is_finite() || metric.scale == 0.0 {
                return Err(CompareError::config(format!(
                    "metric '{}' has invalid scale {}",
                    metric.key, metric.scale
                )));
            }
        }

        Ok(())
    }

    /// Definitions in declaration order
    pub fn metrics(&self) -> &[MetricDefinition] {
        &self.metrics
    }

    /// Look up a definition by key
    pub fn get(&self, key: &str) -> Option<&MetricDefinition> {
        self.metrics.iter().find(|m| m.key == key)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
