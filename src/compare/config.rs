// Thresholds for ranking, summary status and the fail gate
//
// The three percentage thresholds are independent knobs. There is no formula
// relating them; each is a named default that callers may override.

use crate::baseline::MAX_HISTORY;
use serde::{Deserialize, Serialize};

/// Changes at or below this percentage are noise and never ranked
pub const DEFAULT_SIGNIFICANCE_FLOOR: f64 = 1.0;

/// Summary rows at or below this percentage are shown as flat
pub const DEFAULT_SUMMARY_FLAT_THRESHOLD: f64 = 5.0;

/// A ranked degradation above this percentage fails the run
pub const DEFAULT_HARD_FAIL_THRESHOLD: f64 = 10.0;

/// Entries kept per ranked list
pub const DEFAULT_TOP_K: usize = 3;

/// Configuration for snapshot comparison
///
/// # Example
/// ```
/// use loadgate::compare::CompareConfig;
///
/// let config = CompareConfig::default();
/// assert_eq!(config.hard_fail_threshold, 10.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
    /// Minimum |percent delta| for a result to be ranked (exclusive)
    ///
    /// Default: 1.0
    pub significance_floor: f64,

    /// Maximum |percent delta| for a summary row to be flat (inclusive)
    ///
    /// Default: 5.0
    pub summary_flat_threshold: f64,

    /// |percent delta| a ranked degradation must exceed to fail the gate
    ///
    /// Default: 10.0
    pub hard_fail_threshold: f64,

    /// Entries per ranked list
    ///
    /// Default: 3
    pub top_k: usize,

    /// Baselines taken in most-recent mode
    ///
    /// Default: 5
    pub max_history: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            significance_floor: DEFAULT_SIGNIFICANCE_FLOOR,
            summary_flat_threshold: DEFAULT_SUMMARY_FLAT_THRESHOLD,
            hard_fail_threshold: DEFAULT_HARD_FAIL_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            max_history: MAX_HISTORY,
        }
    }
}

impl CompareConfig {
    /// Create a strict configuration (smaller regressions fail the gate)
    pub fn strict() -> Self {
        Self {
            significance_floor: 0.5,
            summary_flat_threshold: 2.0,
            hard_fail_threshold: 5.0,
            top_k: 5,
            max_history: 10,
        }
    }

    /// Create a permissive configuration for noisy environments
    pub fn permissive() -> Self {
        Self {
            significance_floor: 2.0,
            summary_flat_threshold: 10.0,
            hard_fail_threshold: 25.0,
            top_k: 3,
            max_history: 3,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("significance_floor", self.significance_floor),
            ("summary_flat_threshold", self.summary_flat_threshold),
            ("hard_fail_threshold", self.hard_fail_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "{} must be a non-negative percentage, got {}",
                    name, value
                ));
            }
        }

        if self.top_k == 0 {
            return Err("top_k must be >= 1, got 0".to_string());
        }

        if self.max_history == 0 {
            return Err("max_history must be >= 1, got 0".to_string());
        }

        Ok(())
    }
}
