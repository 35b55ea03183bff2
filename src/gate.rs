//! Exit policy: turns ranked degradations into a pass/fail signal
//!
//! A run fails when at least one ranked degradation exceeds the hard fail
//! threshold. The verdict carries the offending results so the caller can
//! name them in its final message.

use crate::compare::ComparisonResult;
use crate::error::{EXIT_OK, EXIT_REGRESSION};
use serde::{Deserialize, Serialize};

/// Outcome of the regression gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GateVerdict {
    /// No degradation above the hard fail threshold
    Pass,
    /// At least one degradation above the hard fail threshold
    Fail { regressions: Vec<ComparisonResult> },
}

impl GateVerdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Process exit code for this verdict
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Pass => EXIT_OK,
            Self::Fail { .. } => EXIT_REGRESSION,
        }
    }

    /// One-line message for the end of the console output
    pub fn message(&self, threshold: f64) -> String {
        match self {
            Self::Pass => format!("PASS: no degradation above {threshold}%"),
            Self::Fail { regressions } => {
                let listed: Vec<String> = regressions
                    .iter()
                    .map(|r| {
                        format!(
                            "{} {:+.2}% vs {}",
                            r.metric_key, r.percent_delta, r.baseline_identity
                        )
                    })
                    .collect();
                format!(
                    "FAIL: {} regression(s) above {}%: {}",
                    regressions.len(),
                    threshold,
                    listed.join(", ")
                )
            }
        }
    }
}

/// Evaluate the gate over the ranker's degradation list
///
/// # Example
/// ```
/// use loadgate::gate::{evaluate, GateVerdict};
///
/// assert_eq!(evaluate(&[], 10.0), GateVerdict::Pass);
/// ```
pub fn evaluate(degradations: &[ComparisonResult], hard_fail_threshold: f64) -> GateVerdict {
    let regressions: Vec<ComparisonResult> = degradations
        .iter()
        .filter(|r| r.magnitude() > hard_fail_threshold)
        .cloned()
        .collect();

    if regressions.is_empty() {
        GateVerdict::Pass
    } else {
        tracing::debug!(
            "{} degradation(s) above {}% hard fail threshold",
            regressions.len(),
            hard_fail_threshold
        );
        GateVerdict::Fail { regressions }
    }
}
