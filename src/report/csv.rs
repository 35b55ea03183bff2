//! CSV report document
//!
//! A key/value section describing the run, a blank line, then one row per
//! (metric, baseline) comparison.

use super::ComparisonReport;
use crate::gate::GateVerdict;
use crate::report::json::REPORT_FORMAT;

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row(output: &mut String, fields: &[String]) {
    let escaped: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
    output.push_str(&escaped.join(","));
    output.push('\n');
}

/// Key/value header rows
fn header_rows(report: &ComparisonReport) -> Vec<(&'static str, String)> {
    let baselines: Vec<&str> = report.baselines.iter().map(|b| b.name.as_str()).collect();
    let (verdict, regressions) = match &report.verdict {
        GateVerdict::Pass => ("pass", 0),
        GateVerdict::Fail { regressions } => ("fail", regressions.len()),
    };

    vec![
        ("format", REPORT_FORMAT.to_string()),
        ("version", env!("CARGO_PKG_VERSION").to_string()),
        ("generated_at", report.generated_at.to_rfc3339()),
        ("client", report.identity.client.clone()),
        ("test", report.identity.test.clone()),
        ("current", report.current.name.clone()),
        ("baselines", baselines.join(";")),
        (
            "significance_floor",
            report.config.significance_floor.to_string(),
        ),
        (
            "summary_flat_threshold",
            report.config.summary_flat_threshold.to_string(),
        ),
        (
            "hard_fail_threshold",
            report.config.hard_fail_threshold.to_string(),
        ),
        ("top_k", report.config.top_k.to_string()),
        ("verdict", verdict.to_string()),
        ("regressions", regressions.to_string()),
    ]
}

/// Generate the CSV document as a string
pub fn to_csv(report: &ComparisonReport) -> String {
    let mut output = String::new();

    push_row(&mut output, &["key".to_string(), "value".to_string()]);
    for (key, value) in header_rows(report) {
        push_row(&mut output, &[key.to_string(), value]);
    }
    output.push('\n');

    push_row(
        &mut output,
        &[
            "metric",
            "display_name",
            "unit",
            "baseline",
            "baseline_value",
            "current_value",
            "absolute_delta",
            "percent_delta",
            "classification",
            "ranked",
        ]
        .map(String::from),
    );

    for result in &report.comparisons {
        let (name, unit) = report.metric_label(&result.metric_key);
        let ranked = report.ranked.improvements.contains(result)
            || report.ranked.degradations.contains(result);

        push_row(
            &mut output,
            &[
                result.metric_key.clone(),
                name.to_string(),
                unit.to_string(),
                result.baseline_identity.clone(),
                format!("{:.4}", result.baseline_value),
                format!("{:.4}", result.current_value),
                format!("{:.4}", result.absolute_delta),
                format!("{:.4}", result.percent_delta),
                result.classification.as_str().to_string(),
                ranked.to_string(),
            ],
        );
    }

    output
}
