//! Console rendering of a comparison report

use super::{format_percent, format_value, ComparisonReport};
use crate::compare::ComparisonResult;

const RULE: &str = "─────────────────────────────────────────────────────────────────────────────";

/// Render the grouped console report: improvements, degradations, summary
pub fn render_console(report: &ComparisonReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Performance comparison: {} ===\n", report.identity));
    out.push_str(&format!(
        "Current:   {} ({})\n",
        report.current.name,
        report.current.modified.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    let baselines: Vec<&str> = report.baselines.iter().map(|b| b.name.as_str()).collect();
    out.push_str(&format!("Baselines: {}\n", baselines.join(", ")));
    out.push_str(&format!(
        "Compared:  {} metric/baseline pairs\n\n",
        report.comparisons.len()
    ));

    render_ranked(
        &mut out,
        report,
        "📈 Top improvements",
        &report.ranked.improvements,
    );
    render_ranked(
        &mut out,
        report,
        "📉 Top degradations",
        &report.ranked.degradations,
    );
    render_summary(&mut out, report);

    out
}

fn render_ranked(
    out: &mut String,
    report: &ComparisonReport,
    title: &str,
    entries: &[ComparisonResult],
) {
    out.push_str(&format!(
        "{} (> {}% change):\n",
        title, report.config.significance_floor
    ));
    if entries.is_empty() {
        out.push_str("  (none)\n\n");
        return;
    }
    for entry in entries {
        let (name, unit) = report.metric_label(&entry.metric_key);
        out.push_str(&format!(
            "  {:<28} {:>14} -> {:<14} {:>10}  vs {}\n",
            name,
            format_value(entry.baseline_value, unit),
            format_value(entry.current_value, unit),
            format_percent(entry.percent_delta),
            entry.baseline_identity
        ));
    }
    out.push('\n');
}

fn render_summary(out: &mut String, report: &ComparisonReport) {
    out.push_str(&format!("📊 Summary vs {}:\n", report.summary.baseline));
    out.push_str(&format!(
        "  {:<2} {:<28} {:>14} {:>14} {:>10}  {}\n",
        "", "Metric", "Baseline", "Current", "Change", "Status"
    ));
    out.push_str(&format!("  {}\n", RULE));

    for row in &report.summary.rows {
        match &row.result {
            Some(result) => out.push_str(&format!(
                "  {:<2} {:<28} {:>14} {:>14} {:>10}  {}\n",
                row.status.symbol(),
                row.display_name,
                format_value(result.baseline_value, &row.unit),
                format_value(result.current_value, &row.unit),
                format_percent(result.percent_delta),
                row.status.label()
            )),
            None => out.push_str(&format!(
                "  {:<2} {:<28} {:>14} {:>14} {:>10}  {}\n",
                row.status.symbol(),
                row.display_name,
                "-",
                "-",
                "-",
                row.status.label()
            )),
        }
    }
    out.push_str(&format!("  {}\n", RULE));
    out.push_str(&format!(
        "  Flat band: ±{}%   Fail threshold: {}%\n",
        report.config.summary_flat_threshold, report.config.hard_fail_threshold
    ));
}
