// src/io/reporting.rs

use std::fmt::Write;

use crate::engine::report::ReplenishmentReport;

/// Renders a markdown summary of a report run.
pub fn render_report(report: &ReplenishmentReport) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Replenishment Report");
    let _ = writeln!(
        output,
        "Run date {} with a {}-day forecast horizon ({} records processed)",
        report.run_date,
        report.horizon_days,
        report.processed()
    );
    let _ = writeln!(output);

    let totals = &report.totals;
    let _ = writeln!(output, "## Totals");
    let _ = writeln!(output, "- Critical: {}", totals.critical_count);
    let _ = writeln!(output, "- Low: {}", totals.low_count);
    let _ = writeln!(output, "- Good: {}", totals.good_count);
    let _ = writeln!(output, "- Units to reorder: {}", totals.total_reorder_quantity);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Store Status");
    if report.stores.is_empty() {
        let _ = writeln!(output, "No stores in this run.");
    } else {
        for store in &report.stores {
            let _ = writeln!(
                output,
                "- {}: {:?} ({} critical, {} low, {} good, {} units to reorder)",
                store.store_id,
                store.status,
                store.critical_count,
                store.low_count,
                store.good_count,
                store.reorder_quantity
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommendations");
    if report.recommendations.is_empty() {
        let _ = writeln!(output, "No recommendations for this run.");
    } else {
        for rec in &report.recommendations {
            let flag = if rec.threshold_mismatch {
                format!(
                    " [reorder level {} vs implied {}]",
                    rec.reorder_point, rec.implied_reorder_point
                )
            } else {
                String::new()
            };
            let _ = writeln!(
                output,
                "- {} @ {} [{}] {} (confidence {}%){}",
                rec.sku,
                rec.store_id,
                rec.tier,
                rec.advice(),
                rec.average_confidence,
                flag
            );
        }
    }

    if !report.failures.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Rejected Records");
        for failure in &report.failures {
            let _ = writeln!(
                output,
                "- row {}: {} @ {}: {}",
                failure.index + 1,
                failure.sku,
                failure.store_id,
                failure.error
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Seasonal Outlook");
    if report.seasonal_outlook.is_empty() {
        let _ = writeln!(output, "No seasonal shifts expected for these categories.");
    } else {
        for trend in &report.seasonal_outlook {
            let _ = writeln!(output, "- {}: {:+.0}%", trend.category, trend.percent_change);
        }
    }

    output
}
