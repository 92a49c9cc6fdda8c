//! Coverage report formatting

use crate::services::CoverageReport;

use super::report::{format_bar, format_percentage, separator};

/// Format the coverage panel shown after every change
pub fn format_coverage_report(report: &CoverageReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Coverage for {} (as of {})\n",
        report.year,
        report.reference_date.format("%d/%m/%Y")
    ));
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!("  Yearly gross:        {:>14}\n", report.yearly_gross));
    output.push_str(&format!("  Yearly taxes:        {:>14}\n", report.yearly_tax));
    output.push_str(&format!("  Upcoming expenses:   {:>14}\n", report.upcoming_expenses));
    output.push_str(&format!("  Expected outflow:    {:>14}\n", report.expected_outflow));
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!("  Margin:              {:>14}\n", report.margin()));
    output.push_str(&format!(
        "  [{}] {} of gross committed\n",
        format_bar(report.ratio, 20),
        format_percentage(report.ratio)
    ));

    if report.shortfall {
        output.push_str("\nShortfall: gross income does not cover expected outflow.\n");
    } else {
        output.push_str("\nCovered: gross income covers expected outflow.\n");
    }

    output
}
