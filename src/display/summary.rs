//! Month and year income views

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Money, MonthSummary, YearSummary};
use crate::services::TaxBreakdown;

use super::report::separator;

/// Format the stats panel for one month
pub fn format_month_summary(summary: &MonthSummary, rate: Money, tax: &TaxBreakdown) -> String {
    let mut output = String::new();

    output.push_str(&format!("Income for {}\n", summary.month.friendly()));
    output.push_str(&separator(36));
    output.push('\n');
    output.push_str(&format!("  Days worked:         {:>12}\n", summary.worked_days));
    output.push_str(&format!("  Daily rate:          {:>12}\n", rate));
    output.push_str(&format!("  Gross:               {:>12}\n", summary.gross));
    output.push_str(&format!("  Taxable base (78%):  {:>12}\n", tax.taxable_base));
    output.push_str(&format!("  Substitute tax (5%): {:>12}\n", tax.substitute_tax));
    output.push_str(&format!("  INPS (26.07%):       {:>12}\n", tax.social_contribution));
    output.push_str(&format!("  Total taxes:         {:>12}\n", summary.taxes));
    output.push_str(&separator(36));
    output.push('\n');
    output.push_str(&format!("  Net:                 {:>12}\n", summary.net));

    output
}

#[derive(Tabled)]
struct YearRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Days")]
    days: u32,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Taxes")]
    taxes: String,
}

impl From<&MonthSummary> for YearRow {
    fn from(summary: &MonthSummary) -> Self {
        Self {
            month: summary.month.to_string(),
            days: summary.worked_days,
            gross: summary.gross.to_string(),
            net: summary.net.to_string(),
            taxes: summary.taxes.to_string(),
        }
    }
}

/// Format the per-month table with its TOTAL row
pub fn format_year_summary(title: &str, year: &YearSummary) -> String {
    if year.is_empty() {
        return format!("{}\nNo work days recorded.\n", title);
    }

    let mut rows: Vec<YearRow> = year.months.iter().map(YearRow::from).collect();
    rows.push(YearRow {
        month: "TOTAL".to_string(),
        days: year.total.worked_days,
        gross: year.total.gross.to_string(),
        net: year.total.net.to_string(),
        taxes: year.total.taxes.to_string(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right());

    format!("{}\n{}\n", title, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthKey, SummaryTotal};
    use crate::services::compute_tax;
    use rust_decimal_macros::dec;

    fn row(month: u32, days: u32) -> MonthSummary {
        let gross = Money::new(dec!(100) * rust_decimal::Decimal::from(days));
        let tax = compute_tax(gross);
        MonthSummary {
            month: MonthKey::new(2025, month).unwrap(),
            worked_days: days,
            gross,
            net: tax.net,
            taxes: tax.total_tax(),
        }
    }

    #[test]
    fn test_month_panel() {
        let summary = row(4, 10);
        let tax = compute_tax(summary.gross);
        let output = format_month_summary(&summary, Money::new(dec!(100)), &tax);

        assert!(output.contains("Apr 2025"));
        assert!(output.contains("€1000.00"));
        assert!(output.contains("€780.00"));
        assert!(output.contains("€39.00"));
        assert!(output.contains("€203.35"));
        assert!(output.contains("€757.65"));
    }

    #[test]
    fn test_year_table_has_total_last() {
        let months = vec![row(1, 2), row(3, 1)];
        let total = SummaryTotal::from_months(&months);
        let output = format_year_summary("2025", &YearSummary { months, total });

        assert!(output.contains("2025-01"));
        assert!(output.contains("2025-03"));
        let last_row = output.trim_end().lines().last().unwrap();
        assert!(last_row.contains("TOTAL"));
        assert!(last_row.contains("€300.00"));
    }

    #[test]
    fn test_empty_year() {
        let output = format_year_summary("2025", &YearSummary::default());
        assert!(output.contains("No work days recorded."));
    }
}
