//! Expense coverage
//!
//! Compares what the year is expected to earn against what still has to be
//! paid: every expense due on or after the reference date, plus the tax
//! projected on the year's gross.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Expense, Money, PersistedState};

use super::calendar::yearly_gross;
use super::tax::compute_tax;

/// Sum of expenses due on or after `reference_date`, plus `yearly_tax`
///
/// Expenses due strictly before the reference date count as already paid.
pub fn compute_expected_outflow(
    expenses: &[Expense],
    reference_date: NaiveDate,
    yearly_tax: Money,
) -> Money {
    upcoming_expenses(expenses, reference_date) + yearly_tax
}

/// Sum of expenses still due as of `reference_date`
pub fn upcoming_expenses(expenses: &[Expense], reference_date: NaiveDate) -> Money {
    expenses
        .iter()
        .filter(|e| e.is_due_on_or_after(reference_date))
        .map(|e| e.amount)
        .sum()
}

/// True when the year's gross cannot cover the expected outflow
pub fn is_shortfall(yearly_gross: Money, expected_outflow: Money) -> bool {
    yearly_gross < expected_outflow
}

/// Share of gross consumed by the expected outflow, clamped to `[0, 1]`
///
/// With zero gross the ratio saturates: 1 when anything is owed, 0 when
/// nothing is.
pub fn coverage_ratio(expected_outflow: Money, yearly_gross: Money) -> Decimal {
    if !yearly_gross.is_positive() {
        return if expected_outflow.is_positive() {
            Decimal::ONE
        } else {
            Decimal::ZERO
        };
    }

    let ratio = expected_outflow.amount() / yearly_gross.amount();
    ratio.clamp(Decimal::ZERO, Decimal::ONE)
}

/// Everything the expenses view shows, computed in one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    pub reference_date: NaiveDate,
    pub year: i32,
    pub yearly_gross: Money,
    pub yearly_tax: Money,
    pub upcoming_expenses: Money,
    pub expected_outflow: Money,
    pub shortfall: bool,
    pub ratio: Decimal,
}

impl CoverageReport {
    /// Gross left after the expected outflow (negative on shortfall)
    pub fn margin(&self) -> Money {
        self.yearly_gross - self.expected_outflow
    }
}

/// Recompute coverage for the reference date's year from the full state
///
/// Call after any action that changes the rate, worked days or expenses.
pub fn coverage_report(state: &PersistedState, reference_date: NaiveDate) -> CoverageReport {
    let year = reference_date.year();
    let gross = yearly_gross(&state.work_days, state.daily_rate, year);
    let yearly_tax = compute_tax(gross).total_tax();
    let upcoming = upcoming_expenses(&state.expenses, reference_date);
    let expected_outflow = upcoming + yearly_tax;

    CoverageReport {
        reference_date,
        year,
        yearly_gross: gross,
        yearly_tax,
        upcoming_expenses: upcoming,
        expected_outflow,
        shortfall: is_shortfall(gross, expected_outflow),
        ratio: coverage_ratio(expected_outflow, gross),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkDays;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn money(value: Decimal) -> Money {
        Money::new(value)
    }

    #[test]
    fn past_expenses_are_excluded() {
        let today = date(2025, 6, 15);
        let expenses = vec![
            Expense::new("Insurance", date(2025, 3, 1), money(dec!(100))),
            Expense::new("Accountant", date(2025, 9, 1), money(dec!(200))),
        ];

        let outflow = compute_expected_outflow(&expenses, today, money(dec!(50)));
        assert_eq!(outflow, money(dec!(250)));
    }

    #[test]
    fn expense_due_today_is_included() {
        let today = date(2025, 6, 15);
        let expenses = vec![Expense::new("Rent", today, money(dec!(700)))];

        assert_eq!(
            compute_expected_outflow(&expenses, today, Money::zero()),
            money(dec!(700))
        );
    }

    #[test]
    fn no_expenses_means_outflow_is_tax() {
        assert_eq!(
            compute_expected_outflow(&[], date(2025, 1, 1), money(dec!(42.5))),
            money(dec!(42.5))
        );
    }

    #[test]
    fn shortfall_comparison() {
        assert!(is_shortfall(money(dec!(1000)), money(dec!(1200))));
        assert!(!is_shortfall(money(dec!(1000)), money(dec!(800))));
        assert!(!is_shortfall(money(dec!(1000)), money(dec!(1000))));
    }

    #[test]
    fn ratio_is_clamped() {
        assert_eq!(coverage_ratio(money(dec!(250)), money(dec!(1000))), dec!(0.25));
        assert_eq!(coverage_ratio(money(dec!(1500)), money(dec!(1000))), Decimal::ONE);
        assert_eq!(coverage_ratio(Money::zero(), money(dec!(1000))), Decimal::ZERO);
    }

    #[test]
    fn ratio_with_zero_gross_saturates() {
        assert_eq!(coverage_ratio(money(dec!(10)), Money::zero()), Decimal::ONE);
        assert_eq!(coverage_ratio(Money::zero(), Money::zero()), Decimal::ZERO);
    }

    #[test]
    fn report_uses_reference_year_only() {
        let state = PersistedState {
            daily_rate: money(dec!(100)),
            work_days: WorkDays::from_dates([
                date(2025, 1, 2),
                date(2025, 1, 3),
                date(2024, 12, 30),
            ]),
            expenses: vec![
                Expense::new("Paid", date(2025, 2, 1), money(dec!(30))),
                Expense::new("Due", date(2025, 12, 1), money(dec!(20))),
            ],
        };

        let report = coverage_report(&state, date(2025, 6, 1));

        assert_eq!(report.year, 2025);
        assert_eq!(report.yearly_gross, money(dec!(200)));
        assert_eq!(report.yearly_tax, compute_tax(money(dec!(200))).total_tax());
        assert_eq!(report.upcoming_expenses, money(dec!(20)));
        assert_eq!(report.expected_outflow, report.yearly_tax + money(dec!(20)));
        assert!(!report.shortfall);
        assert_eq!(report.margin(), report.yearly_gross - report.expected_outflow);
    }

    #[test]
    fn report_flags_shortfall_without_income() {
        let state = PersistedState {
            expenses: vec![Expense::new("Laptop", date(2025, 8, 1), money(dec!(900)))],
            ..PersistedState::default()
        };

        let report = coverage_report(&state, date(2025, 6, 1));

        assert!(report.shortfall);
        assert_eq!(report.ratio, Decimal::ONE);
        assert_eq!(report.margin(), money(dec!(-900)));
    }
}
