//! Derived income summaries
//!
//! Never persisted; recomputed from worked days and the daily rate whenever
//! they are shown.

use super::money::Money;
use super::month::MonthKey;

/// Income figures for one calendar month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub worked_days: u32,
    pub gross: Money,
    pub net: Money,
    /// Substitute tax plus social contribution
    pub taxes: Money,
}

/// The TOTAL row of a yearly table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryTotal {
    pub worked_days: u32,
    pub gross: Money,
    pub net: Money,
    pub taxes: Money,
}

impl SummaryTotal {
    /// Element-wise sum of already-derived month rows
    pub fn from_months(months: &[MonthSummary]) -> Self {
        months.iter().fold(Self::default(), |mut acc, m| {
            acc.worked_days += m.worked_days;
            acc.gross += m.gross;
            acc.net += m.net;
            acc.taxes += m.taxes;
            acc
        })
    }
}

/// Populated months in ascending order plus their TOTAL row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearSummary {
    pub months: Vec<MonthSummary>,
    pub total: SummaryTotal,
}

impl YearSummary {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}
