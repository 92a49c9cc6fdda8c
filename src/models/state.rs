//! The complete persisted state
//!
//! Everything a backup snapshots and a restore replaces.

use rust_decimal_macros::dec;

use super::expense::Expense;
use super::money::Money;
use super::work_days::WorkDays;

/// Daily rate used until the user sets one
pub const DEFAULT_DAILY_RATE: Money = Money::new(dec!(80));

/// Rate, worked days and expenses, as held by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedState {
    pub daily_rate: Money,
    pub work_days: WorkDays,
    pub expenses: Vec<Expense>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            daily_rate: DEFAULT_DAILY_RATE,
            work_days: WorkDays::default(),
            expenses: Vec::new(),
        }
    }
}
