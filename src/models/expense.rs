//! Expense model
//!
//! A future (or past) payment obligation the user wants covered by income.
//! Expenses are created from validated input, deleted by id and never edited
//! in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::money::Money;

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NegativeAmount,
    AmountTooLarge,
}

impl std::fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::NegativeAmount => write!(f, "Expense amount cannot be negative"),
            Self::AmountTooLarge => {
                write!(f, "Expense amount cannot exceed {}", Money::MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// A planned expense, persisted as `{id, description, payDate, amount}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    #[serde(rename = "payDate")]
    pub due_date: NaiveDate,
    pub amount: Money,
}

impl Expense {
    /// Create a new expense with a fresh identifier
    pub fn new(description: impl Into<String>, due_date: NaiveDate, amount: Money) -> Self {
        Self {
            id: ExpenseId::new(),
            description: description.into(),
            due_date,
            amount,
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount);
        }
        if self.amount.exceeds_limit() {
            return Err(ExpenseValidationError::AmountTooLarge);
        }
        Ok(())
    }

    /// Whether the expense still has to be paid as of `reference_date`
    pub fn is_due_on_or_after(&self, reference_date: NaiveDate) -> bool {
        self.due_date >= reference_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let expense = Expense::new("Accountant", date(2025, 6, 30), Money::new(dec!(350)));
        assert_eq!(expense.description, "Accountant");
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let blank = Expense::new("   ", date(2025, 6, 30), Money::new(dec!(10)));
        assert_eq!(blank.validate(), Err(ExpenseValidationError::EmptyDescription));

        let negative = Expense::new("Refund", date(2025, 6, 30), Money::new(dec!(-10)));
        assert_eq!(negative.validate(), Err(ExpenseValidationError::NegativeAmount));

        let huge = Expense::new("Yacht", date(2025, 6, 30), Money::new(dec!(5000000000)));
        assert_eq!(huge.validate(), Err(ExpenseValidationError::AmountTooLarge));
    }

    #[test]
    fn test_due_comparison_is_inclusive() {
        let expense = Expense::new("INPS", date(2025, 6, 30), Money::new(dec!(100)));
        assert!(expense.is_due_on_or_after(date(2025, 6, 30)));
        assert!(expense.is_due_on_or_after(date(2025, 1, 1)));
        assert!(!expense.is_due_on_or_after(date(2025, 7, 1)));
    }

    #[test]
    fn test_json_field_names() {
        let expense = Expense {
            id: ExpenseId::from_raw("1713456789012"),
            description: "Laptop".to_string(),
            due_date: date(2025, 5, 1),
            amount: Money::new(dec!(1200.5)),
        };

        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "1713456789012",
                "description": "Laptop",
                "payDate": "2025-05-01",
                "amount": 1200.5
            })
        );
    }
}
