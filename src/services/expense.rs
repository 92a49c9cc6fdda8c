//! Expense service
//!
//! Adds and deletes planned expenses. Raw user input is validated here, so
//! the rest of the crate only ever sees complete records.

use tracing::info;

use crate::error::{TallyError, TallyResult};
use crate::models::{Expense, ExpenseId, Money};
use crate::storage::Storage;

use super::workday::parse_date;

/// Unvalidated expense fields as typed by the user
#[derive(Debug, Clone, Default)]
pub struct NewExpense {
    pub description: String,
    pub amount: String,
    pub due_date: String,
}

impl NewExpense {
    /// Turn raw input into an expense, or reject it
    pub fn into_expense(self) -> TallyResult<Expense> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(TallyError::InputValidation(
                "Description is required".to_string(),
            ));
        }
        if self.amount.trim().is_empty() {
            return Err(TallyError::InputValidation("Amount is required".to_string()));
        }
        if self.due_date.trim().is_empty() {
            return Err(TallyError::InputValidation("Due date is required".to_string()));
        }

        let amount = Money::parse(&self.amount)
            .map_err(|e| TallyError::InputValidation(e.to_string()))?;
        let due_date = parse_date(&self.due_date)?;

        let expense = Expense::new(description, due_date, amount);
        expense
            .validate()
            .map_err(|e| TallyError::InputValidation(e.to_string()))?;

        Ok(expense)
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and append a new expense
    pub fn add(&self, input: NewExpense) -> TallyResult<Expense> {
        let expense = input.into_expense()?;

        let mut expenses = self.storage.load_expenses();
        expenses.push(expense.clone());
        self.storage.save_expenses(&expenses)?;

        info!(id = %expense.id, amount = %expense.amount, "added expense");
        Ok(expense)
    }

    /// Delete the expense whose id equals, or uniquely starts with, `id`
    pub fn delete(&self, id: &str) -> TallyResult<Expense> {
        let mut expenses = self.storage.load_expenses();
        let index = find_index(&expenses, id)?;
        let removed = expenses.remove(index);
        self.storage.save_expenses(&expenses)?;

        info!(id = %removed.id, "deleted expense");
        Ok(removed)
    }

    /// Look up one expense by id or unique prefix
    pub fn get(&self, id: &str) -> TallyResult<Expense> {
        let expenses = self.storage.load_expenses();
        let index = find_index(&expenses, id)?;
        Ok(expenses[index].clone())
    }

    /// All expenses in insertion order
    pub fn list(&self) -> Vec<Expense> {
        self.storage.load_expenses()
    }
}

fn find_index(expenses: &[Expense], id: &str) -> TallyResult<usize> {
    let id = id.trim();

    if let Some(index) = expenses.iter().position(|e| e.id == ExpenseId::from_raw(id)) {
        return Ok(index);
    }

    let matches: Vec<usize> = expenses
        .iter()
        .enumerate()
        .filter(|(_, e)| e.id.matches(id))
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [index] => Ok(*index),
        [] => Err(TallyError::expense_not_found(id)),
        _ => Err(TallyError::InputValidation(format!(
            "Expense id prefix '{}' is ambiguous ({} matches)",
            id,
            matches.len()
        ))),
    }
}
