//! Expense list formatting

use chrono::NaiveDate;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Expense, Money};

use super::report::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "")]
    status: &'static str,
}

/// Format expenses as a table ordered by due date
///
/// Expenses due before `today` are marked as past; they no longer count
/// towards coverage.
pub fn format_expense_list(expenses: &[Expense], today: NaiveDate) -> String {
    if expenses.is_empty() {
        return "No expenses planned.".to_string();
    }

    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by_key(|e| e.due_date);

    let rows: Vec<ExpenseRow> = sorted
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.short().to_string(),
            due: e.due_date.format("%d/%m/%Y").to_string(),
            description: truncate(&e.description, 40),
            amount: e.amount.to_string(),
            status: if e.is_due_on_or_after(today) { "" } else { "past" },
        })
        .collect();

    let upcoming: Money = expenses
        .iter()
        .filter(|e| e.is_due_on_or_after(today))
        .map(|e| e.amount)
        .sum();

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(3), Alignment::right());

    format!("{}\n\nStill to pay: {}", table, upcoming)
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.description));
    output.push_str(&format!("  ID:      {}\n", expense.id));
    output.push_str(&format!("  Due:     {}\n", expense.due_date.format("%d/%m/%Y")));
    output.push_str(&format!("  Amount:  {}\n", expense.amount));

    output
}
