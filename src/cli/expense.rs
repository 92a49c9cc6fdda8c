//! Expense CLI commands

use clap::Subcommand;

use crate::display::{format_expense_details, format_expense_list};
use crate::error::TallyResult;
use crate::services::{ExpenseService, NewExpense};
use crate::storage::Storage;

use super::report::{print_coverage_status, today};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Plan a new expense
    Add {
        /// What the expense is for
        description: String,
        /// Amount (e.g., "350", "350,50" or "€350.50")
        amount: String,
        /// Due date (YYYY-MM-DD)
        date: String,
    },
    /// List planned expenses by due date
    List,
    /// Show one expense
    Show {
        /// Expense ID or unique prefix
        id: String,
    },
    /// Delete an expense
    Delete {
        /// Expense ID or unique prefix
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(storage: &Storage, cmd: ExpenseCommands) -> TallyResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            date,
        } => {
            let expense = service.add(NewExpense {
                description,
                amount,
                due_date: date,
            })?;

            println!("Added expense: {}", expense.description);
            println!("  ID:     {}", expense.id);
            println!("  Due:    {}", expense.due_date.format("%d/%m/%Y"));
            println!("  Amount: {}", expense.amount);
            print_coverage_status(storage);
        }

        ExpenseCommands::List => {
            println!("{}", format_expense_list(&service.list(), today()));
        }

        ExpenseCommands::Show { id } => {
            print!("{}", format_expense_details(&service.get(&id)?));
        }

        ExpenseCommands::Delete { id } => {
            let removed = service.delete(&id)?;
            println!("Deleted expense: {} ({})", removed.description, removed.amount);
            print_coverage_status(storage);
        }
    }

    Ok(())
}
