//! Backup document encoding
//!
//! A backup is a single JSON object:
//!
//! ```json
//! {
//!   "exportedAt": "2025-04-19T10:00:00.000Z",
//!   "dailyRate": 250,
//!   "workDays": { "2025-04-01": true },
//!   "expenses": [
//!     { "id": "1713000000000", "description": "Accountant", "payDate": "2025-06-30", "amount": 300 }
//!   ]
//! }
//! ```
//!
//! Decoding validates every field before anything is returned, so a caller
//! that only writes after a successful decode never applies half a backup.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{TallyError, TallyResult};
use crate::models::{Expense, ExpenseId, Money, PersistedState, WorkDays};

/// The exported document, field names as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub exported_at: String,
    pub daily_rate: Money,
    pub work_days: WorkDays,
    pub expenses: Vec<Expense>,
}

/// A decoded backup ready to be written to storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredBackup {
    /// Informational only; absent in hand-written documents
    pub exported_at: Option<DateTime<Utc>>,
    pub state: PersistedState,
}

/// Snapshot the state into a document
///
/// Only worked days are written; expenses keep their order.
pub fn serialize(state: &PersistedState, exported_at: DateTime<Utc>) -> BackupDocument {
    BackupDocument {
        exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        daily_rate: state.daily_rate,
        work_days: state.work_days.worked_only(),
        expenses: state.expenses.clone(),
    }
}

/// Pretty-printed JSON for a document
pub fn encode(document: &BackupDocument) -> TallyResult<String> {
    serde_json::to_string_pretty(document)
        .map_err(|e| TallyError::Json(format!("Failed to serialize backup: {}", e)))
}

/// Parse and validate backup text
pub fn decode(text: &str) -> TallyResult<RestoredBackup> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| TallyError::Validation(format!("Backup is not valid JSON: {}", e)))?;
    deserialize(&value)
}

/// Validate an already-parsed backup value
pub fn deserialize(value: &Value) -> TallyResult<RestoredBackup> {
    let object = value
        .as_object()
        .ok_or_else(|| invalid("backup must be a JSON object"))?;

    let daily_rate = match object.get("dailyRate") {
        Some(Value::Number(n)) => Money::new(decimal_from_number(n, "dailyRate")?),
        _ => return Err(invalid("dailyRate must be a number")),
    };
    if daily_rate.is_negative() {
        return Err(invalid("dailyRate cannot be negative"));
    }
    if daily_rate.exceeds_limit() {
        return Err(invalid(format!("dailyRate cannot exceed {}", Money::MAX_AMOUNT)));
    }

    let work_days = match object.get("workDays") {
        Some(Value::Object(map)) => decode_work_days(map)?,
        _ => return Err(invalid("workDays must be an object")),
    };

    let expenses = match object.get("expenses") {
        Some(Value::Array(items)) => decode_expenses(items)?,
        _ => return Err(invalid("expenses must be a list")),
    };

    let exported_at = match object.get("exportedAt") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(
            DateTime::parse_from_rfc3339(s)
                .map_err(|_| invalid(format!("exportedAt is not a timestamp: {}", s)))?
                .with_timezone(&Utc),
        ),
        Some(_) => return Err(invalid("exportedAt must be a string")),
    };

    Ok(RestoredBackup {
        exported_at,
        state: PersistedState {
            daily_rate,
            work_days,
            expenses,
        },
    })
}

fn decode_work_days(map: &Map<String, Value>) -> TallyResult<WorkDays> {
    let mut work_days = WorkDays::new();

    for (key, flag) in map {
        let date = NaiveDate::parse_from_str(key, "%Y-%m-%d")
            .map_err(|_| invalid(format!("workDays key is not a YYYY-MM-DD date: {}", key)))?;
        let worked = flag
            .as_bool()
            .ok_or_else(|| invalid(format!("workDays[{}] must be a boolean", key)))?;

        // false is the same as absent
        if worked {
            work_days.mark(date);
        }
    }

    Ok(work_days)
}

fn decode_expenses(items: &[Value]) -> TallyResult<Vec<Expense>> {
    let mut seen = HashSet::new();
    let mut expenses = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let expense = decode_expense(index, item)?;
        if !seen.insert(expense.id.clone()) {
            return Err(invalid(format!("expenses[{}] repeats id {}", index, expense.id)));
        }
        expenses.push(expense);
    }

    Ok(expenses)
}

fn decode_expense(index: usize, item: &Value) -> TallyResult<Expense> {
    let object = item
        .as_object()
        .ok_or_else(|| invalid(format!("expenses[{}] must be an object", index)))?;

    let field = |name: &str| {
        object
            .get(name)
            .ok_or_else(|| invalid(format!("expenses[{}] is missing {}", index, name)))
    };

    // ids were historically millisecond timestamps and may be numbers
    let id = match field("id")? {
        Value::String(s) if !s.is_empty() => ExpenseId::from_raw(s.as_str()),
        Value::Number(n) => ExpenseId::from_raw(n.to_string()),
        _ => return Err(invalid(format!("expenses[{}].id must be a string", index))),
    };

    let description = field("description")?
        .as_str()
        .ok_or_else(|| invalid(format!("expenses[{}].description must be a string", index)))?
        .to_string();

    let due_date = field("payDate")?
        .as_str()
        .and_then(parse_pay_date)
        .ok_or_else(|| invalid(format!("expenses[{}].payDate must be a date", index)))?;

    let amount = match field("amount")? {
        Value::Number(n) => Money::new(decimal_from_number(n, "amount")?),
        _ => return Err(invalid(format!("expenses[{}].amount must be a number", index))),
    };
    if amount.is_negative() {
        return Err(invalid(format!("expenses[{}].amount cannot be negative", index)));
    }
    if amount.exceeds_limit() {
        return Err(invalid(format!(
            "expenses[{}].amount cannot exceed {}",
            index,
            Money::MAX_AMOUNT
        )));
    }

    Ok(Expense {
        id,
        description,
        due_date,
        amount,
    })
}

/// Plain dates, or full timestamps of which only the day is kept
fn parse_pay_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

fn decimal_from_number(n: &Number, field: &str) -> TallyResult<Decimal> {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| invalid(format!("{} is out of range: {}", field, text)))
}

fn invalid(message: impl Into<String>) -> TallyError {
    TallyError::Validation(message.into())
}
