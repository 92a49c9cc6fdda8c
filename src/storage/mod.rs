//! Storage layer for Tally
//!
//! A typed facade over an injected key-value store. The calculation core
//! never touches storage; user actions load state here, compute, and save
//! the result back.
//!
//! Loads are forgiving: a read or decode failure is logged and treated as
//! "absent", so callers fall back to defaults. Saves are strict: every
//! failure is returned to the caller.

pub mod file_io;
pub mod kv;

pub use file_io::{read_json_optional, write_json_atomic};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::config::paths::TallyPaths;
use crate::error::{TallyError, TallyResult};
use crate::models::{Expense, Money, PersistedState, WorkDays, DEFAULT_DAILY_RATE};

/// The keys of the persisted namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    DailyRate,
    WorkDays,
    Expenses,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::DailyRate => "dailyRate",
            StoreKey::WorkDays => "workDays",
            StoreKey::Expenses => "expenses",
        }
    }
}

/// Typed access to the persisted state
pub struct Storage {
    store: Box<dyn KeyValueStore>,
}

impl Storage {
    /// Wrap an arbitrary store
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Open the on-disk store under the configured data directory
    pub fn open(paths: &TallyPaths) -> TallyResult<Self> {
        paths.ensure_directories()?;
        Ok(Self::new(Box::new(JsonFileStore::new(paths.data_dir()))))
    }

    /// A fresh, empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// The underlying store
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    fn load<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        let value = match self.store.get(key.as_str()) {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(error) => {
                warn!(key = key.as_str(), %error, "failed to load value, using default");
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(error) => {
                warn!(key = key.as_str(), %error, "stored value has unexpected shape, using default");
                None
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> TallyResult<()> {
        let json = serde_json::to_value(value).map_err(|e| {
            TallyError::Storage(format!("Failed to encode {}: {}", key.as_str(), e))
        })?;
        self.store.set(key.as_str(), json)?;
        debug!(key = key.as_str(), "saved");
        Ok(())
    }

    /// Load the daily rate, defaulting to 80 when unset or out of range
    pub fn load_daily_rate(&self) -> Money {
        self.load(StoreKey::DailyRate)
            .filter(|rate: &Money| {
                let in_range = !rate.exceeds_limit();
                if !in_range {
                    warn!(%rate, "stored daily rate is out of range, using default");
                }
                in_range
            })
            .unwrap_or(DEFAULT_DAILY_RATE)
    }

    pub fn save_daily_rate(&self, rate: Money) -> TallyResult<()> {
        self.save(StoreKey::DailyRate, &rate)
    }

    /// Load the worked-day flags, empty when unset
    pub fn load_work_days(&self) -> WorkDays {
        self.load(StoreKey::WorkDays).unwrap_or_default()
    }

    pub fn save_work_days(&self, work_days: &WorkDays) -> TallyResult<()> {
        self.save(StoreKey::WorkDays, work_days)
    }

    /// Load the expense list in insertion order, empty when unset
    ///
    /// A list holding an amount beyond `Money::MAX_AMOUNT` is treated like
    /// any other undecodable value.
    pub fn load_expenses(&self) -> Vec<Expense> {
        self.load(StoreKey::Expenses)
            .filter(|expenses: &Vec<Expense>| {
                let in_range = expenses.iter().all(|e| !e.amount.exceeds_limit());
                if !in_range {
                    warn!("stored expenses hold an out-of-range amount, using default");
                }
                in_range
            })
            .unwrap_or_default()
    }

    pub fn save_expenses(&self, expenses: &[Expense]) -> TallyResult<()> {
        self.save(StoreKey::Expenses, expenses)
    }

    /// Load everything at once
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            daily_rate: self.load_daily_rate(),
            work_days: self.load_work_days(),
            expenses: self.load_expenses(),
        }
    }

    /// Replace the whole namespace: clear first, then write every key
    ///
    /// Callers must have fully validated `state` before calling this.
    pub fn replace_all(&self, state: &PersistedState) -> TallyResult<()> {
        self.store.clear_all()?;
        self.save_daily_rate(state.daily_rate)?;
        self.save_work_days(&state.work_days)?;
        self.save_expenses(&state.expenses)?;
        Ok(())
    }
}
