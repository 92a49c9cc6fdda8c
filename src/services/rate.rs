//! Daily rate service

use tracing::info;

use crate::error::{TallyError, TallyResult};
use crate::models::Money;
use crate::storage::Storage;

/// Service for reading and changing the daily rate
pub struct RateService<'a> {
    storage: &'a Storage,
}

impl<'a> RateService<'a> {
    /// Create a new rate service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Current rate, or the default when none has been saved
    pub fn get(&self) -> Money {
        self.storage.load_daily_rate()
    }

    /// Save a new rate
    pub fn set(&self, rate: Money) -> TallyResult<Money> {
        if rate.is_negative() {
            return Err(TallyError::InputValidation(
                "Daily rate cannot be negative".to_string(),
            ));
        }
        if rate.exceeds_limit() {
            return Err(TallyError::InputValidation(format!(
                "Daily rate cannot exceed {}",
                Money::MAX_AMOUNT
            )));
        }

        self.storage.save_daily_rate(rate)?;
        info!(%rate, "daily rate updated");
        Ok(rate)
    }

    /// Parse user input and save it as the new rate
    pub fn set_from_input(&self, input: &str) -> TallyResult<Money> {
        let rate = Money::parse(input).map_err(|e| TallyError::InputValidation(e.to_string()))?;
        self.set(rate)
    }
}
