//! Expense identifiers
//!
//! Identifiers are opaque strings. New expenses get a random UUID; expenses
//! restored from older backups keep whatever identifier they were exported
//! with (older backups used millisecond timestamps).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, unique expense identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap an existing identifier verbatim
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form used in listings
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(idx, _)| idx)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }

    /// Check whether user input refers to this identifier (full or prefix)
    pub fn matches(&self, input: &str) -> bool {
        !input.is_empty() && self.0.starts_with(input)
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        let a = ExpenseId::new();
        let b = ExpenseId::new();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn test_short_form() {
        let id = ExpenseId::from_raw("1713456789012");
        assert_eq!(id.short(), "17134567");

        let tiny = ExpenseId::from_raw("42");
        assert_eq!(tiny.short(), "42");
    }

    #[test]
    fn test_prefix_match() {
        let id = ExpenseId::from_raw("1713456789012");
        assert!(id.matches("1713"));
        assert!(id.matches("1713456789012"));
        assert!(!id.matches("999"));
        assert!(!id.matches(""));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ExpenseId::from_raw("1713456789012");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1713456789012\"");
    }
}
