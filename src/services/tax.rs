//! Flat-tax withholding calculation
//!
//! Models the Italian simplified regime: 78% of gross is taxable, and two
//! levies apply to that base (a 5% substitute tax and a 26.07% social
//! security contribution). Amounts stay at full precision; rounding to cents
//! is left to display code.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::Money;

/// Share of gross income subject to the levies
pub const TAXABLE_SHARE: Decimal = dec!(0.78);

/// Substitute tax rate applied to the taxable base
pub const SUBSTITUTE_TAX_RATE: Decimal = dec!(0.05);

/// Social contribution rate applied to the taxable base
pub const SOCIAL_CONTRIBUTION_RATE: Decimal = dec!(0.2607);

/// Withholdings derived from a gross amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxBreakdown {
    pub taxable_base: Money,
    pub substitute_tax: Money,
    pub social_contribution: Money,
    pub net: Money,
}

impl TaxBreakdown {
    /// Substitute tax plus social contribution
    pub fn total_tax(&self) -> Money {
        self.substitute_tax + self.social_contribution
    }
}

/// Compute the withholdings and net income for a gross amount
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tally::models::Money;
/// use tally::services::tax::compute_tax;
///
/// let tax = compute_tax(Money::new(dec!(1000)));
/// assert_eq!(tax.taxable_base, Money::new(dec!(780)));
/// assert_eq!(tax.net, Money::new(dec!(757.654)));
/// ```
pub fn compute_tax(gross: Money) -> TaxBreakdown {
    let taxable_base = gross * TAXABLE_SHARE;
    let substitute_tax = taxable_base * SUBSTITUTE_TAX_RATE;
    let social_contribution = taxable_base * SOCIAL_CONTRIBUTION_RATE;
    let net = gross - substitute_tax - social_contribution;

    TaxBreakdown {
        taxable_base,
        substitute_tax,
        social_contribution,
        net,
    }
}
