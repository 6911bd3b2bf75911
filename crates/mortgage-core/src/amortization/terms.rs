//! Validated loan inputs.
//!
//! [`LoanTerms`] is what the engine consumes. [`HomePurchaseInput`] is the
//! buyer-facing form (price, down payment, annual percentage rate, years)
//! and converts into loan terms.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calendar::{MonthNaming, StartPeriod};
use crate::error::MortgageError;
use crate::types::{Money, Rate, ROUNDING};
use crate::MortgageResult;

/// Minimum down payment as a share of the purchase price.
const MIN_DOWN_PAYMENT_SHARE: Decimal = dec!(0.20);
const MONTHS_PER_YEAR: u32 = 12;

/// Convert an annual percentage rate (5.25 = 5.25%) to a monthly fraction.
pub fn monthly_rate_from_annual_pct(annual_rate_pct: Decimal) -> Rate {
    annual_rate_pct / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

// ---------------------------------------------------------------------------
// LoanTerms
// ---------------------------------------------------------------------------

/// Terms of a fixed-rate, fully amortizing loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: Money,
    /// Interest rate per period as a fraction (annual rate / 12 for monthly)
    pub periodic_rate: Rate,
    /// Number of monthly periods
    pub period_count: u32,
    /// Calendar month of the first payment
    pub start: StartPeriod,
    #[serde(default)]
    pub month_names: MonthNaming,
}

impl LoanTerms {
    pub fn validate(&self) -> MortgageResult<()> {
        if self.principal < Decimal::ZERO {
            return Err(MortgageError::InvalidPrincipal(self.principal));
        }
        if self.periodic_rate < Decimal::ZERO {
            return Err(MortgageError::InvalidRate(self.periodic_rate));
        }
        if self.period_count < 1 {
            return Err(MortgageError::InvalidPeriodCount(self.period_count));
        }
        self.start.validate()
    }
}

// ---------------------------------------------------------------------------
// HomePurchaseInput
// ---------------------------------------------------------------------------

/// A home purchase financed by a fixed-rate mortgage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomePurchaseInput {
    pub purchase_price: Money,
    pub down_payment: Money,
    /// Annual interest rate in percent (5.25 = 5.25%)
    pub annual_rate_pct: Decimal,
    pub amortization_years: u32,
    pub start: StartPeriod,
    #[serde(default)]
    pub month_names: MonthNaming,
}

impl HomePurchaseInput {
    /// Smallest acceptable down payment, in whole currency units.
    pub fn minimum_down_payment(&self) -> Money {
        (self.purchase_price * MIN_DOWN_PAYMENT_SHARE).round_dp_with_strategy(0, ROUNDING)
    }

    /// Validate the purchase and derive the monthly loan terms.
    pub fn loan_terms(&self) -> MortgageResult<LoanTerms> {
        if self.purchase_price < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "purchase_price".into(),
                reason: "Purchase price cannot be negative".into(),
            });
        }
        let min_down = self.minimum_down_payment();
        if self.down_payment < min_down {
            return Err(MortgageError::InvalidInput {
                field: "down_payment".into(),
                reason: format!(
                    "Down payment must be at least 20% of the purchase price ({min_down})"
                ),
            });
        }
        if self.down_payment > self.purchase_price {
            return Err(MortgageError::InvalidInput {
                field: "down_payment".into(),
                reason: "Down payment cannot exceed the purchase price".into(),
            });
        }
        if self.annual_rate_pct < Decimal::ZERO {
            return Err(MortgageError::InvalidRate(self.annual_rate_pct));
        }
        if self.amortization_years < 1 {
            return Err(MortgageError::InvalidPeriodCount(0));
        }
        let period_count = self
            .amortization_years
            .checked_mul(MONTHS_PER_YEAR)
            .ok_or_else(|| MortgageError::InvalidInput {
                field: "amortization_years".into(),
                reason: "Amortization period is too long".into(),
            })?;

        let terms = LoanTerms {
            principal: self.purchase_price - self.down_payment,
            periodic_rate: monthly_rate_from_annual_pct(self.annual_rate_pct),
            period_count,
            start: self.start,
            month_names: self.month_names,
        };
        terms.validate()?;
        Ok(terms)
    }
}
