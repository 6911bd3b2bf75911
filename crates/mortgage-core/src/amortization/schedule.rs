//! Period-by-period amortization ledger.
//!
//! Interest is charged on the exact opening balance and the rest of the
//! level payment retires principal; nothing is rounded inside the loop.
//! After the last scheduled payment the signed residual balance is taken
//! off that period's payment and principal so the loan closes at exactly
//! zero. Recorded rows are rounded to cents and roll up into calendar years,
//! flushed every December and once more for a short final year.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::{MonthNaming, PeriodCursor, StartPeriod};
use crate::error::MortgageError;
use crate::types::{round_cents, Money, Rate};
use crate::MortgageResult;

/// Residual growth allowed per period from rounding the level payment to
/// cents (half a cent, doubled for margin).
const PER_PERIOD_DRIFT: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One row of the monthly ledger, rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEntry {
    /// Period number (1-indexed)
    pub period: u32,
    /// "Month YYYY"
    pub period_label: String,
    pub total_payment: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    /// Balance after this period's payment
    pub remaining_balance: Money,
}

/// One calendar year of the ledger (the final year may be partial).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualEntry {
    pub year: i32,
    pub total_payment: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    /// Balance after the year's last payment
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub monthly_ledger: Vec<PeriodEntry>,
    pub annual_ledger: Vec<AnnualEntry>,
    /// Interest over the whole term, summed exactly then rounded
    pub total_interest: Money,
    /// Label of the first period whose principal exceeds its interest
    pub tipping_point: Option<String>,
    pub tipping_point_period: Option<u32>,
    /// Signed balance left after the last scheduled payment, subtracted
    /// from the final period's payment and principal (positive = final
    /// payment lowered, negative = final payment raised)
    pub terminal_correction: Money,
    /// True when the residual is larger than payment rounding can explain
    pub correction_exceeds_drift: bool,
}

// ---------------------------------------------------------------------------
// Year accumulator
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct YearTotals {
    payment: Money,
    interest: Money,
    principal: Money,
}

impl YearTotals {
    fn add(&mut self, entry: &PeriodEntry) -> Option<()> {
        self.payment = self.payment.checked_add(entry.total_payment)?;
        self.interest = self.interest.checked_add(entry.interest_portion)?;
        self.principal = self.principal.checked_add(entry.principal_portion)?;
        Some(())
    }

    /// Close the year into a ledger row and reset.
    fn flush(&mut self, year: i32, remaining_balance: Money) -> AnnualEntry {
        let totals = std::mem::take(self);
        AnnualEntry {
            year,
            total_payment: totals.payment,
            interest_portion: totals.interest,
            principal_portion: totals.principal,
            remaining_balance,
        }
    }
}

fn overflow(period: u32) -> MortgageError {
    MortgageError::ArithmeticOverflow(format!("balance out of range at period {period}"))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Walk the loan from `start` for `period_count` months.
///
/// `level_payment` is taken as given (see [`super::payment::level_payment`]);
/// it is never recomputed here. Fails only when a payment too small for the
/// rate lets the balance grow past Decimal range.
pub fn build_schedule(
    principal: Money,
    level_payment: Money,
    periodic_rate: Rate,
    period_count: u32,
    start: StartPeriod,
    naming: MonthNaming,
) -> MortgageResult<Schedule> {
    let mut cursor = PeriodCursor::new(start);
    let mut balance = principal;
    let mut year = YearTotals::default();
    let mut monthly_ledger = Vec::new();
    let mut annual_ledger = Vec::new();
    let mut total_interest = Decimal::ZERO;
    let mut tipping: Option<(u32, String)> = None;
    let mut terminal_correction = Decimal::ZERO;
    let mut drift_bound = Decimal::ZERO;
    let one_plus_r = Decimal::ONE.checked_add(periodic_rate).unwrap_or(Decimal::MAX);

    for period in 1..=period_count {
        let period_label = cursor.label(naming);
        let interest = balance
            .checked_mul(periodic_rate)
            .ok_or_else(|| overflow(period))?;
        let mut payment = level_payment;
        let mut principal_portion = payment
            .checked_sub(interest)
            .ok_or_else(|| overflow(period))?;
        balance = balance
            .checked_sub(principal_portion)
            .ok_or_else(|| overflow(period))?;
        total_interest = total_interest
            .checked_add(interest)
            .ok_or_else(|| overflow(period))?;
        // Saturates: once past Decimal range any residual is within drift.
        drift_bound = drift_bound
            .checked_mul(one_plus_r)
            .and_then(|b| b.checked_add(PER_PERIOD_DRIFT))
            .unwrap_or(Decimal::MAX);

        if period == period_count {
            terminal_correction = balance;
            payment = payment
                .checked_sub(terminal_correction)
                .ok_or_else(|| overflow(period))?;
            principal_portion = principal_portion
                .checked_sub(terminal_correction)
                .ok_or_else(|| overflow(period))?;
            balance = Decimal::ZERO;
            debug!(
                period,
                correction = %terminal_correction,
                "removed residual balance from final period"
            );
        }

        if tipping.is_none() && interest < principal_portion {
            tipping = Some((period, period_label.clone()));
        }

        let entry = PeriodEntry {
            period,
            period_label,
            total_payment: round_cents(payment),
            interest_portion: round_cents(interest),
            principal_portion: round_cents(principal_portion),
            remaining_balance: round_cents(balance),
        };

        year.add(&entry).ok_or_else(|| overflow(period))?;
        let closing_balance = entry.remaining_balance;
        monthly_ledger.push(entry);

        if cursor.is_year_end() || period == period_count {
            annual_ledger.push(year.flush(cursor.year(), closing_balance));
        }
        cursor.advance();
    }

    let correction_exceeds_drift = terminal_correction.abs() > drift_bound;
    if correction_exceeds_drift {
        warn!(
            correction = %terminal_correction,
            tolerance = %drift_bound,
            "terminal correction larger than rounding drift"
        );
    }

    let (tipping_point_period, tipping_point) = match tipping {
        Some((period, label)) => (Some(period), Some(label)),
        None => (None, None),
    };

    Ok(Schedule {
        monthly_ledger,
        annual_ledger,
        total_interest: round_cents(total_interest),
        tipping_point,
        tipping_point_period,
        terminal_correction,
        correction_exceeds_drift,
    })
}
