//! Complete mortgage analysis: level payment, ledgers and summary figures.

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::payment::level_payment;
use super::schedule::{build_schedule, AnnualEntry, PeriodEntry};
use super::terms::{HomePurchaseInput, LoanTerms};
use crate::error::MortgageError;
use crate::types::{round_cents, with_metadata, ComputationOutput, Money};
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageSchedule {
    /// Amount borrowed
    pub loan_amount: Money,
    /// Constant payment due each period
    pub level_payment: Money,
    pub number_of_payments: u32,
    /// Level payment x number of payments
    pub total_payment: Money,
    /// Sum of interest over the whole term
    pub total_interest: Money,
    /// Total interest as a percentage of the loan amount
    pub interest_to_principal_ratio_pct: Decimal,
    /// First period in which principal repaid exceeds interest
    pub tipping_point: Option<String>,
    pub tipping_point_period: Option<u32>,
    pub monthly_ledger: Vec<PeriodEntry>,
    pub annual_ledger: Vec<AnnualEntry>,
}

fn overflow(what: &str) -> MortgageError {
    MortgageError::ArithmeticOverflow(format!("{what} out of range"))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Amortize a fixed-rate loan.
///
/// Terms are validated up front; on any invalid field nothing is computed.
pub fn analyze_mortgage(terms: &LoanTerms) -> MortgageResult<ComputationOutput<MortgageSchedule>> {
    let start = Instant::now();
    terms.validate()?;
    let mut warnings: Vec<String> = Vec::new();

    if terms.principal.is_zero() {
        warnings.push("Principal is zero; schedule contains only zero payments.".into());
    }
    if terms.periodic_rate.is_zero() {
        warnings.push("Periodic rate is zero; principal is repaid straight-line.".into());
    }

    let payment = level_payment(terms.principal, terms.periodic_rate, terms.period_count)?;
    debug!(%payment, periods = terms.period_count, "computed level payment");

    let schedule = build_schedule(
        terms.principal,
        payment,
        terms.periodic_rate,
        terms.period_count,
        terms.start,
        terms.month_names,
    )?;

    if schedule.correction_exceeds_drift {
        warnings.push(format!(
            "Final payment corrected by {} which exceeds accumulated rounding drift.",
            schedule.terminal_correction
        ));
    }
    if let Some(last) = schedule.monthly_ledger.last() {
        if last.principal_portion < Decimal::ZERO {
            warnings.push(format!(
                "Final period principal portion is negative ({}) after correction.",
                last.principal_portion
            ));
        }
    }
    if schedule.tipping_point.is_none() {
        warnings.push("Principal repayment never exceeds interest within the term.".into());
    }

    let interest_to_principal_ratio_pct = if terms.principal.is_zero() {
        Decimal::ZERO
    } else {
        schedule
            .total_interest
            .checked_div(terms.principal)
            .and_then(|share| share.checked_mul(dec!(100)))
            .map(round_cents)
            .ok_or_else(|| overflow("interest-to-principal ratio"))?
    };
    let total_payment = payment
        .checked_mul(Decimal::from(terms.period_count))
        .map(round_cents)
        .ok_or_else(|| overflow("total payment"))?;

    let output = MortgageSchedule {
        loan_amount: terms.principal,
        level_payment: payment,
        number_of_payments: terms.period_count,
        total_payment,
        total_interest: schedule.total_interest,
        interest_to_principal_ratio_pct,
        tipping_point: schedule.tipping_point,
        tipping_point_period: schedule.tipping_point_period,
        monthly_ledger: schedule.monthly_ledger,
        annual_ledger: schedule.annual_ledger,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "periodic_rate": terms.periodic_rate.to_string(),
        "start": terms.start.to_string(),
        "rounding": "2dp, half to even",
        "interest": "charged on exact opening balance, rows rounded to cents",
        "terminal_correction": schedule.terminal_correction.to_string(),
    });

    Ok(with_metadata(
        "Fixed-rate level-payment amortization",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Derive loan terms from a home purchase, then amortize.
pub fn analyze_home_purchase(
    input: &HomePurchaseInput,
) -> MortgageResult<ComputationOutput<MortgageSchedule>> {
    let terms = input.loan_terms()?;
    analyze_mortgage(&terms)
}
