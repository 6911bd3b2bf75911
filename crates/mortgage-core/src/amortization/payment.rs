use rust_decimal::Decimal;

use crate::error::MortgageError;
use crate::types::{round_cents, Money, Rate};
use crate::MortgageResult;

/// Level payment of a fully amortizing loan, rounded to cents.
///
/// At a zero rate the loan repays straight-line (`principal / n`). Otherwise
/// the annuity payment `P * r * (1+r)^n / ((1+r)^n - 1)` is evaluated in the
/// equivalent discounted form `P * r / (1 - (1+r)^-n)`, which keeps the
/// intermediate power inside Decimal range for long, high-rate terms.
///
/// Inputs are assumed validated; only a zero period count is refused.
pub fn level_payment(principal: Money, periodic_rate: Rate, period_count: u32) -> MortgageResult<Money> {
    if period_count == 0 {
        return Err(MortgageError::InvalidPeriodCount(period_count));
    }

    if periodic_rate.is_zero() {
        return Ok(round_cents(principal / Decimal::from(period_count)));
    }

    let discount = Decimal::ONE / (Decimal::ONE + periodic_rate);
    let annuity_discount = Decimal::ONE - decimal_powi(discount, period_count);
    if annuity_discount.is_zero() {
        // Rate so small the discount factor rounds to one: straight-line.
        return Ok(round_cents(principal / Decimal::from(period_count)));
    }

    principal
        .checked_mul(periodic_rate)
        .and_then(|interest| interest.checked_div(annuity_discount))
        .map(round_cents)
        .ok_or_else(|| MortgageError::ArithmeticOverflow("level payment out of range".into()))
}

/// Raise a Decimal base to an integer exponent by repeated squaring.
fn decimal_powi(base: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let mut factor = base;
    let mut exp = n;
    while exp > 0 {
        if exp & 1 == 1 {
            result *= factor;
        }
        exp >>= 1;
        if exp > 0 {
            factor *= factor;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_annuity_payment_30_year() {
        // 200k at 6% for 30 years: the textbook 1,199.10
        let pmt = level_payment(dec!(200000), dec!(0.005), 360).unwrap();
        assert_eq!(pmt, dec!(1199.10));
    }

    #[test]
    fn test_out_of_range_payment_is_an_error() {
        let err = level_payment(Decimal::MAX, dec!(2), 12).unwrap_err();
        assert!(matches!(err, MortgageError::ArithmeticOverflow(_)));
    }

    #[test]
    fn test_annuity_payment_one_year() {
        // 80k at 5% over 12 months
        let pmt = level_payment(dec!(80000), dec!(0.05) / dec!(12), 12).unwrap();
        assert_eq!(pmt, dec!(6848.60));
    }

    #[test]
    fn test_single_period_repays_principal_plus_interest() {
        let pmt = level_payment(dec!(1000), dec!(0.01), 1).unwrap();
        assert_eq!(pmt, dec!(1010.00));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let pmt = level_payment(dec!(100000), Decimal::ZERO, 24).unwrap();
        assert_eq!(pmt, dec!(4166.67));
    }

    #[test]
    fn test_zero_principal_gives_zero_payment() {
        assert_eq!(
            level_payment(Decimal::ZERO, dec!(0.004), 120).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_payment_has_two_decimal_places() {
        let pmt = level_payment(dec!(123456.78), dec!(0.0043), 217).unwrap();
        assert_eq!(pmt, pmt.round_dp(2));
        assert!(pmt.scale() <= 2);
    }

    #[test]
    fn test_long_high_rate_term_stays_in_range() {
        // (1.1)^1200 overflows Decimal; the discounted form does not.
        let pmt = level_payment(dec!(500000), dec!(0.10), 1200).unwrap();
        assert_eq!(pmt, dec!(50000.00));
    }

    #[test]
    fn test_zero_periods_refused() {
        assert_eq!(
            level_payment(dec!(1000), dec!(0.01), 0),
            Err(MortgageError::InvalidPeriodCount(0))
        );
    }

    #[test]
    fn test_decimal_powi() {
        assert_eq!(decimal_powi(dec!(2), 0), Decimal::ONE);
        assert_eq!(decimal_powi(dec!(2), 10), dec!(1024));
        assert_eq!(decimal_powi(dec!(1.5), 3), dec!(3.375));
    }
}
