use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Decimal places kept on every reported figure.
pub const CENTS_DP: u32 = 2;

/// The one rounding policy used across the crate.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

/// Round to cents with the crate-wide strategy.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENTS_DP, ROUNDING)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_cents_is_half_even() {
        assert_eq!(round_cents(dec!(1.005)), dec!(1.00));
        assert_eq!(round_cents(dec!(1.015)), dec!(1.02));
        assert_eq!(round_cents(dec!(-2.345)), dec!(-2.34));
        assert_eq!(round_cents(dec!(7.129)), dec!(7.13));
    }

    #[test]
    fn test_with_metadata_fills_envelope() {
        let out = with_metadata(
            "Test",
            &serde_json::json!({ "k": 1 }),
            vec!["w".into()],
            42,
            dec!(3.5),
        );
        assert_eq!(out.result, dec!(3.5));
        assert_eq!(out.methodology, "Test");
        assert_eq!(out.assumptions["k"], 1);
        assert_eq!(out.warnings, vec!["w".to_string()]);
        assert_eq!(out.metadata.computation_time_us, 42);
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }
}
