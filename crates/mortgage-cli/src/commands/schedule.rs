use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;

use mortgage_core::amortization::{self, monthly_rate_from_annual_pct, HomePurchaseInput, LoanTerms};
use mortgage_core::calendar::{MonthNaming, StartPeriod};

use crate::input;

/// Arguments for amortizing a loan directly
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to a JSON or YAML loan document (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 5.25)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Amortization period in years
    #[arg(long, conflicts_with = "months")]
    pub years: Option<u32>,

    /// Amortization period in months
    #[arg(long)]
    pub months: Option<u32>,

    /// Month of the first payment, mm/yyyy (defaults to the current month)
    #[arg(long)]
    pub start: Option<String>,

    /// Spell October "Oktober" as earlier releases did
    #[arg(long)]
    pub legacy_month_names: bool,
}

/// Arguments for amortizing the mortgage on a home purchase
#[derive(Args)]
pub struct PurchaseArgs {
    /// Path to a JSON or YAML purchase document (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price of the home
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Down payment, at least 20% of the purchase price
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 5.25)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Amortization period in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Month of the first payment, mm/yyyy (defaults to the current month)
    #[arg(long)]
    pub start: Option<String>,

    /// Spell October "Oktober" as earlier releases did
    #[arg(long)]
    pub legacy_month_names: bool,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let period_count = match (args.years, args.months) {
            (_, Some(months)) => months,
            (Some(years), None) => years
                .checked_mul(12)
                .ok_or("--years is too large")?,
            (None, None) => return Err("--years or --months is required (or provide --input)".into()),
        };
        LoanTerms {
            principal: args.principal
                .ok_or("--principal is required (or provide --input)")?,
            periodic_rate: monthly_rate_from_annual_pct(
                args.annual_rate
                    .ok_or("--annual-rate is required (or provide --input)")?,
            ),
            period_count,
            start: start_period(args.start.as_deref())?,
            month_names: month_naming(args.legacy_month_names),
        }
    };

    info!(principal = %terms.principal, periods = terms.period_count, start = %terms.start, "amortizing loan");
    let result = amortization::analyze_mortgage(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_purchase(args: PurchaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let purchase: HomePurchaseInput = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        HomePurchaseInput {
            purchase_price: args.purchase_price
                .ok_or("--purchase-price is required (or provide --input)")?,
            down_payment: args.down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            annual_rate_pct: args.annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            amortization_years: args.years
                .ok_or("--years is required (or provide --input)")?,
            start: start_period(args.start.as_deref())?,
            month_names: month_naming(args.legacy_month_names),
        }
    };

    info!(
        purchase_price = %purchase.purchase_price,
        down_payment = %purchase.down_payment,
        "amortizing home purchase"
    );
    let result = amortization::analyze_home_purchase(&purchase)?;
    Ok(serde_json::to_value(result)?)
}

fn start_period(raw: Option<&str>) -> Result<StartPeriod, Box<dyn std::error::Error>> {
    match raw {
        Some(s) => Ok(StartPeriod::parse(s)?),
        None => Ok(StartPeriod::current()),
    }
}

fn month_naming(legacy: bool) -> MonthNaming {
    if legacy {
        MonthNaming::Legacy
    } else {
        MonthNaming::Standard
    }
}
