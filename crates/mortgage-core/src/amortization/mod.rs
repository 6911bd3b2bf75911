pub mod analysis;
pub mod payment;
pub mod schedule;
pub mod terms;

pub use analysis::{analyze_home_purchase, analyze_mortgage, MortgageSchedule};
pub use payment::level_payment;
pub use schedule::{build_schedule, AnnualEntry, PeriodEntry, Schedule};
pub use terms::{monthly_rate_from_annual_pct, HomePurchaseInput, LoanTerms};
