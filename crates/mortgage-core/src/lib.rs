//! Fixed-rate mortgage amortization with decimal precision.
//!
//! The engine derives the level payment of a fully amortizing loan, then
//! walks the term period by period to produce a monthly ledger, a calendar
//! year roll-up, total interest and the tipping point where principal
//! repayment first exceeds interest.

pub mod amortization;
pub mod calendar;
pub mod error;
pub mod types;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
