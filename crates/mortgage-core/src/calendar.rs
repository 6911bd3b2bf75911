//! Month/year bookkeeping for the period loop.
//!
//! Periods are uniform calendar months. A [`PeriodCursor`] walks them from a
//! validated [`StartPeriod`] and renders each one as a "Month YYYY" label.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::MortgageResult;

const STANDARD_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Month names as printed by earlier reports.
const LEGACY_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "Oktober",
    "November",
    "December",
];

/// Which month-name table period labels are rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthNaming {
    /// English month names.
    #[default]
    Standard,
    /// The legacy table, which spells the tenth month "Oktober".
    Legacy,
}

impl MonthNaming {
    fn table(self) -> &'static [&'static str; 12] {
        match self {
            MonthNaming::Standard => &STANDARD_MONTHS,
            MonthNaming::Legacy => &LEGACY_MONTHS,
        }
    }
}

/// Full name of a 1-based month, or `None` outside 1..=12.
pub fn month_name(month: u32, naming: MonthNaming) -> Option<&'static str> {
    if (1..=12).contains(&month) {
        Some(naming.table()[(month - 1) as usize])
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// StartPeriod
// ---------------------------------------------------------------------------

/// Calendar month in which the first payment falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartPeriod {
    /// Month, 1 = January
    pub month: u32,
    pub year: i32,
}

impl StartPeriod {
    pub fn new(month: u32, year: i32) -> MortgageResult<Self> {
        let start = StartPeriod { month, year };
        start.validate()?;
        Ok(start)
    }

    /// Parse an `mm/yyyy` string such as `03/2025`: a two-digit month
    /// 01-12 and a four-digit year, surrounding whitespace ignored.
    pub fn parse(s: &str) -> MortgageResult<Self> {
        let trimmed = s.trim();
        let invalid =
            || MortgageError::InvalidStartPeriod(format!("'{trimmed}' is not in mm/yyyy form"));
        let well_formed = trimmed.len() == 7
            && trimmed.as_bytes()[2] == b'/'
            && trimmed
                .bytes()
                .enumerate()
                .all(|(i, b)| i == 2 || b.is_ascii_digit());
        if !well_formed {
            return Err(invalid());
        }
        let date = NaiveDate::parse_from_str(&format!("01/{trimmed}"), "%d/%m/%Y")
            .map_err(|_| invalid())?;
        Ok(Self::from_date(date))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        StartPeriod {
            month: date.month(),
            year: date.year(),
        }
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn validate(&self) -> MortgageResult<()> {
        if !(1..=12).contains(&self.month) {
            return Err(MortgageError::InvalidStartPeriod(format!(
                "month {} is outside 1..12",
                self.month
            )));
        }
        Ok(())
    }
}

impl fmt::Display for StartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

// ---------------------------------------------------------------------------
// PeriodCursor
// ---------------------------------------------------------------------------

/// Month/year position inside the period loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodCursor {
    month: u32,
    year: i32,
}

impl PeriodCursor {
    pub fn new(start: StartPeriod) -> Self {
        PeriodCursor {
            month: start.month.clamp(1, 12),
            year: start.year,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// December closes a calendar year.
    pub fn is_year_end(&self) -> bool {
        self.month % 12 == 0
    }

    /// "Month YYYY" label for the current period.
    pub fn label(&self, naming: MonthNaming) -> String {
        let name = month_name(self.month, naming).unwrap_or_default();
        format!("{name} {}", self.year)
    }

    /// Step to the next month, rolling the year after December.
    pub fn advance(&mut self) {
        if self.is_year_end() {
            self.month = 1;
            self.year = self.year.saturating_add(1);
        } else {
            self.month += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name_lookup() {
        assert_eq!(month_name(1, MonthNaming::Standard), Some("January"));
        assert_eq!(month_name(12, MonthNaming::Standard), Some("December"));
        assert_eq!(month_name(0, MonthNaming::Standard), None);
        assert_eq!(month_name(13, MonthNaming::Legacy), None);
    }

    #[test]
    fn test_legacy_table_differs_only_in_october() {
        for m in 1..=12 {
            let standard = month_name(m, MonthNaming::Standard);
            let legacy = month_name(m, MonthNaming::Legacy);
            if m == 10 {
                assert_eq!(standard, Some("October"));
                assert_eq!(legacy, Some("Oktober"));
            } else {
                assert_eq!(standard, legacy);
            }
        }
    }

    #[test]
    fn test_start_period_parse() {
        let start = StartPeriod::parse("03/2025").unwrap();
        assert_eq!(start, StartPeriod { month: 3, year: 2025 });
        assert_eq!(start.to_string(), "03/2025");

        let padded = StartPeriod::parse(" 12/2030 ").unwrap();
        assert_eq!(padded, StartPeriod { month: 12, year: 2030 });
    }

    #[test]
    fn test_start_period_parse_rejects_garbage() {
        assert!(matches!(
            StartPeriod::parse("13/2025"),
            Err(MortgageError::InvalidStartPeriod(_))
        ));
        assert!(StartPeriod::parse("2025-03").is_err());
        assert!(StartPeriod::parse("").is_err());
    }

    #[test]
    fn test_start_period_parse_requires_two_digit_month_and_four_digit_year() {
        for input in ["3/2025", "03/25", "003/2025", "03/02025", "00/2025", "+3/2025", "03-2025"] {
            assert!(
                matches!(
                    StartPeriod::parse(input),
                    Err(MortgageError::InvalidStartPeriod(_))
                ),
                "accepted {input:?}"
            );
        }
        assert!(StartPeriod::parse("01/2099").is_ok());
    }

    #[test]
    fn test_start_period_new_validates_month() {
        assert!(StartPeriod::new(0, 2025).is_err());
        assert!(StartPeriod::new(13, 2025).is_err());
        assert!(StartPeriod::new(7, 2025).is_ok());
    }

    #[test]
    fn test_start_period_from_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(
            StartPeriod::from_date(date),
            StartPeriod { month: 10, year: 2026 }
        );
    }

    #[test]
    fn test_cursor_rolls_year_after_december() {
        let mut cursor = PeriodCursor::new(StartPeriod { month: 11, year: 2024 });
        assert_eq!(cursor.label(MonthNaming::Standard), "November 2024");
        assert!(!cursor.is_year_end());

        cursor.advance();
        assert_eq!(cursor.label(MonthNaming::Standard), "December 2024");
        assert!(cursor.is_year_end());

        cursor.advance();
        assert_eq!(cursor.year(), 2025);
        assert!(!cursor.is_year_end());
        assert_eq!(cursor.label(MonthNaming::Standard), "January 2025");
    }

    #[test]
    fn test_cursor_label_uses_naming() {
        let cursor = PeriodCursor::new(StartPeriod { month: 10, year: 2025 });
        assert_eq!(cursor.label(MonthNaming::Standard), "October 2025");
        assert_eq!(cursor.label(MonthNaming::Legacy), "Oktober 2025");
    }
}
