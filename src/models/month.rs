use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::errors::SubscriptionError;

static MONTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})-([0-9]{4})$").expect("month pattern is valid"));

/// A (year, month) pair; the unit of billing granularity.
///
/// Field order matters: the derived `Ord` compares year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, SubscriptionError> {
        if !(1..=12).contains(&month) {
            return Err(SubscriptionError::format(format!(
                "month must be between 01 and 12, got {}",
                month
            )));
        }
        if !(0..=9999).contains(&year) {
            return Err(SubscriptionError::format(format!(
                "year must have four digits, got {}",
                year
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Dense index used by storage so month comparisons become integer comparisons.
    pub fn ordinal(&self) -> i32 {
        self.year * 12 + self.month as i32 - 1
    }

    pub fn from_ordinal(ordinal: i32) -> Self {
        Self {
            year: ordinal.div_euclid(12),
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }
}

/// Parse `MM-YYYY` text into a calendar month.
pub fn parse_month(text: &str) -> Result<CalendarMonth, SubscriptionError> {
    let captures = MONTH_PATTERN.captures(text).ok_or_else(|| {
        SubscriptionError::format(format!("expected MM-YYYY, got {:?}", text))
    })?;

    let month: u32 = captures[1]
        .parse()
        .map_err(|_| SubscriptionError::format(format!("invalid month in {:?}", text)))?;
    let year: i32 = captures[2]
        .parse()
        .map_err(|_| SubscriptionError::format(format!("invalid year in {:?}", text)))?;

    CalendarMonth::new(year, month)
}

/// Render a calendar month as `MM-YYYY`.
pub fn format_month(month: CalendarMonth) -> String {
    format!("{:02}-{:04}", month.month, month.year)
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_month(*self))
    }
}

impl FromStr for CalendarMonth {
    type Err = SubscriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_month(s)
    }
}
