// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar dates and months.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// A calendar month, parsed from strict `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day + chrono::Days::new(u64::from(self.days_in_month() - 1))
    }

    pub fn days_in_month(&self) -> u32 {
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            // Only reachable at the end of chrono's supported range.
            .unwrap_or(28)
    }

    /// The date of day `day` (1-based) of this month.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        self.first_day.with_day(day)
    }

    /// Every date of the month in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.days_in_month()).filter_map(|d| self.day(d))
    }
}

impl FromStr for YearMonth {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidInput(format!("Invalid month '{}': expected YYYY-MM", raw));

        let bytes = raw.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(idx, b)| idx == 4 || b.is_ascii_digit());
        if !well_formed {
            return Err(invalid());
        }

        let year: i32 = raw[..4].parse().map_err(|_| invalid())?;
        let month: u32 = raw[5..].parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    if raw.len() != 10 {
        return Err(AppError::InvalidInput(format!(
            "Invalid date '{}': expected YYYY-MM-DD",
            raw
        )));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::InvalidInput(format!("Invalid date '{}': expected YYYY-MM-DD", raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        let ym: YearMonth = "2025-03".parse().unwrap();
        assert_eq!(ym.year(), 2025);
        assert_eq!(ym.month(), 3);
        assert_eq!(ym.to_string(), "2025-03");
    }

    #[test]
    fn test_rejects_malformed_months() {
        for raw in ["2025-13", "2025-00", "2025-1", "25-01", "abcd-ef", "2025/01", "", "2025-01-01"] {
            let err = raw.parse::<YearMonth>().unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_days_in_month() {
        let cases = [
            ("2024-02", 29),
            ("2025-02", 28),
            ("1900-02", 28),
            ("2000-02", 29),
            ("2025-04", 30),
            ("2025-12", 31),
            ("2025-01", 31),
        ];
        for (raw, expected) in cases {
            let ym: YearMonth = raw.parse().unwrap();
            assert_eq!(ym.days_in_month(), expected, "{raw}");
        }
    }

    #[test]
    fn test_month_bounds() {
        let ym: YearMonth = "2025-12".parse().unwrap();
        assert_eq!(ym.first_day(), NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(ym.last_day(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(ym.dates().count(), 31);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-09").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
        );
        assert!(parse_date("2025-3-9").is_err());
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("tomorrow").is_err());
    }
}
