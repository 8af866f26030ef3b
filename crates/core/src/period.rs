//! Calendar month periods used to filter reports and key saved summaries.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

use crate::constants::{MAX_PERIOD_YEAR, MIN_PERIOD_YEAR};
use crate::error::{DomainError, DomainResult};

/// A validated calendar month (`month` in 1..=12).
///
/// The inclusive range of the month is `[first day 00:00:00, last day 23:59:59]`
/// in local wall-clock time; [`MonthPeriod::bounds`] converts it to UTC
/// instants for a given offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthPeriod {
    month: u32,
    year: i32,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl MonthPeriod {
    pub fn new(month: u32, year: i32) -> DomainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidPeriod(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        if !(MIN_PERIOD_YEAR..=MAX_PERIOD_YEAR).contains(&year) {
            return Err(DomainError::InvalidPeriod(format!(
                "year must be between {MIN_PERIOD_YEAR} and {MAX_PERIOD_YEAR}, got {year}"
            )));
        }

        let invalid = || DomainError::InvalidPeriod(format!("no such month: {year}-{month:02}"));
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        let last = next_first.pred_opt().ok_or_else(invalid)?;
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).ok_or_else(invalid)?;

        Ok(Self {
            month,
            year,
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(end_of_day),
        })
    }

    /// Parse a period from loosely-typed JSON values.
    ///
    /// Both fields are required; each may be a JSON number or a numeric string.
    pub fn from_json_values(
        month: Option<&serde_json::Value>,
        year: Option<&serde_json::Value>,
    ) -> DomainResult<Self> {
        let month = json_integer("month", month)?;
        let year = json_integer("year", year)?;
        Self::new(narrow_month(month)?, narrow_year(year)?)
    }

    /// Parse an optional period filter from query-string values.
    ///
    /// Returns `Ok(None)` unless both values are present and non-blank.
    pub fn from_query(month: Option<&str>, year: Option<&str>) -> DomainResult<Option<Self>> {
        let month = month.map(str::trim).filter(|m| !m.is_empty());
        let year = year.map(str::trim).filter(|y| !y.is_empty());
        let (Some(month), Some(year)) = (month, year) else {
            return Ok(None);
        };
        let month = parse_integer("month", month)?;
        let year = parse_integer("year", year)?;
        Self::new(narrow_month(month)?, narrow_year(year)?).map(Some)
    }

    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Inclusive UTC bounds of this month as seen from `offset`.
    #[must_use]
    pub fn bounds(&self, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
        let shift = TimeDelta::seconds(i64::from(offset.local_minus_utc()));
        ((self.start - shift).and_utc(), (self.end - shift).and_utc())
    }

    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>, offset: FixedOffset) -> bool {
        let (start, end) = self.bounds(offset);
        instant >= start && instant <= end
    }
}

impl std::fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

fn json_integer(field: &str, value: Option<&serde_json::Value>) -> DomainResult<i64> {
    match value {
        None | Some(serde_json::Value::Null) => {
            Err(DomainError::InvalidPeriod(format!("{field} is required")))
        },
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| DomainError::InvalidPeriod(format!("{field} must be an integer"))),
        Some(serde_json::Value::String(s)) => parse_integer(field, s),
        Some(_) => Err(DomainError::InvalidPeriod(format!("{field} must be numeric"))),
    }
}

fn parse_integer(field: &str, raw: &str) -> DomainResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| DomainError::InvalidPeriod(format!("{field} must be numeric, got '{raw}'")))
}

fn narrow_month(month: i64) -> DomainResult<u32> {
    u32::try_from(month).map_err(|_| {
        DomainError::InvalidPeriod(format!("month must be between 1 and 12, got {month}"))
    })
}

fn narrow_year(year: i64) -> DomainResult<i32> {
    i32::try_from(year).map_err(|_| {
        DomainError::InvalidPeriod(format!(
            "year must be between {MIN_PERIOD_YEAR} and {MAX_PERIOD_YEAR}, got {year}"
        ))
    })
}
