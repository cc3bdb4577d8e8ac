// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business-timezone calendar arithmetic.
//!
//! Every fulfillment date in the system is a calendar date in the business
//! timezone, not an instant. This module is the only place where instants
//! and calendar dates are converted into each other.
//!
//! ## Invariants
//!
//! - "Today" is always derived from an instant through the business timezone
//! - Dates cross the boundary as `YYYY-MM-DD` strings only
//! - Weekdays cross the boundary as `0 = Sunday … 6 = Saturday`

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::DomainError;

/// The timezone in which all fulfillment dates and cutoffs are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessTimezone {
    tz: Tz,
}

impl BusinessTimezone {
    /// Mountain Time, where the bakery operates.
    pub const DEFAULT_NAME: &'static str = "America/Boise";

    /// Parses an IANA timezone name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is unknown.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let tz: Tz = name
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))?;
        Ok(Self { tz })
    }

    /// Returns the underlying `chrono-tz` zone.
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.tz
    }

    /// Returns the IANA name of the zone.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Returns the calendar date of `now` in business time.
    #[must_use]
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz).date_naive()
    }

    /// Maps a wall-clock time on a business-calendar date to an instant.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant.
    /// Non-existent times (DST spring-forward) resolve one hour later.
    ///
    /// # Errors
    ///
    /// Returns an error if the local time cannot be resolved.
    pub fn localize(&self, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, DomainError> {
        let naive = date.and_time(time);
        let resolved = self
            .tz
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| {
                self.tz
                    .from_local_datetime(&(naive + chrono::Duration::hours(1)))
                    .earliest()
            })
            .ok_or_else(|| DomainError::UnresolvableLocalTime {
                date,
                time: time.format("%H:%M").to_string(),
            })?;
        Ok(resolved.with_timezone(&Utc))
    }
}

impl Default for BusinessTimezone {
    fn default() -> Self {
        Self { tz: Tz::America__Boise }
    }
}

impl std::fmt::Display for BusinessTimezone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Converts a boundary weekday index (`0 = Sunday`) to a `Weekday`.
///
/// # Errors
///
/// Returns `DomainError::InvalidWeekday` if the index is outside `0..=6`.
pub const fn weekday_from_index(index: i32) -> Result<Weekday, DomainError> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        _ => Err(DomainError::InvalidWeekday(index)),
    }
}

/// Converts a `Weekday` to its boundary index (`0 = Sunday`).
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn weekday_index(weekday: Weekday) -> i32 {
    weekday.num_days_from_sunday() as i32
}

/// Parses a strict `HH:MM` 24-hour time.
///
/// # Errors
///
/// Returns `DomainError::InvalidTime` for anything other than two-digit
/// hours `00..=23`, a colon, and two-digit minutes `00..=59`.
pub fn parse_time_hhmm(value: &str) -> Result<NaiveTime, DomainError> {
    let invalid = |reason: &str| DomainError::InvalidTime {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid("expected HH:MM"));
    }
    if !bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit) {
        return Err(invalid("expected digits"));
    }

    let hour: u32 = u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0');
    let minute: u32 = u32::from(bytes[3] - b'0') * 10 + u32::from(bytes[4] - b'0');

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| invalid("hour or minute out of range"))
}

/// Formats a time as `HH:MM`.
#[must_use]
pub fn format_time_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Adds whole days to a date.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the result is out of range.
pub fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate, DomainError> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("adding {days} days to {date}"),
        })
}

/// Subtracts whole days from a date.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the result is out of range.
pub fn sub_days(date: NaiveDate, days: u32) -> Result<NaiveDate, DomainError> {
    date.checked_sub_days(Days::new(u64::from(days)))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("subtracting {days} days from {date}"),
        })
}

/// Returns the most recent date on or before `date` that falls on `weekday`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the result is out of range.
pub fn most_recent_weekday_on_or_before(
    date: NaiveDate,
    weekday: Weekday,
) -> Result<NaiveDate, DomainError> {
    let back: u32 =
        (date.weekday().num_days_from_sunday() + 7 - weekday.num_days_from_sunday()) % 7;
    sub_days(date, back)
}

/// Formats an optional time window override as customer-facing text.
///
/// Returns `None` unless both ends are set.
#[must_use]
pub fn format_time_window(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!(
            "{} - {}",
            start.format("%-I:%M %p"),
            end.format("%-I:%M %p")
        )),
        _ => None,
    }
}
