// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Clock-time parsing and hours-worked calculation.
//!
//! Clock times carry no date. Hours are always computed on a single fixed
//! reference date so the result never depends on the calendar or timezone.

use crate::error::DomainError;
use time::macros::{date, format_description};
use time::{Date, Duration, PrimitiveDateTime, Time};

/// The date every clock-in/clock-out pair is anchored to.
const REFERENCE_DATE: Date = date!(2000 - 01 - 01);

const SECONDS_PER_HOUR: i64 = 3600;

/// Parses a time-of-day string.
///
/// Accepts `HH:MM` and `HH:MM:SS`. Empty or whitespace-only input means the
/// time was not entered and yields `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the input is non-empty and not a valid time of day.
pub fn parse_clock_time(input: &str) -> Result<Option<Time>, DomainError> {
    let trimmed: &str = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let with_seconds = format_description!("[hour]:[minute]:[second]");
    let without_seconds = format_description!("[hour]:[minute]");

    Time::parse(trimmed, &with_seconds)
        .or_else(|_| Time::parse(trimmed, &without_seconds))
        .map(Some)
        .map_err(|e| DomainError::TimeParseError {
            input: input.to_string(),
            error: e.to_string(),
        })
}

/// Formats a time of day as `HH:MM`, or `HH:MM:SS` when it has seconds.
///
/// The output always parses back to the same value with [`parse_clock_time`].
#[must_use]
pub fn format_clock_time(value: Time) -> String {
    if value.second() == 0 {
        format!("{:02}:{:02}", value.hour(), value.minute())
    } else {
        format!(
            "{:02}:{:02}:{:02}",
            value.hour(),
            value.minute(),
            value.second()
        )
    }
}

/// Parses a shift date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns an error if the input is not a valid calendar date.
pub fn parse_shift_date(input: &str) -> Result<Date, DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(input.trim(), &format).map_err(|e| DomainError::DateParseError {
        input: input.to_string(),
        error: e.to_string(),
    })
}

/// Computes decimal hours worked between two times of day.
///
/// - If either time is absent the result is `0.0`.
/// - A clock-out earlier than the clock-in is treated as crossing midnight,
///   so `22:00`→`02:00` is `4.0` hours. Equal times yield `0.0`.
/// - With a rounding increment greater than zero, the minutes past the whole
///   hour are rounded half-up to the nearest multiple of the increment.
///   `None` or `Some(0)` returns the raw value.
///
/// # Arguments
///
/// * `clock_in` - Clock-in time of day
/// * `clock_out` - Clock-out time of day
/// * `rounding_minutes` - Optional rounding increment in minutes
#[must_use]
pub fn compute_hours_worked(
    clock_in: Option<Time>,
    clock_out: Option<Time>,
    rounding_minutes: Option<u32>,
) -> f64 {
    let (Some(clock_in), Some(clock_out)) = (clock_in, clock_out) else {
        return 0.0;
    };

    let start: PrimitiveDateTime = PrimitiveDateTime::new(REFERENCE_DATE, clock_in);
    let mut end: PrimitiveDateTime = PrimitiveDateTime::new(REFERENCE_DATE, clock_out);
    if end < start {
        end += Duration::days(1);
    }

    let elapsed: Duration = end - start;

    match rounding_minutes {
        Some(increment) if increment > 0 => round_to_increment(elapsed, increment),
        _ => elapsed.as_seconds_f64() / 3600.0,
    }
}

/// Rounds the time past the whole hour to the nearest `increment` minutes,
/// half-up, on whole seconds.
fn round_to_increment(elapsed: Duration, increment: u32) -> f64 {
    let total_seconds: i64 = elapsed.whole_seconds();
    let whole_hours: i64 = total_seconds / SECONDS_PER_HOUR;
    let remainder: i64 = total_seconds % SECONDS_PER_HOUR;

    let step: i64 = i64::from(increment) * 60;
    let rounded: i64 = (remainder + step / 2) / step * step;

    let rounded_seconds: i64 = whole_hours * SECONDS_PER_HOUR + rounded;
    Duration::seconds(rounded_seconds).as_seconds_f64() / 3600.0
}
