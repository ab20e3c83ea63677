// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, compute_hours_worked, format_clock_time, parse_clock_time, parse_shift_date};
use time::Time;
use time::macros::{date, time};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_parse_clock_time_accepts_hours_and_minutes() {
    let parsed: Option<Time> = parse_clock_time("09:30").unwrap();
    assert_eq!(parsed, Some(time!(09:30)));
}

#[test]
fn test_parse_clock_time_accepts_seconds() {
    let parsed: Option<Time> = parse_clock_time("17:45:10").unwrap();
    assert_eq!(parsed, Some(time!(17:45:10)));
}

#[test]
fn test_parse_clock_time_treats_empty_as_absent() {
    assert_eq!(parse_clock_time("").unwrap(), None);
    assert_eq!(parse_clock_time("   ").unwrap(), None);
}

#[test]
fn test_parse_clock_time_rejects_garbage() {
    let result: Result<Option<Time>, DomainError> = parse_clock_time("25:99");
    assert!(matches!(result, Err(DomainError::TimeParseError { .. })));

    let result: Result<Option<Time>, DomainError> = parse_clock_time("noon");
    assert!(matches!(result, Err(DomainError::TimeParseError { .. })));
}

#[test]
fn test_format_clock_time_pads_values() {
    assert_eq!(format_clock_time(time!(07:05)), "07:05");
    assert_eq!(format_clock_time(time!(23:59:59)), "23:59:59");
}

#[test]
fn test_format_clock_time_parses_back_to_the_same_time() {
    for value in [time!(00:00), time!(09:00:00), time!(16:07:30), time!(23:59:01)] {
        let text: String = format_clock_time(value);
        assert_eq!(parse_clock_time(&text).unwrap(), Some(value));
    }
    assert_eq!(format_clock_time(time!(16:07:30)), "16:07:30");
}

#[test]
fn test_parse_shift_date() {
    assert_eq!(parse_shift_date("2026-03-14").unwrap(), date!(2026 - 03 - 14));
    assert!(matches!(
        parse_shift_date("14/03/2026"),
        Err(DomainError::DateParseError { .. })
    ));
}

#[test]
fn test_hours_worked_same_day() {
    let hours: f64 = compute_hours_worked(Some(time!(10:00)), Some(time!(16:30)), None);
    assert!(approx_eq(hours, 6.5));
}

#[test]
fn test_hours_worked_crossing_midnight() {
    let hours: f64 = compute_hours_worked(Some(time!(22:00)), Some(time!(02:00)), Some(0));
    assert!(approx_eq(hours, 4.0));
}

#[test]
fn test_hours_worked_is_never_negative() {
    let hours: f64 = compute_hours_worked(Some(time!(23:59)), Some(time!(00:01)), None);
    assert!(hours > 0.0);
    assert!(approx_eq(hours, 2.0 / 60.0));
}

#[test]
fn test_hours_worked_equal_times_is_zero() {
    let hours: f64 = compute_hours_worked(Some(time!(12:00)), Some(time!(12:00)), None);
    assert_eq!(hours, 0.0);
}

#[test]
fn test_hours_worked_missing_input_is_zero() {
    assert_eq!(compute_hours_worked(None, Some(time!(12:00)), None), 0.0);
    assert_eq!(compute_hours_worked(Some(time!(12:00)), None, Some(15)), 0.0);
    assert_eq!(compute_hours_worked(None, None, None), 0.0);
}

#[test]
fn test_rounding_down_to_whole_hour() {
    // 7h07m rounds 7 minutes to the nearest 15 -> 0.
    let hours: f64 = compute_hours_worked(Some(time!(09:00)), Some(time!(16:07)), Some(15));
    assert!(approx_eq(hours, 7.0));
}

#[test]
fn test_rounding_up_to_next_increment() {
    // 5h08m rounds 8 minutes to 15.
    let hours: f64 = compute_hours_worked(Some(time!(09:00)), Some(time!(14:08)), Some(15));
    assert!(approx_eq(hours, 5.25));
}

#[test]
fn test_rounding_half_rounds_up() {
    // 3h30m with a 60-minute increment is exactly half way.
    let hours: f64 = compute_hours_worked(Some(time!(08:00)), Some(time!(11:30)), Some(60));
    assert!(approx_eq(hours, 4.0));
}

#[test]
fn test_rounding_ties_round_up_for_uneven_steps() {
    // Each of these sits exactly half way between two increments.
    // 7h05m to the nearest 10 is 7h10m.
    let hours: f64 = compute_hours_worked(Some(time!(09:00)), Some(time!(16:05)), Some(10));
    assert!(approx_eq(hours, 7.0 + 10.0 / 60.0));

    // 6h03m to the nearest 6 is 6h06m.
    let hours: f64 = compute_hours_worked(Some(time!(10:00)), Some(time!(16:03)), Some(6));
    assert!(approx_eq(hours, 6.1));

    // 8h10m to the nearest 20 is 8h20m.
    let hours: f64 = compute_hours_worked(Some(time!(08:00)), Some(time!(16:10)), Some(20));
    assert!(approx_eq(hours, 8.0 + 20.0 / 60.0));
}

#[test]
fn test_rounding_uses_seconds_past_the_hour() {
    // 7h07m29s is just under half of 15 minutes; 7h07m30s is exactly half.
    let below: f64 =
        compute_hours_worked(Some(time!(09:00:00)), Some(time!(16:07:29)), Some(15));
    let tie: f64 = compute_hours_worked(Some(time!(09:00:00)), Some(time!(16:07:30)), Some(15));
    assert!(approx_eq(below, 7.0));
    assert!(approx_eq(tie, 7.25));
}

#[test]
fn test_rounding_can_carry_into_next_hour() {
    // 2h55m to the nearest 15 is 3h00m.
    let hours: f64 = compute_hours_worked(Some(time!(11:00)), Some(time!(13:55)), Some(15));
    assert!(approx_eq(hours, 3.0));
}

#[test]
fn test_zero_rounding_returns_raw_hours() {
    let raw: f64 = compute_hours_worked(Some(time!(09:00)), Some(time!(16:07)), None);
    let zero: f64 = compute_hours_worked(Some(time!(09:00)), Some(time!(16:07)), Some(0));
    assert_eq!(raw, zero);
    assert!(approx_eq(raw, 7.0 + 7.0 / 60.0));
}

#[test]
fn test_rounding_applies_to_overnight_spans() {
    // 21:50 -> 01:58 is 4h08m, rounds to 4h15m.
    let hours: f64 = compute_hours_worked(Some(time!(21:50)), Some(time!(01:58)), Some(15));
    assert!(approx_eq(hours, 4.25));
}

#[test]
fn test_hours_worked_is_deterministic() {
    let first: f64 = compute_hours_worked(Some(time!(17:12)), Some(time!(01:41)), Some(5));
    let second: f64 = compute_hours_worked(Some(time!(17:12)), Some(time!(01:41)), Some(5));
    assert_eq!(first, second);
}
