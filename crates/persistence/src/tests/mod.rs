// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]


use crate::Persistence;
use time::OffsetDateTime;
use time::macros::{date, datetime, time};
use tip_split::{DraftLine, ShiftDraft, ShiftRecord, calculate};
use tip_split_audit::{Actor, Cause};
use tip_split_domain::TipPools;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("manager"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn test_created_at() -> OffsetDateTime {
    datetime!(2026-03-14 23:30:15 UTC)
}

pub fn create_test_line(employee_number: u32, position: &str, point_value: f64) -> DraftLine {
    DraftLine {
        employee_number: Some(employee_number),
        employee_name: format!("Employee {employee_number}"),
        position: Some(position.to_string()),
        point_value,
        clock_in: Some(time!(17:00)),
        clock_out: Some(time!(23:30)),
    }
}

pub fn create_test_draft(line_count: u32) -> ShiftDraft {
    let mut draft: ShiftDraft = ShiftDraft::new(
        Some(date!(2026-03-14)),
        Some(String::from("Dinner")),
        TipPools::new(312.40, 25.0, 88.0),
    );
    for number in 1..=line_count {
        draft.push_line(create_test_line(100 + number, "Server", 1.0 + f64::from(number) / 10.0));
    }
    draft
}

/// A calculated, unstored record with the given number of lines.
pub fn create_test_record(line_count: u32) -> ShiftRecord {
    calculate(&create_test_draft(line_count), 0)
        .unwrap()
        .into_record(test_created_at())
}
