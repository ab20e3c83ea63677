// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DraftLine, ShiftDraft};
use time::macros::{date, datetime, time};
use time::{OffsetDateTime, Time};
use tip_split_audit::{Actor, Cause};
use tip_split_domain::TipPools;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("manager-1"), String::from("manager"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-42"), String::from("Close out dinner"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-14 23:30 UTC)
}

pub fn create_test_line(
    employee_number: u32,
    position: &str,
    point_value: f64,
    clock_in: Time,
    clock_out: Time,
) -> DraftLine {
    DraftLine {
        employee_number: Some(employee_number),
        employee_name: format!("Employee {employee_number}"),
        position: Some(position.to_string()),
        point_value,
        clock_in: Some(clock_in),
        clock_out: Some(clock_out),
    }
}

/// A server and a busser on a 3:1 point split: 8h at 1.5 and 4h at 1.0.
pub fn create_test_draft() -> ShiftDraft {
    let mut draft: ShiftDraft = ShiftDraft::new(
        Some(date!(2026-03-14)),
        Some(String::from("Dinner")),
        TipPools::new(80.0, 20.0, 20.0),
    );
    draft.push_line(create_test_line(101, "Server", 1.5, time!(16:00), time!(00:00)));
    draft.push_line(create_test_line(102, "Busser", 1.0, time!(18:00), time!(22:00)));
    draft
}
