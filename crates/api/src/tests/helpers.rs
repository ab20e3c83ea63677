// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use time::OffsetDateTime;
use time::macros::datetime;
use tip_split::InMemoryStore;
use tip_split_audit::{Actor, Cause};

use crate::{
    EmployeeRequest, PositionRequest, ShiftLineRequest, ShiftRequest, ShiftTypeRequest,
    create_employee, create_position, create_shift_type,
};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("manager-7"), String::from("manager"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-9"), String::from("API request"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-15 00:15 UTC)
}

/// A store with three positions, two shift types, and two employees:
/// Ada Lovelace (101, Server or Bartender) and Grace Hopper (102, Busser).
pub fn create_seeded_store() -> InMemoryStore {
    let mut store: InMemoryStore = InMemoryStore::new();

    for (name, value) in [("Server", 1.5), ("Busser", 1.0), ("Bartender", 1.25)] {
        create_position(
            &mut store,
            &PositionRequest {
                name: name.to_string(),
                default_point_value: value,
            },
        )
        .unwrap();
    }
    for name in ["Lunch", "Dinner"] {
        create_shift_type(
            &mut store,
            &ShiftTypeRequest {
                name: name.to_string(),
            },
        )
        .unwrap();
    }

    create_employee(
        &mut store,
        &EmployeeRequest {
            employee_number: 101,
            first_name: String::from("Ada"),
            last_name: String::from("Lovelace"),
            positions: vec![String::from("Server"), String::from("Bartender")],
        },
    )
    .unwrap();
    create_employee(
        &mut store,
        &EmployeeRequest {
            employee_number: 102,
            first_name: String::from("Grace"),
            last_name: String::from("Hopper"),
            positions: vec![String::from("Busser")],
        },
    )
    .unwrap();

    store
}

pub fn create_line(
    employee_number: u32,
    position: &str,
    clock_in: &str,
    clock_out: &str,
) -> ShiftLineRequest {
    ShiftLineRequest {
        employee_number: Some(employee_number),
        position: Some(position.to_string()),
        point_value: None,
        clock_in: Some(clock_in.to_string()),
        clock_out: Some(clock_out.to_string()),
    }
}

/// Dinner on 2026-03-14: Ada serves 16:00 to midnight (12 points), Grace
/// busses 18:00 to 22:00 (4 points). Pools are 100 digital and 20 cash.
pub fn create_shift_request() -> ShiftRequest {
    ShiftRequest {
        date: Some(String::from("2026-03-14")),
        shift_type: Some(String::from("Dinner")),
        credit_card_tips: 80.0,
        house_tips: 20.0,
        cash_tips: 20.0,
        lines: vec![
            create_line(101, "Server", "16:00", "00:00"),
            create_line(102, "Busser", "18:00", "22:00"),
        ],
    }
}
