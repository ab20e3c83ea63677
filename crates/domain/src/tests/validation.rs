// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, Employee, Position, Settings, ShiftType, TipPools, validate_employee_fields,
    validate_employee_number_unique, validate_position, validate_settings, validate_shift_type,
    validate_tip_pools,
};

fn create_test_employee(employee_number: u32) -> Employee {
    Employee::new(
        employee_number,
        "Test",
        "Employee",
        vec![String::from("Server")],
    )
}

#[test]
fn test_validate_position_accepts_valid_position() {
    assert!(validate_position(&Position::new("Server", 1.0)).is_ok());
    assert!(validate_position(&Position::new("Dishwasher", 0.0)).is_ok());
}

#[test]
fn test_validate_position_rejects_empty_name() {
    let result: Result<(), DomainError> = validate_position(&Position::new("  ", 1.0));
    assert!(matches!(result, Err(DomainError::InvalidName(_))));
}

#[test]
fn test_validate_position_rejects_negative_or_nan_points() {
    let result: Result<(), DomainError> = validate_position(&Position::new("Server", -1.0));
    assert!(matches!(result, Err(DomainError::InvalidPointValue { .. })));

    let result: Result<(), DomainError> = validate_position(&Position::new("Server", f64::NAN));
    assert!(matches!(result, Err(DomainError::InvalidPointValue { .. })));
}

#[test]
fn test_validate_employee_fields_accepts_valid_employee() {
    assert!(validate_employee_fields(&create_test_employee(12)).is_ok());
}

#[test]
fn test_validate_employee_fields_rejects_zero_number() {
    let result: Result<(), DomainError> = validate_employee_fields(&create_test_employee(0));
    assert!(matches!(
        result,
        Err(DomainError::InvalidEmployeeNumber { number: 0 })
    ));
}

#[test]
fn test_validate_employee_fields_rejects_empty_names() {
    let employee: Employee = Employee::new(3, "", "Employee", vec![String::from("Server")]);
    assert!(matches!(
        validate_employee_fields(&employee),
        Err(DomainError::InvalidName(_))
    ));

    let employee: Employee = Employee::new(3, "Test", " ", vec![String::from("Server")]);
    assert!(matches!(
        validate_employee_fields(&employee),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_employee_fields_requires_a_position() {
    let employee: Employee = Employee::new(3, "Test", "Employee", Vec::new());
    assert!(matches!(
        validate_employee_fields(&employee),
        Err(DomainError::NoEligiblePositions { employee_number: 3 })
    ));
}

#[test]
fn test_validate_employee_number_unique_detects_clash() {
    let existing: Vec<Employee> = vec![
        create_test_employee(10).with_record_id(1),
        create_test_employee(11).with_record_id(2),
    ];

    assert!(validate_employee_number_unique(12, None, &existing).is_ok());
    assert!(matches!(
        validate_employee_number_unique(11, None, &existing),
        Err(DomainError::DuplicateEmployeeNumber {
            employee_number: 11
        })
    ));
}

#[test]
fn test_validate_employee_number_unique_ignores_record_being_updated() {
    let existing: Vec<Employee> = vec![
        create_test_employee(10).with_record_id(1),
        create_test_employee(11).with_record_id(2),
    ];

    assert!(validate_employee_number_unique(11, Some(2), &existing).is_ok());
    assert!(validate_employee_number_unique(10, Some(2), &existing).is_err());
}

#[test]
fn test_validate_shift_type() {
    assert!(validate_shift_type(&ShiftType::new("Lunch")).is_ok());
    assert!(matches!(
        validate_shift_type(&ShiftType::new("")),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_tip_pools_requires_some_tips() {
    assert!(matches!(
        validate_tip_pools(&TipPools::default()),
        Err(DomainError::NoTipsEntered)
    ));
    assert!(validate_tip_pools(&TipPools::new(0.0, 0.0, 5.0)).is_ok());
    assert!(validate_tip_pools(&TipPools::new(0.0, 12.5, 0.0)).is_ok());
}

#[test]
fn test_validate_tip_pools_rejects_negative_amounts() {
    assert!(matches!(
        validate_tip_pools(&TipPools::new(10.0, -1.0, 0.0)),
        Err(DomainError::InvalidTipAmount {
            pool: "house_tips",
            ..
        })
    ));
    assert!(matches!(
        validate_tip_pools(&TipPools::new(f64::INFINITY, 0.0, 0.0)),
        Err(DomainError::InvalidTipAmount {
            pool: "credit_card_tips",
            ..
        })
    ));
}

#[test]
fn test_validate_settings() {
    assert!(validate_settings(&Settings::default()).is_ok());

    let settings: Settings = Settings {
        restaurant_name: String::from("Chez Test"),
        time_rounding_minutes: 90,
    };
    assert!(matches!(
        validate_settings(&settings),
        Err(DomainError::InvalidRoundingMinutes { minutes: 90 })
    ));

    let settings: Settings = Settings {
        restaurant_name: String::new(),
        time_rounding_minutes: 15,
    };
    assert!(matches!(
        validate_settings(&settings),
        Err(DomainError::InvalidName(_))
    ));
}
