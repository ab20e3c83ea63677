// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Employee, Position, Settings, ShiftEmployeeLine, ShiftType, TipPools};
use time::macros::time;

fn create_test_line() -> ShiftEmployeeLine {
    ShiftEmployeeLine::new(
        101,
        String::from("Ada Lovelace"),
        String::from("Server"),
        1.5,
        time!(16:00),
        time!(22:00),
        6.0,
    )
}

#[test]
fn test_position_trims_name() {
    let position: Position = Position::new("  Bartender ", 1.25);
    assert_eq!(position.name, "Bartender");
    assert_eq!(position.default_point_value, 1.25);
}

#[test]
fn test_employee_record_id_starts_unset() {
    let employee: Employee = Employee::new(7, "Grace", "Hopper", vec![String::from("Host")]);
    assert_eq!(employee.record_id(), None);

    let persisted: Employee = employee.with_record_id(42);
    assert_eq!(persisted.record_id(), Some(42));
    assert_eq!(persisted.employee_number, 7);
}

#[test]
fn test_employee_display_name_and_eligibility() {
    let employee: Employee = Employee::new(
        7,
        "Grace",
        "Hopper",
        vec![String::from("Host"), String::from("Server")],
    );
    assert_eq!(employee.display_name(), "Grace Hopper");
    assert!(employee.can_work("Server"));
    assert!(!employee.can_work("Busser"));
}

#[test]
fn test_shift_type_trims_name() {
    assert_eq!(ShiftType::new(" Dinner ").name, "Dinner");
}

#[test]
fn test_settings_default() {
    let settings: Settings = Settings::default();
    assert_eq!(settings.time_rounding_minutes, 0);
    assert!(!settings.restaurant_name.is_empty());
}

#[test]
fn test_tip_pools_combine_digital() {
    let tips: TipPools = TipPools::new(80.0, 20.0, 35.0);
    assert_eq!(tips.digital_pool(), 100.0);
    assert_eq!(tips.cash_pool(), 35.0);
    assert!(!tips.is_empty());
    assert!(TipPools::default().is_empty());
}

#[test]
fn test_line_points_derived_on_creation() {
    let line: ShiftEmployeeLine = create_test_line();
    assert_eq!(line.points(), 9.0);
    assert_eq!(line.digital_tips(), 0.0);
    assert_eq!(line.cash_tips(), 0.0);
}

#[test]
fn test_line_allocation_leaves_points_unchanged() {
    let line: ShiftEmployeeLine = create_test_line().with_allocation(50.0, 10.0);

    assert_eq!(line.total_tips(), 60.0);
    assert_eq!(line.point_value(), 1.5);
    assert_eq!(line.hours_worked(), 6.0);
    assert_eq!(line.points(), 9.0);
}

#[test]
fn test_line_points_follow_constructor_inputs() {
    let line: ShiftEmployeeLine = ShiftEmployeeLine::new(
        101,
        String::from("Ada Lovelace"),
        String::from("Server"),
        2.0,
        time!(16:00),
        time!(20:00),
        4.0,
    );
    assert_eq!(line.points(), 8.0);
}
