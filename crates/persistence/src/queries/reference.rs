// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data queries.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use tip_split_domain::{Employee, Position, Settings, ShiftType};

use crate::diesel_schema::{employee_positions, employees, positions, settings, shift_types};
use crate::error::PersistenceError;

pub const RESTAURANT_NAME_KEY: &str = "restaurant_name";
pub const TIME_ROUNDING_KEY: &str = "time_rounding_minutes";

#[derive(Queryable, Selectable)]
#[diesel(table_name = positions)]
struct PositionRow {
    name: String,
    default_point_value: f64,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
struct EmployeeRow {
    employee_id: i64,
    employee_number: i64,
    first_name: String,
    last_name: String,
}

fn to_position(row: PositionRow) -> Position {
    Position::new(&row.name, row.default_point_value)
}

fn to_employee(row: EmployeeRow, positions: Vec<String>) -> Result<Employee, PersistenceError> {
    let employee_number: u32 = row.employee_number.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!(
            "Employee number {} out of range",
            row.employee_number
        ))
    })?;

    Ok(
        Employee::new(employee_number, &row.first_name, &row.last_name, positions)
            .with_record_id(row.employee_id),
    )
}

/// Looks up a position by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_position(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<Position>, PersistenceError> {
    let row: Option<PositionRow> = positions::table
        .filter(positions::name.eq(name))
        .select(PositionRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(to_position))
}

/// Lists all positions ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_positions(conn: &mut SqliteConnection) -> Result<Vec<Position>, PersistenceError> {
    let rows: Vec<PositionRow> = positions::table
        .order(positions::name.asc())
        .select(PositionRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(to_position).collect())
}

/// Looks up the internal id of a position.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_position_id(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<i64>, PersistenceError> {
    Ok(positions::table
        .filter(positions::name.eq(name))
        .select(positions::position_id)
        .first::<i64>(conn)
        .optional()?)
}

fn load_employee_positions(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<String>, PersistenceError> {
    Ok(employee_positions::table
        .filter(employee_positions::employee_id.eq(employee_id))
        .order(employee_positions::position_order.asc())
        .select(employee_positions::position_name)
        .load::<String>(conn)?)
}

/// Looks up an employee by record id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
pub fn get_employee(
    conn: &mut SqliteConnection,
    record_id: i64,
) -> Result<Option<Employee>, PersistenceError> {
    let row: Option<EmployeeRow> = employees::table
        .filter(employees::employee_id.eq(record_id))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    match row {
        Some(row) => {
            let positions: Vec<String> = load_employee_positions(conn, row.employee_id)?;
            Ok(Some(to_employee(row, positions)?))
        }
        None => Ok(None),
    }
}

/// Looks up an employee by employee number.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
pub fn find_employee_by_number(
    conn: &mut SqliteConnection,
    employee_number: u32,
) -> Result<Option<Employee>, PersistenceError> {
    let record_id: Option<i64> = find_employee_id_by_number(conn, employee_number)?;
    match record_id {
        Some(record_id) => get_employee(conn, record_id),
        None => Ok(None),
    }
}

/// Looks up the record id holding an employee number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_employee_id_by_number(
    conn: &mut SqliteConnection,
    employee_number: u32,
) -> Result<Option<i64>, PersistenceError> {
    Ok(employees::table
        .filter(employees::employee_number.eq(i64::from(employee_number)))
        .select(employees::employee_id)
        .first::<i64>(conn)
        .optional()?)
}

/// Lists all employees ordered by employee number.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_employees(conn: &mut SqliteConnection) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .order(employees::employee_number.asc())
        .select(EmployeeRow::as_select())
        .load(conn)?;

    let eligibility: Vec<(i64, String)> = employee_positions::table
        .order((
            employee_positions::employee_id.asc(),
            employee_positions::position_order.asc(),
        ))
        .select((
            employee_positions::employee_id,
            employee_positions::position_name,
        ))
        .load(conn)?;

    let mut by_employee: HashMap<i64, Vec<String>> = HashMap::new();
    for (employee_id, position_name) in eligibility {
        by_employee
            .entry(employee_id)
            .or_default()
            .push(position_name);
    }

    rows.into_iter()
        .map(|row| {
            let positions: Vec<String> = by_employee.remove(&row.employee_id).unwrap_or_default();
            to_employee(row, positions)
        })
        .collect()
}

/// Looks up a shift type by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_shift_type(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<ShiftType>, PersistenceError> {
    let found: Option<String> = shift_types::table
        .filter(shift_types::name.eq(name))
        .select(shift_types::name)
        .first::<String>(conn)
        .optional()?;

    Ok(found.map(|name| ShiftType::new(&name)))
}

/// Lists all shift types ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_shift_types(conn: &mut SqliteConnection) -> Result<Vec<ShiftType>, PersistenceError> {
    let names: Vec<String> = shift_types::table
        .order(shift_types::name.asc())
        .select(shift_types::name)
        .load::<String>(conn)?;

    Ok(names.iter().map(|name| ShiftType::new(name)).collect())
}

/// Loads the settings, using defaults for any key that was never stored.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is malformed.
pub fn get_settings(conn: &mut SqliteConnection) -> Result<Settings, PersistenceError> {
    let rows: Vec<(String, String)> = settings::table
        .select((settings::key, settings::value))
        .load(conn)?;

    let mut result: Settings = Settings::default();
    for (key, value) in rows {
        match key.as_str() {
            RESTAURANT_NAME_KEY => result.restaurant_name = value,
            TIME_ROUNDING_KEY => {
                result.time_rounding_minutes = value.parse::<u32>().map_err(|e| {
                    PersistenceError::ReconstructionError(format!(
                        "Invalid rounding setting '{value}': {e}"
                    ))
                })?;
            }
            _ => {}
        }
    }

    Ok(result)
}
