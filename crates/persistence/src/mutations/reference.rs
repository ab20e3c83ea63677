// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data mutations.
//!
//! Uniqueness is checked explicitly before writing so callers get a keyed
//! `Duplicate` error; the `UNIQUE` constraints in the schema back this up.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use tip_split_domain::{Employee, Position, Settings, ShiftType};
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{employee_positions, employees, positions, settings, shift_types};
use crate::error::PersistenceError;
use crate::queries::reference::{
    RESTAURANT_NAME_KEY, TIME_ROUNDING_KEY, find_employee_id_by_number, find_position_id,
    get_shift_type,
};

/// Inserts a new position.
///
/// # Errors
///
/// Returns `Duplicate` if the name is taken.
pub fn insert_position(
    conn: &mut SqliteConnection,
    position: &Position,
) -> Result<(), PersistenceError> {
    if find_position_id(conn, &position.name)?.is_some() {
        return Err(PersistenceError::duplicate("position", &position.name));
    }

    diesel::insert_into(positions::table)
        .values((
            positions::name.eq(&position.name),
            positions::default_point_value.eq(position.default_point_value),
        ))
        .execute(conn)?;

    debug!(name = %position.name, "Inserted position");
    Ok(())
}

/// Replaces the position stored under `name`.
///
/// # Errors
///
/// Returns `NotFound` if `name` does not exist, or `Duplicate` if the new
/// name belongs to another position.
pub fn update_position(
    conn: &mut SqliteConnection,
    name: &str,
    position: &Position,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let Some(position_id) = find_position_id(conn, name)? else {
            return Err(PersistenceError::not_found("position", name));
        };
        if let Some(other_id) = find_position_id(conn, &position.name)?
            && other_id != position_id
        {
            return Err(PersistenceError::duplicate("position", &position.name));
        }

        diesel::update(positions::table.filter(positions::position_id.eq(position_id)))
            .set((
                positions::name.eq(&position.name),
                positions::default_point_value.eq(position.default_point_value),
            ))
            .execute(conn)?;

        debug!(old_name = name, new_name = %position.name, "Updated position");
        Ok(())
    })
}

/// Deletes a position by name.
///
/// # Errors
///
/// Returns `NotFound` if `name` does not exist.
pub fn delete_position(conn: &mut SqliteConnection, name: &str) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(positions::table.filter(positions::name.eq(name))).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::not_found("position", name));
    }
    Ok(())
}

fn insert_employee_positions(
    conn: &mut SqliteConnection,
    employee_id: i64,
    position_names: &[String],
) -> Result<(), PersistenceError> {
    for (index, position_name) in position_names.iter().enumerate() {
        let position_order: i32 = index.to_i32().ok_or_else(|| {
            PersistenceError::SerializationError(String::from("Too many positions"))
        })?;
        diesel::insert_into(employee_positions::table)
            .values((
                employee_positions::employee_id.eq(employee_id),
                employee_positions::position_order.eq(position_order),
                employee_positions::position_name.eq(position_name),
            ))
            .execute(conn)?;
    }
    Ok(())
}

/// Inserts a new employee with their eligible positions.
///
/// # Returns
///
/// The employee carrying its assigned record id.
///
/// # Errors
///
/// Returns `Duplicate` if the employee number is taken.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<Employee, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        if find_employee_id_by_number(conn, employee.employee_number)?.is_some() {
            return Err(PersistenceError::duplicate(
                "employee",
                employee.employee_number,
            ));
        }

        diesel::insert_into(employees::table)
            .values((
                employees::employee_number.eq(i64::from(employee.employee_number)),
                employees::first_name.eq(&employee.first_name),
                employees::last_name.eq(&employee.last_name),
            ))
            .execute(conn)?;
        let record_id: i64 = get_last_insert_rowid(conn)?;

        insert_employee_positions(conn, record_id, &employee.positions)?;

        debug!(
            record_id,
            employee_number = employee.employee_number,
            "Inserted employee"
        );
        Ok(employee.clone().with_record_id(record_id))
    })
}

/// Replaces an employee and their eligible positions.
///
/// # Errors
///
/// Returns `NotFound` if the record does not exist, or `Duplicate` if the
/// employee number belongs to another record.
pub fn update_employee(
    conn: &mut SqliteConnection,
    record_id: i64,
    employee: &Employee,
) -> Result<Employee, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let exists: Option<i64> = employees::table
            .filter(employees::employee_id.eq(record_id))
            .select(employees::employee_id)
            .first::<i64>(conn)
            .optional()?;
        if exists.is_none() {
            return Err(PersistenceError::not_found("employee", record_id));
        }
        if let Some(other_id) = find_employee_id_by_number(conn, employee.employee_number)?
            && other_id != record_id
        {
            return Err(PersistenceError::duplicate(
                "employee",
                employee.employee_number,
            ));
        }

        diesel::update(employees::table.filter(employees::employee_id.eq(record_id)))
            .set((
                employees::employee_number.eq(i64::from(employee.employee_number)),
                employees::first_name.eq(&employee.first_name),
                employees::last_name.eq(&employee.last_name),
            ))
            .execute(conn)?;

        diesel::delete(
            employee_positions::table.filter(employee_positions::employee_id.eq(record_id)),
        )
        .execute(conn)?;
        insert_employee_positions(conn, record_id, &employee.positions)?;

        debug!(record_id, "Updated employee");
        Ok(employee.clone().with_record_id(record_id))
    })
}

/// Deletes an employee. Their eligibility rows cascade.
///
/// # Errors
///
/// Returns `NotFound` if the record does not exist.
pub fn delete_employee(
    conn: &mut SqliteConnection,
    record_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(employees::table.filter(employees::employee_id.eq(record_id)))
            .execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::not_found("employee", record_id));
    }
    Ok(())
}

/// Inserts a new shift type.
///
/// # Errors
///
/// Returns `Duplicate` if the name is taken.
pub fn insert_shift_type(
    conn: &mut SqliteConnection,
    shift_type: &ShiftType,
) -> Result<(), PersistenceError> {
    if get_shift_type(conn, &shift_type.name)?.is_some() {
        return Err(PersistenceError::duplicate("shift type", &shift_type.name));
    }

    diesel::insert_into(shift_types::table)
        .values(shift_types::name.eq(&shift_type.name))
        .execute(conn)?;
    Ok(())
}

/// Renames a shift type.
///
/// # Errors
///
/// Returns `NotFound` if `name` does not exist, or `Duplicate` if the new
/// name is taken.
pub fn update_shift_type(
    conn: &mut SqliteConnection,
    name: &str,
    shift_type: &ShiftType,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        if get_shift_type(conn, name)?.is_none() {
            return Err(PersistenceError::not_found("shift type", name));
        }
        if shift_type.name != name && get_shift_type(conn, &shift_type.name)?.is_some() {
            return Err(PersistenceError::duplicate("shift type", &shift_type.name));
        }

        diesel::update(shift_types::table.filter(shift_types::name.eq(name)))
            .set(shift_types::name.eq(&shift_type.name))
            .execute(conn)?;
        Ok(())
    })
}

/// Deletes a shift type.
///
/// # Errors
///
/// Returns `NotFound` if `name` does not exist.
pub fn delete_shift_type(conn: &mut SqliteConnection, name: &str) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(shift_types::table.filter(shift_types::name.eq(name))).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::not_found("shift type", name));
    }
    Ok(())
}

/// Stores every setting.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn update_settings(
    conn: &mut SqliteConnection,
    new_settings: &Settings,
) -> Result<(), PersistenceError> {
    let rounding: String = new_settings.time_rounding_minutes.to_string();

    conn.transaction::<_, PersistenceError, _>(|conn| {
        for (key, value) in [
            (RESTAURANT_NAME_KEY, new_settings.restaurant_name.as_str()),
            (TIME_ROUNDING_KEY, rounding.as_str()),
        ] {
            diesel::replace_into(settings::table)
                .values((settings::key.eq(key), settings::value.eq(value)))
                .execute(conn)?;
        }
        Ok(())
    })?;

    debug!("Updated settings");
    Ok(())
}
