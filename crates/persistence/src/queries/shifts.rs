// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift record queries.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::dsl::count_star;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use tip_split::{ShiftRecord, ShiftSummary};
use tip_split_domain::{ShiftEmployeeLine, ShiftMetadata, TipPools};

use crate::data_models::{parse_date, parse_time, parse_timestamp};
use crate::diesel_schema::{shift_employees, shifts};
use crate::error::PersistenceError;

/// Stored points may differ from a recomputation only by float noise.
const POINTS_EPSILON: f64 = 1e-9;

#[derive(Queryable, Selectable)]
#[diesel(table_name = shifts)]
struct ShiftRow {
    shift_id: i64,
    shift_date: String,
    shift_type: String,
    credit_card_tips: f64,
    house_tips: f64,
    cash_tips: f64,
    created_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = shift_employees)]
struct ShiftLineRow {
    employee_number: i64,
    employee_name: String,
    position: String,
    point_value: f64,
    clock_in: String,
    clock_out: String,
    hours_worked: f64,
    points: f64,
    digital_tips: f64,
    cash_tips: f64,
}

impl ShiftRow {
    fn tips(&self) -> TipPools {
        TipPools::new(self.credit_card_tips, self.house_tips, self.cash_tips)
    }
}

fn to_line(row: ShiftLineRow) -> Result<ShiftEmployeeLine, PersistenceError> {
    let employee_number: u32 = row.employee_number.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!(
            "Employee number {} out of range",
            row.employee_number
        ))
    })?;

    let line: ShiftEmployeeLine = ShiftEmployeeLine::new(
        employee_number,
        row.employee_name,
        row.position,
        row.point_value,
        parse_time(&row.clock_in)?,
        parse_time(&row.clock_out)?,
        row.hours_worked,
    )
    .with_allocation(row.digital_tips, row.cash_tips);

    if (line.points() - row.points).abs() > POINTS_EPSILON {
        return Err(PersistenceError::ReconstructionError(format!(
            "Stored points {} for employee {employee_number} do not match hours times point value",
            row.points
        )));
    }

    Ok(line)
}

/// Checks whether a shift exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn shift_exists(conn: &mut SqliteConnection, shift_id: i64) -> Result<bool, PersistenceError> {
    let found: Option<i64> = shifts::table
        .filter(shifts::shift_id.eq(shift_id))
        .select(shifts::shift_id)
        .first::<i64>(conn)
        .optional()?;
    Ok(found.is_some())
}

/// Loads a shift with its lines in stored order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn get_shift(
    conn: &mut SqliteConnection,
    shift_id: i64,
) -> Result<Option<ShiftRecord>, PersistenceError> {
    let row: Option<ShiftRow> = shifts::table
        .filter(shifts::shift_id.eq(shift_id))
        .select(ShiftRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };

    let line_rows: Vec<ShiftLineRow> = shift_employees::table
        .filter(shift_employees::shift_id.eq(shift_id))
        .order(shift_employees::line_order.asc())
        .select(ShiftLineRow::as_select())
        .load(conn)?;

    let lines: Vec<ShiftEmployeeLine> = line_rows
        .into_iter()
        .map(to_line)
        .collect::<Result<_, _>>()?;

    let metadata: ShiftMetadata = ShiftMetadata {
        date: parse_date(&row.shift_date)?,
        shift_type: row.shift_type.clone(),
        tips: row.tips(),
    };

    Ok(Some(
        ShiftRecord::new(metadata, parse_timestamp(&row.created_at)?, lines)
            .with_shift_id(row.shift_id),
    ))
}

/// Lists all shifts, newest date first, with their line counts.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_shifts(conn: &mut SqliteConnection) -> Result<Vec<ShiftSummary>, PersistenceError> {
    let rows: Vec<ShiftRow> = shifts::table
        .order((shifts::shift_date.desc(), shifts::shift_id.desc()))
        .select(ShiftRow::as_select())
        .load(conn)?;

    let counts: HashMap<i64, i64> = shift_employees::table
        .group_by(shift_employees::shift_id)
        .select((shift_employees::shift_id, count_star()))
        .load::<(i64, i64)>(conn)?
        .into_iter()
        .collect();

    rows.into_iter()
        .map(|row| {
            let employee_count: usize = counts
                .get(&row.shift_id)
                .copied()
                .unwrap_or(0)
                .to_usize()
                .ok_or_else(|| {
                    PersistenceError::ReconstructionError(String::from(
                        "Negative employee count",
                    ))
                })?;

            Ok(ShiftSummary {
                shift_id: row.shift_id,
                date: parse_date(&row.shift_date)?,
                tips: row.tips(),
                shift_type: row.shift_type,
                created_at: parse_timestamp(&row.created_at)?,
                employee_count,
            })
        })
        .collect()
}
