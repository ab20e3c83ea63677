// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift record mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use tip_split::{PersistedTransition, ShiftRecord, ShiftWrite, TransitionResult};
use tip_split_audit::AuditEvent;
use tip_split_domain::ShiftEmployeeLine;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{format_date, format_time, format_timestamp};
use crate::diesel_schema::{shift_employees, shifts};
use crate::error::PersistenceError;
use crate::mutations::audit::insert_audit_event;
use crate::queries::shifts::shift_exists;

fn insert_lines(
    conn: &mut SqliteConnection,
    shift_id: i64,
    lines: &[ShiftEmployeeLine],
) -> Result<(), PersistenceError> {
    for (index, line) in lines.iter().enumerate() {
        let line_order: i32 = index
            .to_i32()
            .ok_or_else(|| PersistenceError::SerializationError(String::from("Too many lines")))?;

        diesel::insert_into(shift_employees::table)
            .values((
                shift_employees::shift_id.eq(shift_id),
                shift_employees::line_order.eq(line_order),
                shift_employees::employee_number.eq(i64::from(line.employee_number)),
                shift_employees::employee_name.eq(&line.employee_name),
                shift_employees::position.eq(&line.position),
                shift_employees::point_value.eq(line.point_value()),
                shift_employees::clock_in.eq(format_time(line.clock_in)?),
                shift_employees::clock_out.eq(format_time(line.clock_out)?),
                shift_employees::hours_worked.eq(line.hours_worked()),
                shift_employees::points.eq(line.points()),
                shift_employees::digital_tips.eq(line.digital_tips()),
                shift_employees::cash_tips.eq(line.cash_tips()),
            ))
            .execute(conn)?;
    }
    Ok(())
}

/// Inserts a shift and all of its lines in one transaction.
///
/// # Returns
///
/// The shift id assigned by the database.
///
/// # Errors
///
/// Returns an error if any write fails. Nothing is stored in that case.
pub fn insert_shift(
    conn: &mut SqliteConnection,
    record: &ShiftRecord,
) -> Result<i64, PersistenceError> {
    let shift_date: String = format_date(record.metadata.date)?;
    let created_at: String = format_timestamp(record.created_at)?;

    let shift_id: i64 = conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(shifts::table)
            .values((
                shifts::shift_date.eq(&shift_date),
                shifts::shift_type.eq(&record.metadata.shift_type),
                shifts::credit_card_tips.eq(record.metadata.tips.credit_card_tips),
                shifts::house_tips.eq(record.metadata.tips.house_tips),
                shifts::cash_tips.eq(record.metadata.tips.cash_tips),
                shifts::created_at.eq(&created_at),
            ))
            .execute(conn)?;
        let shift_id: i64 = get_last_insert_rowid(conn)?;

        insert_lines(conn, shift_id, &record.lines)?;
        Ok(shift_id)
    })?;

    debug!(shift_id, lines = record.lines.len(), "Inserted shift");
    Ok(shift_id)
}

/// Replaces a stored shift's metadata and every line in one transaction.
///
/// The original creation timestamp is kept.
///
/// # Errors
///
/// Returns `NotFound` if the record has no id or the shift does not exist.
/// On any failure the previously stored shift is left untouched.
pub fn replace_shift(
    conn: &mut SqliteConnection,
    record: &ShiftRecord,
) -> Result<(), PersistenceError> {
    let Some(shift_id) = record.shift_id() else {
        return Err(PersistenceError::not_found("shift", "unsaved"));
    };
    let shift_date: String = format_date(record.metadata.date)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if !shift_exists(conn, shift_id)? {
            return Err(PersistenceError::not_found("shift", shift_id));
        }

        diesel::update(shifts::table.filter(shifts::shift_id.eq(shift_id)))
            .set((
                shifts::shift_date.eq(&shift_date),
                shifts::shift_type.eq(&record.metadata.shift_type),
                shifts::credit_card_tips.eq(record.metadata.tips.credit_card_tips),
                shifts::house_tips.eq(record.metadata.tips.house_tips),
                shifts::cash_tips.eq(record.metadata.tips.cash_tips),
            ))
            .execute(conn)?;

        diesel::delete(shift_employees::table.filter(shift_employees::shift_id.eq(shift_id)))
            .execute(conn)?;
        insert_lines(conn, shift_id, &record.lines)?;
        Ok(())
    })?;

    debug!(shift_id, lines = record.lines.len(), "Replaced shift");
    Ok(())
}

/// Deletes a shift. Its lines cascade.
///
/// # Errors
///
/// Returns `NotFound` if the shift does not exist.
pub fn delete_shift(conn: &mut SqliteConnection, shift_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(shifts::table.filter(shifts::shift_id.eq(shift_id))).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::not_found("shift", shift_id));
    }

    debug!(shift_id, "Deleted shift");
    Ok(())
}

/// Writes a transition's shift change and its audit event in one transaction.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `transition` - The transition result to persist
///
/// # Errors
///
/// Returns an error if the transition carries nothing to write or if any
/// write fails. Nothing is stored in that case.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    transition: &TransitionResult,
) -> Result<PersistedTransition, PersistenceError> {
    let Some(write) = transition.shift_write() else {
        return Err(PersistenceError::QueryFailed(String::from(
            "Transition carries no shift change to store",
        )));
    };

    let persisted: PersistedTransition = conn.transaction::<_, PersistenceError, _>(|conn| {
        let (record, event): (Option<ShiftRecord>, AuditEvent) = match write {
            ShiftWrite::Insert(record) => {
                let shift_id: i64 = insert_shift(conn, record)?;
                (
                    Some(record.clone().with_shift_id(shift_id)),
                    transition.audit_event.clone().for_shift(shift_id),
                )
            }
            ShiftWrite::Replace(record) => {
                replace_shift(conn, record)?;
                (Some(record.clone()), transition.audit_event.clone())
            }
            ShiftWrite::Delete(shift_id) => {
                delete_shift(conn, shift_id)?;
                (None, transition.audit_event.clone())
            }
        };

        let event_id: i64 = insert_audit_event(conn, &event)?;
        Ok(PersistedTransition {
            record,
            audit_event: event.with_event_id(event_id),
        })
    })?;

    debug!(
        event_id = ?persisted.audit_event.event_id,
        action = %persisted.audit_event.action.name,
        "Persisted shift transition"
    );
    Ok(persisted)
}
