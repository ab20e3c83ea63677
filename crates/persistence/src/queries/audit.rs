// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit timeline queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tip_split_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    shift_id: Option<i64>,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
}

fn to_event(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    Ok(AuditEvent::new(
        row.shift_id,
        Actor::new(actor_data.id, actor_data.actor_type),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
    )
    .with_event_id(row.event_id))
}

/// Lists audit events in append order, optionally limited to one shift.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `shift_id` - Restrict to events about this shift
///
/// # Errors
///
/// Returns an error if the query fails or a stored event cannot be
/// deserialized.
pub fn list_audit_events(
    conn: &mut SqliteConnection,
    shift_id: Option<i64>,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let mut query = audit_events::table
        .select(AuditEventRow::as_select())
        .order(audit_events::event_id.asc())
        .into_boxed();

    if let Some(shift_id) = shift_id {
        query = query.filter(audit_events::shift_id.eq(shift_id));
    }

    let rows: Vec<AuditEventRow> = query.load(conn)?;

    rows.into_iter().map(to_event).collect()
}
