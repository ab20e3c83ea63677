// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tip_split_audit::AuditEvent;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Appends an audit event.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn insert_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&ActorData::from(&event.actor))?;
    let cause_json: String = serde_json::to_string(&CauseData::from(&event.cause))?;
    let action_json: String = serde_json::to_string(&ActionData::from(&event.action))?;
    let before_json: String = serde_json::to_string(&StateSnapshotData::from(&event.before))?;
    let after_json: String = serde_json::to_string(&StateSnapshotData::from(&event.after))?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::shift_id.eq(event.shift_id),
            audit_events::actor_json.eq(actor_json),
            audit_events::cause_json.eq(cause_json),
            audit_events::action_json.eq(action_json),
            audit_events::before_snapshot_json.eq(before_json),
            audit_events::after_snapshot_json.eq(after_json),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;

    debug!(event_id, shift_id = ?event.shift_id, action = %event.action.name, "Persisted audit event");
    Ok(event_id)
}
