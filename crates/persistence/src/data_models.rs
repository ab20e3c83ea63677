// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stored representations of values that are kept as JSON or text columns.

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};
use tip_split_audit::{Action, Actor, Cause, StateSnapshot};

use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

impl From<&Actor> for ActorData {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            actor_type: actor.actor_type.clone(),
        }
    }
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

impl From<&Cause> for CauseData {
    fn from(cause: &Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

impl From<&Action> for ActionData {
    fn from(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

impl From<&StateSnapshot> for StateSnapshotData {
    fn from(snapshot: &StateSnapshot) -> Self {
        Self {
            data: snapshot.data.clone(),
        }
    }
}

pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

pub fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|e| PersistenceError::ReconstructionError(format!("Bad date '{value}': {e}")))
}

pub fn format_time(value: Time) -> Result<String, PersistenceError> {
    value
        .format(TIME_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

pub fn parse_time(value: &str) -> Result<Time, PersistenceError> {
    Time::parse(value, TIME_FORMAT)
        .map_err(|e| PersistenceError::ReconstructionError(format!("Bad time '{value}': {e}")))
}

pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Bad timestamp '{value}': {e}"))
    })
}
