// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Audit vocabulary for shift record changes.
//!
//! Every successful create, update, or delete of a shift produces exactly one
//! [`AuditEvent`] describing who did it, why, and the shift before and after.

use serde::{Deserialize, Serialize};

/// The person or process that requested a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor identifier (e.g., a manager's login).
    pub id: String,
    /// The kind of actor (e.g., "manager", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new `Actor`.
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Why a change was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A request or correlation identifier.
    pub id: String,
    /// A human-readable description.
    pub description: String,
}

impl Cause {
    /// Creates a new `Cause`.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// What was done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The action name (`CreateShift`, `UpdateShift`, `DeleteShift`).
    pub name: String,
    /// Optional free-form details.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new `Action`.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact textual summary of a shift record at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// The summary text.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// The snapshot used when no shift exists on one side of a transition.
    #[must_use]
    pub fn absent() -> Self {
        Self::new(String::from("none"))
    }
}

/// An immutable record of one shift transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The identifier assigned when the event is stored. `None` until then.
    pub event_id: Option<i64>,
    /// The shift the event concerns. `None` for a shift that has not been
    /// assigned an identifier yet.
    pub shift_id: Option<i64>,
    /// Who initiated the change.
    pub actor: Actor,
    /// Why it was initiated.
    pub cause: Cause,
    /// What was done.
    pub action: Action,
    /// The shift before the transition.
    pub before: StateSnapshot,
    /// The shift after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new, unstored `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `shift_id` - The shift this event concerns, if already known
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The shift before the transition
    /// * `after` - The shift after the transition
    #[must_use]
    pub const fn new(
        shift_id: Option<i64>,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            shift_id,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Returns this event attributed to the given shift.
    ///
    /// A newly created shift only receives its identifier when stored, so the
    /// event is re-scoped afterwards.
    #[must_use]
    pub const fn for_shift(mut self, shift_id: i64) -> Self {
        self.shift_id = Some(shift_id);
        self
    }

    /// Returns this event carrying its stored identifier.
    #[must_use]
    pub const fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }
}

#[cfg(test)]
mod tests;
