// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::draft::{CalculatedShift, calculate};
use crate::error::CoreError;
use crate::lifecycle::ShiftLifecycle;
use crate::record::ShiftRecord;
use time::OffsetDateTime;
use tip_split_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use tip_split_domain::{AllocationValidation, DomainError};

/// The result of applying a command to a shift.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The lifecycle state before the command.
    pub from: ShiftLifecycle,
    /// The lifecycle state after the command.
    pub to: ShiftLifecycle,
    /// The record to store. `None` when the shift was deleted.
    pub record: Option<ShiftRecord>,
    /// Advisory reconciliation for a recalculated shift.
    pub validation: Option<AllocationValidation>,
    /// The audit event describing the transition.
    pub audit_event: AuditEvent,
}

/// The storage write a transition calls for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShiftWrite<'a> {
    /// Store a new shift. The store assigns its id.
    Insert(&'a ShiftRecord),
    /// Replace a stored shift and every one of its lines.
    Replace(&'a ShiftRecord),
    /// Remove a stored shift.
    Delete(i64),
}

impl TransitionResult {
    /// Returns the storage write this transition calls for.
    ///
    /// `None` means the result carries nothing a store could write, such as
    /// a saved state without a record.
    #[must_use]
    pub fn shift_write(&self) -> Option<ShiftWrite<'_>> {
        if self.to.is_terminal() {
            return self.audit_event.shift_id.map(ShiftWrite::Delete);
        }
        let record: &ShiftRecord = self.record.as_ref()?;
        if record.shift_id().is_some() {
            Some(ShiftWrite::Replace(record))
        } else {
            Some(ShiftWrite::Insert(record))
        }
    }
}

fn ensure_transition(from: ShiftLifecycle, to: ShiftLifecycle) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition { from, to })
    }
}

fn ensure_target(
    existing: Option<&ShiftRecord>,
    shift_id: i64,
) -> Result<&ShiftRecord, CoreError> {
    existing
        .filter(|record| record.shift_id() == Some(shift_id))
        .ok_or(CoreError::DomainViolation(DomainError::ShiftNotFound(
            shift_id,
        )))
}

/// Applies a command to the current shift, producing the next record and an
/// audit event.
///
/// This function is pure. It never touches a store; the caller persists the
/// returned record and event together.
///
/// # Arguments
///
/// * `existing` - The stored shift the command targets. `None` for a create.
/// * `command` - The command to apply
/// * `rounding_minutes` - The clock rounding increment in effect
/// * `now` - The timestamp recorded on a newly created shift
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The draft fails validation or has zero total points
/// - An update or delete targets a shift other than `existing`
/// - A create is applied on top of a stored shift
#[allow(clippy::too_many_lines)]
pub fn apply(
    existing: Option<&ShiftRecord>,
    command: Command,
    rounding_minutes: u32,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let action_name: String = command.name().to_string();

    match command {
        Command::CreateShift { draft } => {
            if let Some(record) = existing {
                return Err(CoreError::InvalidTransition {
                    from: record.lifecycle(),
                    to: ShiftLifecycle::Calculated,
                });
            }

            ensure_transition(draft.lifecycle(), ShiftLifecycle::Calculated)?;
            let calculated: CalculatedShift = calculate(&draft, rounding_minutes)?;
            ensure_transition(calculated.lifecycle(), ShiftLifecycle::Saved)?;

            let validation: AllocationValidation = calculated.validation;
            let record: ShiftRecord = calculated.into_record(now);

            let action: Action = Action::new(
                action_name,
                Some(format!(
                    "Created {} shift for {} with {} employees",
                    record.metadata.shift_type,
                    record.metadata.date,
                    record.employee_count()
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                None,
                actor,
                cause,
                action,
                StateSnapshot::absent(),
                record.to_snapshot(),
            );

            Ok(TransitionResult {
                from: ShiftLifecycle::Draft,
                to: ShiftLifecycle::Saved,
                record: Some(record),
                validation: Some(validation),
                audit_event,
            })
        }
        Command::UpdateShift { shift_id, draft } => {
            let current: &ShiftRecord = ensure_target(existing, shift_id)?;
            ensure_transition(current.lifecycle(), ShiftLifecycle::Edited)?;

            let calculated: CalculatedShift = calculate(&draft, rounding_minutes)?;
            ensure_transition(ShiftLifecycle::Edited, ShiftLifecycle::Saved)?;

            let validation: AllocationValidation = calculated.validation;
            let record: ShiftRecord = calculated
                .into_record(current.created_at)
                .with_shift_id(shift_id);

            let action: Action = Action::new(
                action_name,
                Some(format!(
                    "Updated shift {shift_id}: {} lines replaced with {}",
                    current.employee_count(),
                    record.employee_count()
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                Some(shift_id),
                actor,
                cause,
                action,
                current.to_snapshot(),
                record.to_snapshot(),
            );

            Ok(TransitionResult {
                from: ShiftLifecycle::Saved,
                to: ShiftLifecycle::Saved,
                record: Some(record),
                validation: Some(validation),
                audit_event,
            })
        }
        Command::DeleteShift { shift_id } => {
            let current: &ShiftRecord = ensure_target(existing, shift_id)?;
            ensure_transition(current.lifecycle(), ShiftLifecycle::Deleted)?;

            let action: Action = Action::new(
                action_name,
                Some(format!(
                    "Deleted {} shift for {} with {} employees",
                    current.metadata.shift_type,
                    current.metadata.date,
                    current.employee_count()
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                Some(shift_id),
                actor,
                cause,
                action,
                current.to_snapshot(),
                StateSnapshot::absent(),
            );

            Ok(TransitionResult {
                from: current.lifecycle(),
                to: ShiftLifecycle::Deleted,
                record: None,
                validation: None,
                audit_event,
            })
        }
    }
}
