// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage contracts.
//!
//! Each record kind has its own repository trait. Methods take `&mut self`
//! so a backend can hold a single connection without interior mutability.
//! [`TipStore`] names the full set and is implemented for anything that
//! implements every repository.

use crate::apply::TransitionResult;
use crate::error::StoreError;
use crate::record::{ShiftRecord, ShiftSummary};
use tip_split_audit::AuditEvent;
use tip_split_domain::{Employee, Position, Settings, ShiftType};

/// A transition as written to a store.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTransition {
    /// The stored record with its identifier. `None` after a delete.
    pub record: Option<ShiftRecord>,
    /// The audit event with its identifier, scoped to the shift.
    pub audit_event: AuditEvent,
}

/// Storage for positions, keyed by name.
pub trait PositionRepository {
    /// Looks up a position by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get_position(&mut self, name: &str) -> Result<Option<Position>, StoreError>;

    /// Lists all positions ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_positions(&mut self) -> Result<Vec<Position>, StoreError>;

    /// Adds a new position.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the name is taken.
    fn add_position(&mut self, position: &Position) -> Result<(), StoreError>;

    /// Replaces the position stored under `name`. The name itself may change.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `name` does not exist, or `DuplicateKey` if the
    /// new name belongs to another position.
    fn update_position(&mut self, name: &str, position: &Position) -> Result<(), StoreError>;

    /// Deletes a position.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `name` does not exist.
    fn delete_position(&mut self, name: &str) -> Result<(), StoreError>;
}

/// Storage for employees, keyed by record id.
pub trait EmployeeRepository {
    /// Looks up an employee by record id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get_employee(&mut self, record_id: i64) -> Result<Option<Employee>, StoreError>;

    /// Looks up an employee by employee number.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_employee_by_number(
        &mut self,
        employee_number: u32,
    ) -> Result<Option<Employee>, StoreError>;

    /// Lists all employees ordered by employee number.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError>;

    /// Adds a new employee and returns it with its assigned record id.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the employee number is taken.
    fn add_employee(&mut self, employee: &Employee) -> Result<Employee, StoreError>;

    /// Replaces the employee stored under `record_id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the record does not exist, or `DuplicateKey` if
    /// the employee number belongs to another record.
    fn update_employee(&mut self, record_id: i64, employee: &Employee)
    -> Result<Employee, StoreError>;

    /// Deletes an employee and their position eligibility.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the record does not exist.
    fn delete_employee(&mut self, record_id: i64) -> Result<(), StoreError>;
}

/// Storage for shift types, keyed by name.
pub trait ShiftTypeRepository {
    /// Looks up a shift type by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get_shift_type(&mut self, name: &str) -> Result<Option<ShiftType>, StoreError>;

    /// Lists all shift types ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_shift_types(&mut self) -> Result<Vec<ShiftType>, StoreError>;

    /// Adds a new shift type.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the name is taken.
    fn add_shift_type(&mut self, shift_type: &ShiftType) -> Result<(), StoreError>;

    /// Renames the shift type stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `name` does not exist, or `DuplicateKey` if the
    /// new name is taken.
    fn update_shift_type(&mut self, name: &str, shift_type: &ShiftType)
    -> Result<(), StoreError>;

    /// Deletes a shift type.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `name` does not exist.
    fn delete_shift_type(&mut self, name: &str) -> Result<(), StoreError>;
}

/// Storage for shift records and their lines.
pub trait ShiftRepository {
    /// Loads a shift with its lines in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get_shift(&mut self, shift_id: i64) -> Result<Option<ShiftRecord>, StoreError>;

    /// Lists all shifts, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_shifts(&mut self) -> Result<Vec<ShiftSummary>, StoreError>;

    /// Stores a new shift and its lines, returning it with its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails. Nothing is stored in that case.
    fn add_shift(&mut self, record: &ShiftRecord) -> Result<ShiftRecord, StoreError>;

    /// Replaces a stored shift's metadata and all of its lines atomically.
    ///
    /// On failure the previously stored shift is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the record carries no identifier or the shift
    /// does not exist.
    fn replace_shift(&mut self, record: &ShiftRecord) -> Result<(), StoreError>;

    /// Deletes a shift and all of its lines.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shift does not exist.
    fn delete_shift(&mut self, shift_id: i64) -> Result<(), StoreError>;

    /// Writes a transition's shift change and its audit event as one unit.
    ///
    /// A created shift's event is scoped to the id the store assigns. If
    /// either write fails, neither is kept.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if an update or delete targets a missing shift,
    /// and `Backend` if the transition carries nothing to write or the
    /// backend fails.
    fn persist_transition(
        &mut self,
        transition: &TransitionResult,
    ) -> Result<PersistedTransition, StoreError>;
}

/// Storage for restaurant settings.
pub trait SettingsRepository {
    /// Loads the settings, falling back to defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn get_settings(&mut self) -> Result<Settings, StoreError>;

    /// Stores the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn update_settings(&mut self, settings: &Settings) -> Result<(), StoreError>;
}

/// Append-only audit trail.
pub trait AuditLog {
    /// Appends an event and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn append_audit_event(&mut self, event: &AuditEvent) -> Result<i64, StoreError>;

    /// Lists events in the order they were appended, optionally limited to
    /// one shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_audit_events(&mut self, shift_id: Option<i64>) -> Result<Vec<AuditEvent>, StoreError>;
}

/// Everything the tip split operations need from storage.
pub trait TipStore:
    PositionRepository
    + EmployeeRepository
    + ShiftTypeRepository
    + ShiftRepository
    + SettingsRepository
    + AuditLog
{
}

impl<T> TipStore for T where
    T: PositionRepository
        + EmployeeRepository
        + ShiftTypeRepository
        + ShiftRepository
        + SettingsRepository
        + AuditLog
{
}
