// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Tip Split system.
//!
//! This crate stores reference data, shift records, settings, and the audit
//! trail in `SQLite` through Diesel, and implements every repository trait
//! from the core crate on [`Persistence`].
//!
//! ## Storage Layout
//!
//! - A shift row holds metadata and the three tip pools
//! - Its lines live in `shift_employees`, ordered by `line_order`, and are
//!   removed with the shift by `ON DELETE CASCADE`
//! - Employee eligibility lives in `employee_positions` and cascades the
//!   same way
//! - Settings are key/value rows; unset keys fall back to defaults
//! - Audit events keep their shift id after the shift is gone
//!
//! ## Testing
//!
//! Tests use [`Persistence::new_in_memory`], which gives every call its own
//! shared-cache in-memory database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tip_split::{
    AuditLog, EmployeeRepository, PersistedTransition, PositionRepository, SettingsRepository,
    ShiftRecord, ShiftRepository, ShiftSummary, ShiftTypeRepository, StoreError,
    TransitionResult,
};
use tip_split_audit::AuditEvent;
use tip_split_domain::{Employee, Position, Settings, ShiftType};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Counter for unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite` persistence adapter.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives its own database, so instances never share data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:tip_split_mem_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if it does not exist.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }
}

// ========================================================================
// Reference Data
// ========================================================================

impl PositionRepository for Persistence {
    fn get_position(&mut self, name: &str) -> Result<Option<Position>, StoreError> {
        Ok(queries::reference::get_position(&mut self.conn, name)?)
    }

    fn list_positions(&mut self) -> Result<Vec<Position>, StoreError> {
        Ok(queries::reference::list_positions(&mut self.conn)?)
    }

    fn add_position(&mut self, position: &Position) -> Result<(), StoreError> {
        Ok(mutations::reference::insert_position(
            &mut self.conn,
            position,
        )?)
    }

    fn update_position(&mut self, name: &str, position: &Position) -> Result<(), StoreError> {
        Ok(mutations::reference::update_position(
            &mut self.conn,
            name,
            position,
        )?)
    }

    fn delete_position(&mut self, name: &str) -> Result<(), StoreError> {
        Ok(mutations::reference::delete_position(&mut self.conn, name)?)
    }
}

impl EmployeeRepository for Persistence {
    fn get_employee(&mut self, record_id: i64) -> Result<Option<Employee>, StoreError> {
        Ok(queries::reference::get_employee(&mut self.conn, record_id)?)
    }

    fn find_employee_by_number(
        &mut self,
        employee_number: u32,
    ) -> Result<Option<Employee>, StoreError> {
        Ok(queries::reference::find_employee_by_number(
            &mut self.conn,
            employee_number,
        )?)
    }

    fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        Ok(queries::reference::list_employees(&mut self.conn)?)
    }

    fn add_employee(&mut self, employee: &Employee) -> Result<Employee, StoreError> {
        Ok(mutations::reference::insert_employee(
            &mut self.conn,
            employee,
        )?)
    }

    fn update_employee(
        &mut self,
        record_id: i64,
        employee: &Employee,
    ) -> Result<Employee, StoreError> {
        Ok(mutations::reference::update_employee(
            &mut self.conn,
            record_id,
            employee,
        )?)
    }

    fn delete_employee(&mut self, record_id: i64) -> Result<(), StoreError> {
        Ok(mutations::reference::delete_employee(
            &mut self.conn,
            record_id,
        )?)
    }
}

impl ShiftTypeRepository for Persistence {
    fn get_shift_type(&mut self, name: &str) -> Result<Option<ShiftType>, StoreError> {
        Ok(queries::reference::get_shift_type(&mut self.conn, name)?)
    }

    fn list_shift_types(&mut self) -> Result<Vec<ShiftType>, StoreError> {
        Ok(queries::reference::list_shift_types(&mut self.conn)?)
    }

    fn add_shift_type(&mut self, shift_type: &ShiftType) -> Result<(), StoreError> {
        Ok(mutations::reference::insert_shift_type(
            &mut self.conn,
            shift_type,
        )?)
    }

    fn update_shift_type(
        &mut self,
        name: &str,
        shift_type: &ShiftType,
    ) -> Result<(), StoreError> {
        Ok(mutations::reference::update_shift_type(
            &mut self.conn,
            name,
            shift_type,
        )?)
    }

    fn delete_shift_type(&mut self, name: &str) -> Result<(), StoreError> {
        Ok(mutations::reference::delete_shift_type(
            &mut self.conn,
            name,
        )?)
    }
}

impl SettingsRepository for Persistence {
    fn get_settings(&mut self) -> Result<Settings, StoreError> {
        Ok(queries::reference::get_settings(&mut self.conn)?)
    }

    fn update_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        Ok(mutations::reference::update_settings(
            &mut self.conn,
            settings,
        )?)
    }
}

// ========================================================================
// Shifts & Audit
// ========================================================================

impl ShiftRepository for Persistence {
    fn get_shift(&mut self, shift_id: i64) -> Result<Option<ShiftRecord>, StoreError> {
        Ok(queries::shifts::get_shift(&mut self.conn, shift_id)?)
    }

    fn list_shifts(&mut self) -> Result<Vec<ShiftSummary>, StoreError> {
        Ok(queries::shifts::list_shifts(&mut self.conn)?)
    }

    fn add_shift(&mut self, record: &ShiftRecord) -> Result<ShiftRecord, StoreError> {
        let shift_id: i64 = mutations::shifts::insert_shift(&mut self.conn, record)?;
        Ok(record.clone().with_shift_id(shift_id))
    }

    fn replace_shift(&mut self, record: &ShiftRecord) -> Result<(), StoreError> {
        Ok(mutations::shifts::replace_shift(&mut self.conn, record)?)
    }

    fn delete_shift(&mut self, shift_id: i64) -> Result<(), StoreError> {
        Ok(mutations::shifts::delete_shift(&mut self.conn, shift_id)?)
    }

    fn persist_transition(
        &mut self,
        transition: &TransitionResult,
    ) -> Result<PersistedTransition, StoreError> {
        Ok(mutations::shifts::persist_transition(
            &mut self.conn,
            transition,
        )?)
    }
}

impl AuditLog for Persistence {
    fn append_audit_event(&mut self, event: &AuditEvent) -> Result<i64, StoreError> {
        Ok(mutations::audit::insert_audit_event(&mut self.conn, event)?)
    }

    fn list_audit_events(&mut self, shift_id: Option<i64>) -> Result<Vec<AuditEvent>, StoreError> {
        Ok(queries::audit::list_audit_events(&mut self.conn, shift_id)?)
    }
}
