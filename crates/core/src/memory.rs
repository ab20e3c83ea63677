// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A store that lives entirely in process memory.
//!
//! Used by tests and by callers that do not need durability. It follows the
//! same key and ordering rules as the database backend.

use crate::apply::{ShiftWrite, TransitionResult};
use crate::error::StoreError;
use crate::record::{ShiftRecord, ShiftSummary};
use crate::store::{
    AuditLog, EmployeeRepository, PersistedTransition, PositionRepository, SettingsRepository,
    ShiftRepository, ShiftTypeRepository,
};
use std::collections::BTreeMap;
use tip_split_audit::AuditEvent;
use tip_split_domain::{Employee, Position, Settings, ShiftType};

/// In-memory implementation of every repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    positions: BTreeMap<String, Position>,
    employees: BTreeMap<i64, Employee>,
    shift_types: BTreeMap<String, ShiftType>,
    shifts: BTreeMap<i64, ShiftRecord>,
    settings: Settings,
    audit_events: Vec<AuditEvent>,
    next_employee_id: i64,
    next_shift_id: i64,
}

impl InMemoryStore {
    /// Creates an empty store with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_audit_event_id(&self) -> Result<i64, StoreError> {
        i64::try_from(self.audit_events.len())
            .map(|count| count + 1)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn employee_number_taken(&self, employee_number: u32, exclude: Option<i64>) -> bool {
        self.employees.iter().any(|(record_id, employee)| {
            employee.employee_number == employee_number && Some(*record_id) != exclude
        })
    }
}

impl PositionRepository for InMemoryStore {
    fn get_position(&mut self, name: &str) -> Result<Option<Position>, StoreError> {
        Ok(self.positions.get(name).cloned())
    }

    fn list_positions(&mut self) -> Result<Vec<Position>, StoreError> {
        Ok(self.positions.values().cloned().collect())
    }

    fn add_position(&mut self, position: &Position) -> Result<(), StoreError> {
        if self.positions.contains_key(&position.name) {
            return Err(StoreError::duplicate("position", &position.name));
        }
        self.positions
            .insert(position.name.clone(), position.clone());
        Ok(())
    }

    fn update_position(&mut self, name: &str, position: &Position) -> Result<(), StoreError> {
        if !self.positions.contains_key(name) {
            return Err(StoreError::not_found("position", name));
        }
        if position.name != name && self.positions.contains_key(&position.name) {
            return Err(StoreError::duplicate("position", &position.name));
        }
        self.positions.remove(name);
        self.positions
            .insert(position.name.clone(), position.clone());
        Ok(())
    }

    fn delete_position(&mut self, name: &str) -> Result<(), StoreError> {
        self.positions
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("position", name))
    }
}

impl EmployeeRepository for InMemoryStore {
    fn get_employee(&mut self, record_id: i64) -> Result<Option<Employee>, StoreError> {
        Ok(self.employees.get(&record_id).cloned())
    }

    fn find_employee_by_number(
        &mut self,
        employee_number: u32,
    ) -> Result<Option<Employee>, StoreError> {
        Ok(self
            .employees
            .values()
            .find(|employee| employee.employee_number == employee_number)
            .cloned())
    }

    fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        let mut employees: Vec<Employee> = self.employees.values().cloned().collect();
        employees.sort_by_key(|employee| employee.employee_number);
        Ok(employees)
    }

    fn add_employee(&mut self, employee: &Employee) -> Result<Employee, StoreError> {
        if self.employee_number_taken(employee.employee_number, None) {
            return Err(StoreError::duplicate("employee", employee.employee_number));
        }
        self.next_employee_id += 1;
        let stored: Employee = employee.clone().with_record_id(self.next_employee_id);
        self.employees.insert(self.next_employee_id, stored.clone());
        Ok(stored)
    }

    fn update_employee(
        &mut self,
        record_id: i64,
        employee: &Employee,
    ) -> Result<Employee, StoreError> {
        if !self.employees.contains_key(&record_id) {
            return Err(StoreError::not_found("employee", record_id));
        }
        if self.employee_number_taken(employee.employee_number, Some(record_id)) {
            return Err(StoreError::duplicate("employee", employee.employee_number));
        }
        let stored: Employee = employee.clone().with_record_id(record_id);
        self.employees.insert(record_id, stored.clone());
        Ok(stored)
    }

    fn delete_employee(&mut self, record_id: i64) -> Result<(), StoreError> {
        self.employees
            .remove(&record_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("employee", record_id))
    }
}

impl ShiftTypeRepository for InMemoryStore {
    fn get_shift_type(&mut self, name: &str) -> Result<Option<ShiftType>, StoreError> {
        Ok(self.shift_types.get(name).cloned())
    }

    fn list_shift_types(&mut self) -> Result<Vec<ShiftType>, StoreError> {
        Ok(self.shift_types.values().cloned().collect())
    }

    fn add_shift_type(&mut self, shift_type: &ShiftType) -> Result<(), StoreError> {
        if self.shift_types.contains_key(&shift_type.name) {
            return Err(StoreError::duplicate("shift type", &shift_type.name));
        }
        self.shift_types
            .insert(shift_type.name.clone(), shift_type.clone());
        Ok(())
    }

    fn update_shift_type(
        &mut self,
        name: &str,
        shift_type: &ShiftType,
    ) -> Result<(), StoreError> {
        if !self.shift_types.contains_key(name) {
            return Err(StoreError::not_found("shift type", name));
        }
        if shift_type.name != name && self.shift_types.contains_key(&shift_type.name) {
            return Err(StoreError::duplicate("shift type", &shift_type.name));
        }
        self.shift_types.remove(name);
        self.shift_types
            .insert(shift_type.name.clone(), shift_type.clone());
        Ok(())
    }

    fn delete_shift_type(&mut self, name: &str) -> Result<(), StoreError> {
        self.shift_types
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("shift type", name))
    }
}

impl ShiftRepository for InMemoryStore {
    fn get_shift(&mut self, shift_id: i64) -> Result<Option<ShiftRecord>, StoreError> {
        Ok(self.shifts.get(&shift_id).cloned())
    }

    fn list_shifts(&mut self) -> Result<Vec<ShiftSummary>, StoreError> {
        let mut summaries: Vec<ShiftSummary> = self
            .shifts
            .values()
            .filter_map(ShiftSummary::from_record)
            .collect();
        summaries.sort_by(|a, b| b.date.cmp(&a.date).then(b.shift_id.cmp(&a.shift_id)));
        Ok(summaries)
    }

    fn add_shift(&mut self, record: &ShiftRecord) -> Result<ShiftRecord, StoreError> {
        self.next_shift_id += 1;
        let stored: ShiftRecord = record.clone().with_shift_id(self.next_shift_id);
        self.shifts.insert(self.next_shift_id, stored.clone());
        Ok(stored)
    }

    fn replace_shift(&mut self, record: &ShiftRecord) -> Result<(), StoreError> {
        let Some(shift_id) = record.shift_id() else {
            return Err(StoreError::not_found("shift", "unsaved"));
        };
        let Some(slot) = self.shifts.get_mut(&shift_id) else {
            return Err(StoreError::not_found("shift", shift_id));
        };
        *slot = record.clone();
        Ok(())
    }

    fn delete_shift(&mut self, shift_id: i64) -> Result<(), StoreError> {
        self.shifts
            .remove(&shift_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("shift", shift_id))
    }

    fn persist_transition(
        &mut self,
        transition: &TransitionResult,
    ) -> Result<PersistedTransition, StoreError> {
        let Some(write) = transition.shift_write() else {
            return Err(StoreError::Backend(String::from(
                "Transition carries no shift change to store",
            )));
        };
        // The shift writes below only fail before changing anything, so the
        // event id is the last fallible step.
        let event_id: i64 = self.next_audit_event_id()?;

        let (record, event): (Option<ShiftRecord>, AuditEvent) = match write {
            ShiftWrite::Insert(record) => {
                let stored: ShiftRecord = self.add_shift(record)?;
                let shift_id: i64 = stored.shift_id().ok_or_else(|| {
                    StoreError::Backend(String::from("Stored shift has no id"))
                })?;
                (Some(stored), transition.audit_event.clone().for_shift(shift_id))
            }
            ShiftWrite::Replace(record) => {
                self.replace_shift(record)?;
                (Some(record.clone()), transition.audit_event.clone())
            }
            ShiftWrite::Delete(shift_id) => {
                self.delete_shift(shift_id)?;
                (None, transition.audit_event.clone())
            }
        };

        let audit_event: AuditEvent = event.with_event_id(event_id);
        self.audit_events.push(audit_event.clone());
        Ok(PersistedTransition {
            record,
            audit_event,
        })
    }
}

impl SettingsRepository for InMemoryStore {
    fn get_settings(&mut self) -> Result<Settings, StoreError> {
        Ok(self.settings.clone())
    }

    fn update_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        self.settings = settings.clone();
        Ok(())
    }
}

impl AuditLog for InMemoryStore {
    fn append_audit_event(&mut self, event: &AuditEvent) -> Result<i64, StoreError> {
        let event_id: i64 = self.next_audit_event_id()?;
        self.audit_events
            .push(event.clone().with_event_id(event_id));
        Ok(event_id)
    }

    fn list_audit_events(&mut self, shift_id: Option<i64>) -> Result<Vec<AuditEvent>, StoreError> {
        Ok(self
            .audit_events
            .iter()
            .filter(|event| shift_id.is_none() || event.shift_id == shift_id)
            .cloned()
            .collect())
    }
}
