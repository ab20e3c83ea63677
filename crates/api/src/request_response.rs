// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry raw user input (clock times and dates as text, optional
//! fields as `Option`) and are resolved against reference data by the
//! handlers. Responses are flattened views of domain and core types.

use serde::{Deserialize, Serialize};
use tip_split::{ShiftRecord, ShiftSummary};
use tip_split_audit::AuditEvent;
use tip_split_domain::{
    AllocationValidation, Employee, PoolCheck, Position, ShiftEmployeeLine, ShiftType,
    format_clock_time,
};
use time::format_description::well_known::Rfc3339;

/// API request to create or update a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRequest {
    /// The position name.
    pub name: String,
    /// The default point multiplier for new lines.
    pub default_point_value: f64,
}

/// API response listing every position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPositionsResponse {
    /// All positions, by name.
    pub positions: Vec<Position>,
}

/// API request to create or update an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// The user-visible employee ID.
    pub employee_number: u32,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Eligible position names, in preference order.
    pub positions: Vec<String>,
}

/// An employee as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    /// The internal record id.
    pub record_id: Option<i64>,
    /// The user-visible employee ID.
    pub employee_number: u32,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// `"First Last"`.
    pub display_name: String,
    /// Eligible position names.
    pub positions: Vec<String>,
}

impl From<&Employee> for EmployeeInfo {
    fn from(employee: &Employee) -> Self {
        Self {
            record_id: employee.record_id(),
            employee_number: employee.employee_number,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            display_name: employee.display_name(),
            positions: employee.positions.clone(),
        }
    }
}

/// API response listing every employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEmployeesResponse {
    /// All employees, by employee number.
    pub employees: Vec<EmployeeInfo>,
}

/// API request to create or rename a shift type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTypeRequest {
    /// The shift type name.
    pub name: String,
}

/// API response listing every shift type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListShiftTypesResponse {
    /// All shift types, by name.
    pub shift_types: Vec<ShiftType>,
}

/// API request to replace the restaurant settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRequest {
    /// Restaurant name.
    pub restaurant_name: String,
    /// Clock-time rounding increment in minutes (0 disables rounding).
    pub time_rounding_minutes: u32,
}

/// One employee line as submitted for a shift.
///
/// Allocated amounts are deliberately absent: they are always recomputed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShiftLineRequest {
    /// The employee number.
    #[serde(default)]
    pub employee_number: Option<u32>,
    /// The position worked.
    #[serde(default)]
    pub position: Option<String>,
    /// A per-shift override of the position's default point value.
    #[serde(default)]
    pub point_value: Option<f64>,
    /// Clock-in time (`HH:MM` or `HH:MM:SS`).
    #[serde(default)]
    pub clock_in: Option<String>,
    /// Clock-out time (`HH:MM` or `HH:MM:SS`).
    #[serde(default)]
    pub clock_out: Option<String>,
}

/// API request to calculate, create, or update a shift.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Shift date (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: Option<String>,
    /// Shift type name.
    #[serde(default)]
    pub shift_type: Option<String>,
    /// Credit card tips.
    #[serde(default)]
    pub credit_card_tips: f64,
    /// House tips.
    #[serde(default)]
    pub house_tips: f64,
    /// Cash tips.
    #[serde(default)]
    pub cash_tips: f64,
    /// Employee lines, in display order.
    #[serde(default)]
    pub lines: Vec<ShiftLineRequest>,
}

/// One employee line with its derived values and allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftLineInfo {
    /// The employee number.
    pub employee_number: u32,
    /// The employee's name at allocation time.
    pub employee_name: String,
    /// The position worked.
    pub position: String,
    /// The point multiplier used.
    pub point_value: f64,
    /// Clock-in time (`HH:MM`).
    pub clock_in: String,
    /// Clock-out time (`HH:MM`).
    pub clock_out: String,
    /// Hours worked.
    pub hours_worked: f64,
    /// Points earned.
    pub points: f64,
    /// Share of the digital pool.
    pub digital_tips: f64,
    /// Share of the cash pool.
    pub cash_tips: f64,
    /// Digital plus cash.
    pub total_tips: f64,
}

impl From<&ShiftEmployeeLine> for ShiftLineInfo {
    fn from(line: &ShiftEmployeeLine) -> Self {
        Self {
            employee_number: line.employee_number,
            employee_name: line.employee_name.clone(),
            position: line.position.clone(),
            point_value: line.point_value(),
            clock_in: format_clock_time(line.clock_in),
            clock_out: format_clock_time(line.clock_out),
            hours_worked: line.hours_worked(),
            points: line.points(),
            digital_tips: line.digital_tips(),
            cash_tips: line.cash_tips(),
            total_tips: line.total_tips(),
        }
    }
}

/// Advisory reconciliation of both pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationInfo {
    /// Whether the digital pool reconciled within tolerance.
    pub digital_ok: bool,
    /// Whether the cash pool reconciled within tolerance.
    pub cash_ok: bool,
    /// Sum actually distributed from the digital pool, when out of tolerance.
    pub digital_distributed: Option<f64>,
    /// Sum actually distributed from the cash pool, when out of tolerance.
    pub cash_distributed: Option<f64>,
}

impl From<&AllocationValidation> for ValidationInfo {
    fn from(validation: &AllocationValidation) -> Self {
        let spread = |check: PoolCheck| -> Option<f64> {
            match check {
                PoolCheck::OutOfTolerance { distributed, .. } => Some(distributed),
                PoolCheck::Balanced | PoolCheck::Undefined => None,
            }
        };
        Self {
            digital_ok: validation.digital_ok(),
            cash_ok: validation.cash_ok(),
            digital_distributed: spread(validation.digital),
            cash_distributed: spread(validation.cash),
        }
    }
}

/// A calculated or stored shift with its lines and allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftResponse {
    /// The shift id; absent for a preview that was never stored.
    pub shift_id: Option<i64>,
    /// Lifecycle state of the shift as returned.
    pub lifecycle: String,
    /// Shift date (`YYYY-MM-DD`).
    pub date: String,
    /// Shift type name.
    pub shift_type: String,
    /// Credit card tips.
    pub credit_card_tips: f64,
    /// House tips.
    pub house_tips: f64,
    /// Cash tips.
    pub cash_tips: f64,
    /// Credit card plus house tips.
    pub digital_pool: f64,
    /// Sum of points across every line.
    pub total_points: f64,
    /// Creation timestamp (RFC 3339); absent for a preview.
    pub created_at: Option<String>,
    /// Employee lines, in submission order.
    pub lines: Vec<ShiftLineInfo>,
    /// Advisory reconciliation.
    pub validation: ValidationInfo,
}

impl ShiftResponse {
    /// Builds a response from a record, which may or may not be stored.
    #[must_use]
    pub fn from_record(record: &ShiftRecord, validation: &AllocationValidation) -> Self {
        let created_at: Option<String> = record
            .shift_id()
            .and_then(|_| record.created_at.format(&Rfc3339).ok());

        Self {
            shift_id: record.shift_id(),
            lifecycle: record.lifecycle().to_string(),
            date: record.metadata.date.to_string(),
            shift_type: record.metadata.shift_type.clone(),
            credit_card_tips: record.metadata.tips.credit_card_tips,
            house_tips: record.metadata.tips.house_tips,
            cash_tips: record.metadata.tips.cash_tips,
            digital_pool: record.metadata.tips.digital_pool(),
            total_points: record.total_points(),
            created_at,
            lines: record.lines.iter().map(ShiftLineInfo::from).collect(),
            validation: ValidationInfo::from(validation),
        }
    }
}

/// One row of the shift history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSummaryInfo {
    /// The shift id.
    pub shift_id: i64,
    /// Shift date (`YYYY-MM-DD`).
    pub date: String,
    /// Shift type name.
    pub shift_type: String,
    /// Credit card tips.
    pub credit_card_tips: f64,
    /// House tips.
    pub house_tips: f64,
    /// Cash tips.
    pub cash_tips: f64,
    /// Number of employee lines.
    pub employee_count: usize,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl From<&ShiftSummary> for ShiftSummaryInfo {
    fn from(summary: &ShiftSummary) -> Self {
        Self {
            shift_id: summary.shift_id,
            date: summary.date.to_string(),
            shift_type: summary.shift_type.clone(),
            credit_card_tips: summary.tips.credit_card_tips,
            house_tips: summary.tips.house_tips,
            cash_tips: summary.tips.cash_tips,
            employee_count: summary.employee_count,
            created_at: summary
                .created_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| summary.created_at.to_string()),
        }
    }
}

/// API response listing the shift history, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListShiftsResponse {
    /// Shift summaries.
    pub shifts: Vec<ShiftSummaryInfo>,
}

/// One editable line of a stored shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditLineInfo {
    /// The employee number.
    pub employee_number: Option<u32>,
    /// The employee's name as stored on the line.
    pub employee_name: String,
    /// The stored position.
    pub position: Option<String>,
    /// The stored point value.
    pub point_value: f64,
    /// Clock-in time (`HH:MM`), if any.
    pub clock_in: Option<String>,
    /// Clock-out time (`HH:MM`), if any.
    pub clock_out: Option<String>,
    /// Positions the line may be switched to.
    pub position_choices: Vec<String>,
}

/// A stored shift reopened for editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditShiftResponse {
    /// The shift being edited.
    pub shift_id: i64,
    /// Lifecycle state (always `Edited`).
    pub lifecycle: String,
    /// Shift date (`YYYY-MM-DD`).
    pub date: Option<String>,
    /// Shift type name.
    pub shift_type: Option<String>,
    /// Credit card tips.
    pub credit_card_tips: f64,
    /// House tips.
    pub house_tips: f64,
    /// Cash tips.
    pub cash_tips: f64,
    /// Editable lines.
    pub lines: Vec<EditLineInfo>,
}

/// One audit event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// The event id.
    pub event_id: Option<i64>,
    /// The shift the event concerns, if any.
    pub shift_id: Option<i64>,
    /// Who performed the action.
    pub actor_id: String,
    /// The kind of actor.
    pub actor_type: String,
    /// Why the action was performed.
    pub cause_id: String,
    /// Description of the cause.
    pub cause_description: String,
    /// The action name.
    pub action: String,
    /// Action details.
    pub details: Option<String>,
    /// Snapshot before the action.
    pub before: String,
    /// Snapshot after the action.
    pub after: String,
}

impl From<&AuditEvent> for AuditEventInfo {
    fn from(event: &AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            shift_id: event.shift_id,
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
        }
    }
}

/// API response carrying an audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTimelineResponse {
    /// Events in the order they were recorded.
    pub events: Vec<AuditEventInfo>,
}
