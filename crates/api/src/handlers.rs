// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler is generic over [`TipStore`], so the same orchestration runs
//! against `SQLite` in the server and against the in-memory store in tests.

use time::{Date, OffsetDateTime, Time};
use tip_split::{
    CalculatedShift, Command, DraftLine, PersistedTransition, ShiftDraft, ShiftEditSession,
    ShiftRecord, ShiftSummary, TipStore, TransitionResult, apply, begin_edit, calculate,
};
use tip_split_audit::{Actor, AuditEvent, Cause};
use tip_split_domain::{
    AllocationValidation, DomainError, Employee, Position, Settings, ShiftEmployeeLine, ShiftType,
    TipPools, format_clock_time, parse_clock_time, parse_shift_date, validate_employee_fields,
    validate_employee_number_unique, validate_position, validate_settings, validate_shift_type,
};
use tracing::{debug, info, warn};

use crate::csv_export::{CsvExport, export_file_name, export_shift_lines};
use crate::error::{ApiError, translate_core_error, translate_domain_error, translate_store_error};
use crate::request_response::{
    AuditEventInfo, AuditTimelineResponse, EditLineInfo, EditShiftResponse, EmployeeInfo,
    EmployeeRequest, ListEmployeesResponse, ListPositionsResponse, ListShiftTypesResponse,
    ListShiftsResponse, PositionRequest, SettingsRequest, ShiftRequest, ShiftResponse,
    ShiftSummaryInfo, ShiftTypeRequest,
};

/// The result of a shift mutation: the response plus the audit event that
/// was recorded for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated and persisted by this operation.
    pub audit_event: AuditEvent,
}

// ============================================================================
// Positions
// ============================================================================

/// Creates a position.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty or the default point value is invalid
/// - A position with the same name already exists
pub fn create_position<S: TipStore>(
    store: &mut S,
    request: &PositionRequest,
) -> Result<Position, ApiError> {
    let position: Position = Position::new(&request.name, request.default_point_value);
    validate_position(&position).map_err(translate_domain_error)?;

    store.add_position(&position).map_err(translate_store_error)?;

    info!(name = %position.name, default_point_value = position.default_point_value, "Created position");
    Ok(position)
}

/// Replaces a position, possibly renaming it.
///
/// Renaming does not touch employee eligibility lists or stored shift lines,
/// which keep the name they were saved with.
///
/// # Errors
///
/// Returns an error if:
/// - The position does not exist
/// - The new values are invalid
/// - The new name belongs to another position
pub fn update_position<S: TipStore>(
    store: &mut S,
    name: &str,
    request: &PositionRequest,
) -> Result<Position, ApiError> {
    let position: Position = Position::new(&request.name, request.default_point_value);
    validate_position(&position).map_err(translate_domain_error)?;

    store
        .update_position(name, &position)
        .map_err(translate_store_error)?;

    info!(old_name = name, new_name = %position.name, "Updated position");
    Ok(position)
}

/// Deletes a position.
///
/// # Errors
///
/// Returns an error if the position does not exist.
pub fn delete_position<S: TipStore>(store: &mut S, name: &str) -> Result<(), ApiError> {
    store.delete_position(name).map_err(translate_store_error)?;
    info!(name, "Deleted position");
    Ok(())
}

/// Lists every position by name.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_positions<S: TipStore>(store: &mut S) -> Result<ListPositionsResponse, ApiError> {
    let positions: Vec<Position> = store.list_positions().map_err(translate_store_error)?;
    Ok(ListPositionsResponse { positions })
}

// ============================================================================
// Employees
// ============================================================================

/// Builds and validates an employee from a request.
///
/// Position names are trimmed and de-duplicated keeping their first
/// occurrence; every one of them must exist.
fn build_employee<S: TipStore>(
    store: &mut S,
    request: &EmployeeRequest,
    exclude_record_id: Option<i64>,
) -> Result<Employee, ApiError> {
    let mut positions: Vec<String> = Vec::with_capacity(request.positions.len());
    for name in &request.positions {
        let trimmed: &str = name.trim();
        if !trimmed.is_empty() && !positions.iter().any(|existing| existing == trimmed) {
            positions.push(trimmed.to_string());
        }
    }

    let employee: Employee = Employee::new(
        request.employee_number,
        &request.first_name,
        &request.last_name,
        positions,
    );
    validate_employee_fields(&employee).map_err(translate_domain_error)?;

    for name in &employee.positions {
        if store
            .get_position(name)
            .map_err(translate_store_error)?
            .is_none()
        {
            return Err(translate_domain_error(DomainError::PositionNotFound(
                name.clone(),
            )));
        }
    }

    let existing: Vec<Employee> = store.list_employees().map_err(translate_store_error)?;
    validate_employee_number_unique(employee.employee_number, exclude_record_id, &existing)
        .map_err(translate_domain_error)?;

    Ok(employee)
}

/// Creates an employee.
///
/// # Errors
///
/// Returns an error if:
/// - Any field is invalid or no position is given
/// - A listed position does not exist
/// - The employee number is already in use
pub fn create_employee<S: TipStore>(
    store: &mut S,
    request: &EmployeeRequest,
) -> Result<EmployeeInfo, ApiError> {
    let employee: Employee = build_employee(store, request, None)?;
    let stored: Employee = store
        .add_employee(&employee)
        .map_err(translate_store_error)?;

    info!(
        record_id = ?stored.record_id(),
        employee_number = stored.employee_number,
        "Created employee"
    );
    Ok(EmployeeInfo::from(&stored))
}

/// Replaces an employee's number, names, and eligible positions.
///
/// # Errors
///
/// Returns an error if:
/// - The employee record does not exist
/// - Any field is invalid or a listed position does not exist
/// - The employee number belongs to another employee
pub fn update_employee<S: TipStore>(
    store: &mut S,
    record_id: i64,
    request: &EmployeeRequest,
) -> Result<EmployeeInfo, ApiError> {
    if store
        .get_employee(record_id)
        .map_err(translate_store_error)?
        .is_none()
    {
        return Err(translate_domain_error(DomainError::EmployeeRecordNotFound(
            record_id,
        )));
    }

    let employee: Employee = build_employee(store, request, Some(record_id))?;
    let stored: Employee = store
        .update_employee(record_id, &employee)
        .map_err(translate_store_error)?;

    info!(record_id, employee_number = stored.employee_number, "Updated employee");
    Ok(EmployeeInfo::from(&stored))
}

/// Deletes an employee. Stored shift lines keep their copy of the name.
///
/// # Errors
///
/// Returns an error if the employee record does not exist.
pub fn delete_employee<S: TipStore>(store: &mut S, record_id: i64) -> Result<(), ApiError> {
    store
        .delete_employee(record_id)
        .map_err(translate_store_error)?;
    info!(record_id, "Deleted employee");
    Ok(())
}

/// Fetches one employee by record id.
///
/// # Errors
///
/// Returns an error if the employee record does not exist.
pub fn get_employee<S: TipStore>(store: &mut S, record_id: i64) -> Result<EmployeeInfo, ApiError> {
    store
        .get_employee(record_id)
        .map_err(translate_store_error)?
        .map(|employee| EmployeeInfo::from(&employee))
        .ok_or_else(|| translate_domain_error(DomainError::EmployeeRecordNotFound(record_id)))
}

/// Lists every employee by employee number.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_employees<S: TipStore>(store: &mut S) -> Result<ListEmployeesResponse, ApiError> {
    let employees: Vec<Employee> = store.list_employees().map_err(translate_store_error)?;
    Ok(ListEmployeesResponse {
        employees: employees.iter().map(EmployeeInfo::from).collect(),
    })
}

// ============================================================================
// Shift Types & Settings
// ============================================================================

/// Creates a shift type.
///
/// # Errors
///
/// Returns an error if the name is empty or already exists.
pub fn create_shift_type<S: TipStore>(
    store: &mut S,
    request: &ShiftTypeRequest,
) -> Result<ShiftType, ApiError> {
    let shift_type: ShiftType = ShiftType::new(&request.name);
    validate_shift_type(&shift_type).map_err(translate_domain_error)?;

    store
        .add_shift_type(&shift_type)
        .map_err(translate_store_error)?;

    info!(name = %shift_type.name, "Created shift type");
    Ok(shift_type)
}

/// Renames a shift type. Stored shifts keep the name they were saved with.
///
/// # Errors
///
/// Returns an error if:
/// - The shift type does not exist
/// - The new name is empty or already taken
pub fn rename_shift_type<S: TipStore>(
    store: &mut S,
    name: &str,
    request: &ShiftTypeRequest,
) -> Result<ShiftType, ApiError> {
    let shift_type: ShiftType = ShiftType::new(&request.name);
    validate_shift_type(&shift_type).map_err(translate_domain_error)?;

    store
        .update_shift_type(name, &shift_type)
        .map_err(translate_store_error)?;

    info!(old_name = name, new_name = %shift_type.name, "Renamed shift type");
    Ok(shift_type)
}

/// Deletes a shift type.
///
/// # Errors
///
/// Returns an error if the shift type does not exist.
pub fn delete_shift_type<S: TipStore>(store: &mut S, name: &str) -> Result<(), ApiError> {
    store
        .delete_shift_type(name)
        .map_err(translate_store_error)?;
    info!(name, "Deleted shift type");
    Ok(())
}

/// Lists every shift type by name.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_shift_types<S: TipStore>(store: &mut S) -> Result<ListShiftTypesResponse, ApiError> {
    let shift_types: Vec<ShiftType> = store.list_shift_types().map_err(translate_store_error)?;
    Ok(ListShiftTypesResponse { shift_types })
}

/// Returns the current settings (defaults for anything never set).
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn get_settings<S: TipStore>(store: &mut S) -> Result<Settings, ApiError> {
    store.get_settings().map_err(translate_store_error)
}

/// Replaces the settings.
///
/// # Errors
///
/// Returns an error if the name is empty or the rounding increment is out of range.
pub fn update_settings<S: TipStore>(
    store: &mut S,
    request: &SettingsRequest,
) -> Result<Settings, ApiError> {
    let settings: Settings = Settings {
        restaurant_name: request.restaurant_name.trim().to_string(),
        time_rounding_minutes: request.time_rounding_minutes,
    };
    validate_settings(&settings).map_err(translate_domain_error)?;

    store
        .update_settings(&settings)
        .map_err(translate_store_error)?;

    info!(
        restaurant_name = %settings.restaurant_name,
        time_rounding_minutes = settings.time_rounding_minutes,
        "Updated settings"
    );
    Ok(settings)
}

// ============================================================================
// Shift Resolution
// ============================================================================

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_optional_time(value: Option<&str>) -> Result<Option<Time>, ApiError> {
    match value {
        Some(text) => parse_clock_time(text).map_err(translate_domain_error),
        None => Ok(None),
    }
}

/// Resolves a shift request into a draft.
///
/// Every named employee must exist, and their current display name is copied
/// onto the line. The point value is the request's override when given, and
/// the position's default otherwise. When updating, references that only
/// survive on the stored shift (a deleted employee, a renamed position or
/// shift type) resolve to the stored values instead of failing. Missing
/// fields are left empty for [`calculate`] to report.
fn resolve_draft<S: TipStore>(
    store: &mut S,
    request: &ShiftRequest,
    existing: Option<&ShiftRecord>,
) -> Result<ShiftDraft, ApiError> {
    let date: Option<Date> = match non_blank(request.date.as_deref()) {
        Some(text) => Some(parse_shift_date(text).map_err(translate_domain_error)?),
        None => None,
    };

    let shift_type: Option<String> = match non_blank(request.shift_type.as_deref()) {
        Some(name) => {
            let stored_type: bool = existing.is_some_and(|record| record.metadata.shift_type == name);
            if !stored_type
                && store
                    .get_shift_type(name)
                    .map_err(translate_store_error)?
                    .is_none()
            {
                return Err(translate_domain_error(DomainError::ShiftTypeNotFound(
                    name.to_string(),
                )));
            }
            Some(name.to_string())
        }
        None => None,
    };

    let tips: TipPools = TipPools::new(
        request.credit_card_tips,
        request.house_tips,
        request.cash_tips,
    );
    let mut draft: ShiftDraft = ShiftDraft::new(date, shift_type, tips);

    for line_request in &request.lines {
        let position: Option<String> =
            non_blank(line_request.position.as_deref()).map(str::to_string);
        let stored_line: Option<&ShiftEmployeeLine> = existing.and_then(|record| {
            record.lines.iter().find(|line| {
                Some(line.employee_number) == line_request.employee_number
                    && Some(&line.position) == position.as_ref()
            })
        });

        let employee_name: String = match line_request.employee_number {
            Some(employee_number) => {
                match store
                    .find_employee_by_number(employee_number)
                    .map_err(translate_store_error)?
                {
                    Some(employee) => employee.display_name(),
                    None => match existing.and_then(|record| {
                        record
                            .lines
                            .iter()
                            .find(|line| line.employee_number == employee_number)
                    }) {
                        Some(line) => line.employee_name.clone(),
                        None => {
                            return Err(translate_domain_error(DomainError::EmployeeNotFound {
                                employee_number,
                            }));
                        }
                    },
                }
            }
            None => String::new(),
        };

        let point_value: f64 = match (line_request.point_value, position.as_deref()) {
            (Some(value), _) => value,
            (None, Some(name)) => match store.get_position(name).map_err(translate_store_error)? {
                Some(found) => found.default_point_value,
                None => match stored_line {
                    Some(line) => line.point_value(),
                    None => {
                        return Err(translate_domain_error(DomainError::PositionNotFound(
                            name.to_string(),
                        )));
                    }
                },
            },
            (None, None) => 0.0,
        };

        draft.push_line(DraftLine {
            employee_number: line_request.employee_number,
            employee_name,
            position,
            point_value,
            clock_in: parse_optional_time(line_request.clock_in.as_deref())?,
            clock_out: parse_optional_time(line_request.clock_out.as_deref())?,
        });
    }

    debug!(lines = draft.lines.len(), "Resolved shift draft");
    Ok(draft)
}

fn rounding_minutes<S: TipStore>(store: &mut S) -> Result<u32, ApiError> {
    Ok(store
        .get_settings()
        .map_err(translate_store_error)?
        .time_rounding_minutes)
}

fn load_shift<S: TipStore>(store: &mut S, shift_id: i64) -> Result<ShiftRecord, ApiError> {
    store
        .get_shift(shift_id)
        .map_err(translate_store_error)?
        .ok_or_else(|| translate_domain_error(DomainError::ShiftNotFound(shift_id)))
}

fn log_validation(shift_id: Option<i64>, validation: &AllocationValidation) {
    if !validation.digital_ok() || !validation.cash_ok() {
        warn!(
            ?shift_id,
            digital_ok = validation.digital_ok(),
            cash_ok = validation.cash_ok(),
            "Allocated tips do not reconcile with the entered pools"
        );
    }
}

// ============================================================================
// Shifts
// ============================================================================

/// Calculates a shift without storing anything.
///
/// # Errors
///
/// Returns an error if:
/// - A referenced employee, position, or shift type does not exist
/// - A date, time, or amount cannot be parsed or is invalid
/// - Required fields are missing or total points are zero
pub fn calculate_shift<S: TipStore>(
    store: &mut S,
    request: &ShiftRequest,
) -> Result<ShiftResponse, ApiError> {
    let draft: ShiftDraft = resolve_draft(store, request, None)?;
    let rounding: u32 = rounding_minutes(store)?;

    let calculated: CalculatedShift = calculate(&draft, rounding).map_err(translate_core_error)?;
    let validation: AllocationValidation = calculated.validation;
    let preview: ShiftRecord = calculated.into_record(OffsetDateTime::UNIX_EPOCH);

    debug!(
        employees = preview.employee_count(),
        total_points = preview.total_points(),
        "Calculated shift preview"
    );
    Ok(ShiftResponse::from_record(&preview, &validation))
}

/// Calculates and stores a new shift, recording an audit event.
///
/// # Arguments
///
/// * `store` - The store
/// * `request` - The submitted shift
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The creation timestamp
///
/// # Errors
///
/// Returns an error if the shift cannot be calculated (see
/// [`calculate_shift`]) or the store fails.
pub fn create_shift<S: TipStore>(
    store: &mut S,
    request: &ShiftRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ShiftResponse>, ApiError> {
    let draft: ShiftDraft = resolve_draft(store, request, None)?;
    let rounding: u32 = rounding_minutes(store)?;

    let transition: TransitionResult = apply(
        None,
        Command::CreateShift { draft },
        rounding,
        now,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let persisted: PersistedTransition = store
        .persist_transition(&transition)
        .map_err(translate_store_error)?;
    let Some(stored) = persisted.record else {
        return Err(ApiError::Internal {
            message: String::from("Shift creation produced no record"),
        });
    };
    let shift_id: i64 = stored.shift_id().ok_or_else(|| ApiError::Internal {
        message: String::from("Store did not assign a shift id"),
    })?;
    let validation: AllocationValidation = transition
        .validation
        .unwrap_or_else(|| stored.validation());
    let audit_event: AuditEvent = persisted.audit_event;

    log_validation(Some(shift_id), &validation);
    info!(
        shift_id,
        date = %stored.metadata.date,
        shift_type = %stored.metadata.shift_type,
        employees = stored.employee_count(),
        "Created shift"
    );

    Ok(ApiResult {
        response: ShiftResponse::from_record(&stored, &validation),
        audit_event,
    })
}

/// Fetches one stored shift.
///
/// # Errors
///
/// Returns an error if the shift does not exist.
pub fn get_shift<S: TipStore>(store: &mut S, shift_id: i64) -> Result<ShiftResponse, ApiError> {
    let record: ShiftRecord = load_shift(store, shift_id)?;
    let validation: AllocationValidation = record.validation();
    Ok(ShiftResponse::from_record(&record, &validation))
}

/// Replaces a stored shift's metadata and its entire line set.
///
/// The allocation is always recomputed from the submitted lines.
///
/// # Errors
///
/// Returns an error if the shift does not exist or the submission cannot be
/// calculated.
pub fn update_shift<S: TipStore>(
    store: &mut S,
    shift_id: i64,
    request: &ShiftRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ShiftResponse>, ApiError> {
    let existing: ShiftRecord = load_shift(store, shift_id)?;
    let draft: ShiftDraft = resolve_draft(store, request, Some(&existing))?;
    let rounding: u32 = rounding_minutes(store)?;

    let transition: TransitionResult = apply(
        Some(&existing),
        Command::UpdateShift { shift_id, draft },
        rounding,
        now,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let persisted: PersistedTransition = store
        .persist_transition(&transition)
        .map_err(translate_store_error)?;
    let Some(record) = persisted.record else {
        return Err(ApiError::Internal {
            message: format!("Update of shift {shift_id} produced no record"),
        });
    };
    let validation: AllocationValidation = transition
        .validation
        .unwrap_or_else(|| record.validation());
    let audit_event: AuditEvent = persisted.audit_event;

    log_validation(Some(shift_id), &validation);
    info!(
        shift_id,
        old_lines = existing.employee_count(),
        new_lines = record.employee_count(),
        "Updated shift"
    );

    Ok(ApiResult {
        response: ShiftResponse::from_record(&record, &validation),
        audit_event,
    })
}

/// Deletes a stored shift and all of its lines.
///
/// # Errors
///
/// Returns an error if the shift does not exist.
pub fn delete_shift<S: TipStore>(
    store: &mut S,
    shift_id: i64,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<()>, ApiError> {
    let existing: ShiftRecord = load_shift(store, shift_id)?;

    let transition: TransitionResult = apply(
        Some(&existing),
        Command::DeleteShift { shift_id },
        0,
        now,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let persisted: PersistedTransition = store
        .persist_transition(&transition)
        .map_err(translate_store_error)?;
    let audit_event: AuditEvent = persisted.audit_event;

    info!(shift_id, lines = existing.employee_count(), "Deleted shift");
    Ok(ApiResult {
        response: (),
        audit_event,
    })
}

/// Lists stored shifts, newest date first, with their employee counts.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_shifts<S: TipStore>(store: &mut S) -> Result<ListShiftsResponse, ApiError> {
    let summaries: Vec<ShiftSummary> = store.list_shifts().map_err(translate_store_error)?;
    Ok(ListShiftsResponse {
        shifts: summaries.iter().map(ShiftSummaryInfo::from).collect(),
    })
}

/// Reopens a stored shift for editing.
///
/// Each line offers the employee's current eligible positions, always
/// including the one stored on the line.
///
/// # Errors
///
/// Returns an error if the shift does not exist.
pub fn edit_shift<S: TipStore>(store: &mut S, shift_id: i64) -> Result<EditShiftResponse, ApiError> {
    let record: ShiftRecord = load_shift(store, shift_id)?;
    let employees: Vec<Employee> = store.list_employees().map_err(translate_store_error)?;

    let session: ShiftEditSession = begin_edit(&record, &employees).map_err(translate_core_error)?;

    let lines: Vec<EditLineInfo> = session
        .draft
        .lines
        .iter()
        .zip(&session.choices)
        .map(|(line, choices)| EditLineInfo {
            employee_number: line.employee_number,
            employee_name: line.employee_name.clone(),
            position: line.position.clone(),
            point_value: line.point_value,
            clock_in: line.clock_in.map(format_clock_time),
            clock_out: line.clock_out.map(format_clock_time),
            position_choices: choices.positions.clone(),
        })
        .collect();

    debug!(shift_id, lines = lines.len(), "Opened shift for editing");
    Ok(EditShiftResponse {
        shift_id: session.shift_id,
        lifecycle: session.lifecycle().to_string(),
        date: session.draft.date.map(|date| date.to_string()),
        shift_type: session.draft.shift_type.clone(),
        credit_card_tips: session.draft.tips.credit_card_tips,
        house_tips: session.draft.tips.house_tips,
        cash_tips: session.draft.tips.cash_tips,
        lines,
    })
}

/// Exports a stored shift's allocation as CSV text.
///
/// # Errors
///
/// Returns an error if the shift does not exist or CSV rendering fails.
pub fn export_shift_csv<S: TipStore>(store: &mut S, shift_id: i64) -> Result<CsvExport, ApiError> {
    let record: ShiftRecord = load_shift(store, shift_id)?;
    let content: String = export_shift_lines(&record)?;
    debug!(shift_id, bytes = content.len(), "Exported shift CSV");
    Ok(CsvExport {
        file_name: export_file_name(&record),
        content,
    })
}

/// Returns the audit timeline, optionally limited to one shift.
///
/// Events for deleted shifts remain available.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn get_audit_timeline<S: TipStore>(
    store: &mut S,
    shift_id: Option<i64>,
) -> Result<AuditTimelineResponse, ApiError> {
    let events: Vec<AuditEvent> = store
        .list_audit_events(shift_id)
        .map_err(translate_store_error)?;
    Ok(AuditTimelineResponse {
        events: events.iter().map(AuditEventInfo::from).collect(),
    })
}
