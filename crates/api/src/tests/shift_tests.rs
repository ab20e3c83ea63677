// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tip_split::InMemoryStore;
use tip_split_domain::ALLOCATION_TOLERANCE;

use crate::{
    ApiError, ApiResult, AuditTimelineResponse, EditShiftResponse, EmployeeRequest,
    ListShiftsResponse, PositionRequest, SettingsRequest, ShiftLineInfo, ShiftLineRequest,
    ShiftRequest, ShiftResponse, calculate_shift, create_employee, create_shift, delete_employee,
    delete_shift, edit_shift, get_audit_timeline, get_shift, list_employees, list_shifts,
    update_position, update_settings, update_shift,
};

use super::helpers::{
    create_line, create_seeded_store, create_shift_request, create_test_actor, create_test_cause,
    test_now,
};

fn create_stored_shift(store: &mut InMemoryStore) -> i64 {
    create_shift(
        store,
        &create_shift_request(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
    .response
    .shift_id
    .unwrap()
}

fn request_from_edit(edit: &EditShiftResponse) -> ShiftRequest {
    ShiftRequest {
        date: edit.date.clone(),
        shift_type: edit.shift_type.clone(),
        credit_card_tips: edit.credit_card_tips,
        house_tips: edit.house_tips,
        cash_tips: edit.cash_tips,
        lines: edit
            .lines
            .iter()
            .map(|line| ShiftLineRequest {
                employee_number: line.employee_number,
                position: line.position.clone(),
                point_value: None,
                clock_in: line.clock_in.clone(),
                clock_out: line.clock_out.clone(),
            })
            .collect(),
    }
}

// ============================================================================
// Calculation
// ============================================================================

#[test]
fn test_calculate_splits_pools_by_points() {
    let mut store: InMemoryStore = create_seeded_store();

    let preview: ShiftResponse = calculate_shift(&mut store, &create_shift_request()).unwrap();

    assert_eq!(preview.shift_id, None);
    assert_eq!(preview.lifecycle, "Calculated");
    assert_eq!(preview.created_at, None);
    assert_eq!(preview.digital_pool, 100.0);
    assert_eq!(preview.total_points, 16.0);

    let ada: &ShiftLineInfo = &preview.lines[0];
    assert_eq!(ada.employee_name, "Ada Lovelace");
    assert_eq!(ada.hours_worked, 8.0);
    assert_eq!(ada.points, 12.0);
    assert!((ada.digital_tips - 75.0).abs() < 1e-9);
    assert!((ada.cash_tips - 15.0).abs() < 1e-9);
    assert!((ada.total_tips - 90.0).abs() < 1e-9);

    let grace: &ShiftLineInfo = &preview.lines[1];
    assert_eq!(grace.points, 4.0);
    assert!((grace.digital_tips - 25.0).abs() < 1e-9);
    assert!((grace.cash_tips - 5.0).abs() < 1e-9);

    assert!(preview.validation.digital_ok);
    assert!(preview.validation.cash_ok);
    assert!(list_shifts(&mut store).unwrap().shifts.is_empty());
}

#[test]
fn test_calculate_uses_point_value_override() {
    let mut store: InMemoryStore = create_seeded_store();
    let mut request: ShiftRequest = create_shift_request();
    request.lines[0].point_value = Some(0.5);

    let preview: ShiftResponse = calculate_shift(&mut store, &request).unwrap();

    assert_eq!(preview.lines[0].point_value, 0.5);
    assert_eq!(preview.lines[0].points, 4.0);
    assert!((preview.lines[0].digital_tips - 50.0).abs() < 1e-9);
    assert!((preview.lines[1].digital_tips - 50.0).abs() < 1e-9);
}

#[test]
fn test_calculate_applies_rounding_setting() {
    let mut store: InMemoryStore = create_seeded_store();
    update_settings(
        &mut store,
        &SettingsRequest {
            restaurant_name: String::from("Blue Door"),
            time_rounding_minutes: 15,
        },
    )
    .unwrap();
    let mut request: ShiftRequest = create_shift_request();
    request.lines = vec![create_line(101, "Server", "17:00", "00:07")];

    let preview: ShiftResponse = calculate_shift(&mut store, &request).unwrap();

    assert_eq!(preview.lines[0].hours_worked, 7.0);
    assert_eq!(preview.lines[0].points, 10.5);
}

#[test]
fn test_calculate_rejects_unknown_employee() {
    let mut store: InMemoryStore = create_seeded_store();
    let mut request: ShiftRequest = create_shift_request();
    request.lines.push(create_line(999, "Server", "17:00", "21:00"));

    let result: Result<ShiftResponse, ApiError> = calculate_shift(&mut store, &request);

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Employee"
    ));
}

#[test]
fn test_calculate_rejects_unknown_shift_type() {
    let mut store: InMemoryStore = create_seeded_store();
    let mut request: ShiftRequest = create_shift_request();
    request.shift_type = Some(String::from("Overnight"));

    let result: Result<ShiftResponse, ApiError> = calculate_shift(&mut store, &request);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_calculate_reports_missing_clock_out() {
    let mut store: InMemoryStore = create_seeded_store();
    let mut request: ShiftRequest = create_shift_request();
    request.lines[1].clock_out = Some(String::from("  "));

    let err: ApiError = calculate_shift(&mut store, &request).unwrap_err();

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("lines"),
            message: String::from("Employee line 2 is missing clock-out time"),
        }
    );
}

#[test]
fn test_calculate_rejects_unparseable_time() {
    let mut store: InMemoryStore = create_seeded_store();
    let mut request: ShiftRequest = create_shift_request();
    request.lines[0].clock_in = Some(String::from("25:99"));

    let result: Result<ShiftResponse, ApiError> = calculate_shift(&mut store, &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "time"
    ));
}

#[test]
fn test_calculate_rejects_zero_total_points() {
    let mut store: InMemoryStore = create_seeded_store();
    let mut request: ShiftRequest = create_shift_request();
    for line in &mut request.lines {
        line.point_value = Some(0.0);
    }

    let err: ApiError = calculate_shift(&mut store, &request).unwrap_err();

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "positive_total_points"
    ));
}

#[test]
fn test_calculate_rejects_all_zero_tips() {
    let mut store: InMemoryStore = create_seeded_store();
    let mut request: ShiftRequest = create_shift_request();
    request.credit_card_tips = 0.0;
    request.house_tips = 0.0;
    request.cash_tips = 0.0;

    let result: Result<ShiftResponse, ApiError> = calculate_shift(&mut store, &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "tips"
    ));
}

#[test]
fn test_calculate_requires_date() {
    let mut store: InMemoryStore = create_seeded_store();
    let mut request: ShiftRequest = create_shift_request();
    request.date = None;

    let result: Result<ShiftResponse, ApiError> = calculate_shift(&mut store, &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date"
    ));
}

// ============================================================================
// Create / Read
// ============================================================================

#[test]
fn test_create_shift_persists_and_audits() {
    let mut store: InMemoryStore = create_seeded_store();

    let result: ApiResult<ShiftResponse> = create_shift(
        &mut store,
        &create_shift_request(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(result.response.shift_id, Some(1));
    assert_eq!(result.response.lifecycle, "Saved");
    assert_eq!(
        result.response.created_at.as_deref(),
        Some("2026-03-15T00:15:00Z")
    );
    assert_eq!(result.audit_event.event_id, Some(1));
    assert_eq!(result.audit_event.shift_id, Some(1));
    assert_eq!(result.audit_event.action.name, "CreateShift");
    assert_eq!(result.audit_event.actor.id, "manager-7");

    assert_eq!(get_shift(&mut store, 1).unwrap(), result.response);
}

#[test]
fn test_get_missing_shift_is_not_found() {
    let mut store: InMemoryStore = create_seeded_store();

    let err: ApiError = get_shift(&mut store, 42).unwrap_err();

    assert_eq!(
        err,
        ApiError::ResourceNotFound {
            resource_type: String::from("Shift"),
            message: String::from("Shift 42 does not exist"),
        }
    );
}

#[test]
fn test_stored_line_keeps_point_value_after_position_change() {
    let mut store: InMemoryStore = create_seeded_store();
    let shift_id: i64 = create_stored_shift(&mut store);

    update_position(
        &mut store,
        "Server",
        &PositionRequest {
            name: String::from("Server"),
            default_point_value: 3.0,
        },
    )
    .unwrap();

    let stored: ShiftResponse = get_shift(&mut store, shift_id).unwrap();
    assert_eq!(stored.lines[0].point_value, 1.5);
    assert_eq!(stored.lines[0].points, 12.0);
}

#[test]
fn test_list_shifts_includes_employee_count() {
    let mut store: InMemoryStore = create_seeded_store();
    create_stored_shift(&mut store);
    let mut lunch: ShiftRequest = create_shift_request();
    lunch.date = Some(String::from("2026-03-16"));
    lunch.shift_type = Some(String::from("Lunch"));
    lunch.lines.truncate(1);
    create_shift(
        &mut store,
        &lunch,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let listed: ListShiftsResponse = list_shifts(&mut store).unwrap();

    assert_eq!(listed.shifts.len(), 2);
    assert_eq!(listed.shifts[0].date, "2026-03-16");
    assert_eq!(listed.shifts[0].employee_count, 1);
    assert_eq!(listed.shifts[1].shift_type, "Dinner");
    assert_eq!(listed.shifts[1].employee_count, 2);
}

// ============================================================================
// Update / Delete
// ============================================================================

#[test]
fn test_update_shift_replaces_every_line() {
    let mut store: InMemoryStore = create_seeded_store();
    let shift_id: i64 = create_stored_shift(&mut store);
    create_employee(
        &mut store,
        &EmployeeRequest {
            employee_number: 103,
            first_name: String::from("Alan"),
            last_name: String::from("Turing"),
            positions: vec![String::from("Bartender")],
        },
    )
    .unwrap();

    let mut request: ShiftRequest = create_shift_request();
    request.cash_tips = 40.0;
    request
        .lines
        .push(create_line(103, "Bartender", "20:00", "02:00"));

    let result: ApiResult<ShiftResponse> = update_shift(
        &mut store,
        shift_id,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now() + time::Duration::hours(2),
    )
    .unwrap();

    let stored: ShiftResponse = get_shift(&mut store, shift_id).unwrap();
    assert_eq!(stored, result.response);
    assert_eq!(stored.lines.len(), 3);
    assert_eq!(stored.created_at.as_deref(), Some("2026-03-15T00:15:00Z"));
    assert_eq!(stored.lines[2].hours_worked, 6.0);
    assert_eq!(stored.total_points, 23.5);

    let cash_total: f64 = stored.lines.iter().map(|line| line.cash_tips).sum();
    assert!((cash_total - 40.0).abs() < ALLOCATION_TOLERANCE);
    assert_eq!(result.audit_event.action.name, "UpdateShift");
}

#[test]
fn test_update_shift_can_drop_lines() {
    let mut store: InMemoryStore = create_seeded_store();
    let shift_id: i64 = create_stored_shift(&mut store);
    let mut request: ShiftRequest = create_shift_request();
    request.lines.remove(0);

    update_shift(
        &mut store,
        shift_id,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    let stored: ShiftResponse = get_shift(&mut store, shift_id).unwrap();
    assert_eq!(stored.lines.len(), 1);
    assert!((stored.lines[0].digital_tips - 100.0).abs() < 1e-9);
    assert_eq!(list_shifts(&mut store).unwrap().shifts[0].employee_count, 1);
}

#[test]
fn test_update_missing_shift_is_not_found() {
    let mut store: InMemoryStore = create_seeded_store();

    let result: Result<ApiResult<ShiftResponse>, ApiError> = update_shift(
        &mut store,
        7,
        &create_shift_request(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_failed_update_leaves_shift_untouched() {
    let mut store: InMemoryStore = create_seeded_store();
    let shift_id: i64 = create_stored_shift(&mut store);
    let before: ShiftResponse = get_shift(&mut store, shift_id).unwrap();
    let mut request: ShiftRequest = create_shift_request();
    request.lines.clear();

    let result: Result<ApiResult<ShiftResponse>, ApiError> = update_shift(
        &mut store,
        shift_id,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(result.is_err());
    assert_eq!(get_shift(&mut store, shift_id).unwrap(), before);
}

#[test]
fn test_delete_shift_keeps_audit_history() {
    let mut store: InMemoryStore = create_seeded_store();
    let shift_id: i64 = create_stored_shift(&mut store);

    delete_shift(
        &mut store,
        shift_id,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert!(matches!(
        get_shift(&mut store, shift_id),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        delete_shift(
            &mut store,
            shift_id,
            create_test_actor(),
            create_test_cause(),
            test_now(),
        ),
        Err(ApiError::ResourceNotFound { .. })
    ));

    let timeline: AuditTimelineResponse = get_audit_timeline(&mut store, Some(shift_id)).unwrap();
    let actions: Vec<&str> = timeline
        .events
        .iter()
        .map(|event| event.action.as_str())
        .collect();
    assert_eq!(actions, vec!["CreateShift", "DeleteShift"]);
    assert_eq!(timeline.events[1].after, "none");
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_edit_shift_offers_current_positions() {
    let mut store: InMemoryStore = create_seeded_store();
    let shift_id: i64 = create_stored_shift(&mut store);

    let edit: EditShiftResponse = edit_shift(&mut store, shift_id).unwrap();

    assert_eq!(edit.lifecycle, "Edited");
    assert_eq!(edit.date.as_deref(), Some("2026-03-14"));
    assert_eq!(edit.lines[0].clock_out.as_deref(), Some("00:00"));
    assert_eq!(
        edit.lines[0].position_choices,
        vec![String::from("Server"), String::from("Bartender")]
    );
    assert_eq!(edit.lines[1].position_choices, vec![String::from("Busser")]);
}

#[test]
fn test_edit_and_resave_keeps_seconds_precision_times() {
    let mut store: InMemoryStore = create_seeded_store();
    let mut request: ShiftRequest = create_shift_request();
    request.lines[0] = create_line(101, "Server", "09:00:00", "16:07:30");
    let created: ApiResult<ShiftResponse> = create_shift(
        &mut store,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();
    let shift_id: i64 = created.response.shift_id.unwrap();

    let edit: EditShiftResponse = edit_shift(&mut store, shift_id).unwrap();
    assert_eq!(edit.lines[0].clock_in.as_deref(), Some("09:00"));
    assert_eq!(edit.lines[0].clock_out.as_deref(), Some("16:07:30"));

    let resaved: ApiResult<ShiftResponse> = update_shift(
        &mut store,
        shift_id,
        &request_from_edit(&edit),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(resaved.response.lines, created.response.lines);
    assert_eq!(resaved.response.lines[0].hours_worked, 7.125);
}

#[test]
fn test_edit_and_resave_after_employee_deleted() {
    let mut store: InMemoryStore = create_seeded_store();
    let shift_id: i64 = create_stored_shift(&mut store);
    let grace_record_id: i64 = list_employees(&mut store).unwrap().employees[1]
        .record_id
        .unwrap();
    delete_employee(&mut store, grace_record_id).unwrap();

    let edit: EditShiftResponse = edit_shift(&mut store, shift_id).unwrap();
    assert_eq!(edit.lines[1].employee_name, "Grace Hopper");
    assert_eq!(edit.lines[1].position_choices, vec![String::from("Busser")]);

    let resaved: ApiResult<ShiftResponse> = update_shift(
        &mut store,
        shift_id,
        &request_from_edit(&edit),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(resaved.response.lines[1].employee_name, "Grace Hopper");
    assert_eq!(resaved.response.total_points, 16.0);
}

#[test]
fn test_resave_after_position_renamed_keeps_stored_point_value() {
    let mut store: InMemoryStore = create_seeded_store();
    let shift_id: i64 = create_stored_shift(&mut store);
    update_position(
        &mut store,
        "Busser",
        &PositionRequest {
            name: String::from("Runner"),
            default_point_value: 2.0,
        },
    )
    .unwrap();

    let edit: EditShiftResponse = edit_shift(&mut store, shift_id).unwrap();
    let resaved: ApiResult<ShiftResponse> = update_shift(
        &mut store,
        shift_id,
        &request_from_edit(&edit),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(resaved.response.lines[1].position, "Busser");
    assert_eq!(resaved.response.lines[1].point_value, 1.0);
}
