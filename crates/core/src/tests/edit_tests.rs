// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_draft, test_now};
use crate::{
    CalculatedShift, CoreError, ShiftEditSession, ShiftLifecycle, ShiftRecord, begin_edit,
    calculate,
};
use time::macros::time;
use tip_split_domain::Employee;

fn create_stored_record() -> ShiftRecord {
    calculate(&create_test_draft(), 0)
        .unwrap()
        .into_record(test_now())
        .with_shift_id(11)
}

fn create_test_employees() -> Vec<Employee> {
    vec![
        Employee::new(
            101,
            "Ada",
            "Lovelace",
            vec![String::from("Server"), String::from("Bartender")],
        )
        .with_record_id(1),
        Employee::new(102, "Grace", "Hopper", vec![String::from("Host")]).with_record_id(2),
    ]
}

#[test]
fn test_begin_edit_prefills_draft_from_record() {
    let record: ShiftRecord = create_stored_record();

    let session: ShiftEditSession = begin_edit(&record, &create_test_employees()).unwrap();

    assert_eq!(session.lifecycle(), ShiftLifecycle::Edited);
    assert_eq!(session.shift_id, 11);
    assert_eq!(session.created_at, record.created_at);
    assert_eq!(session.draft.date, Some(record.metadata.date));
    assert_eq!(session.draft.shift_type.as_deref(), Some("Dinner"));
    assert_eq!(session.draft.tips, record.metadata.tips);
    assert_eq!(session.draft.lines.len(), 2);
    assert_eq!(session.draft.lines[0].employee_number, Some(101));
    assert_eq!(session.draft.lines[0].point_value, 1.5);
    assert_eq!(session.draft.lines[0].clock_in, Some(time!(16:00)));
}

#[test]
fn test_begin_edit_offers_current_eligibility() {
    let session: ShiftEditSession =
        begin_edit(&create_stored_record(), &create_test_employees()).unwrap();

    assert_eq!(
        session.choices[0].positions,
        vec![String::from("Server"), String::from("Bartender")]
    );
}

#[test]
fn test_begin_edit_keeps_stored_position_selectable() {
    let session: ShiftEditSession =
        begin_edit(&create_stored_record(), &create_test_employees()).unwrap();

    assert_eq!(session.choices[1].employee_number, 102);
    assert_eq!(
        session.choices[1].positions,
        vec![String::from("Busser"), String::from("Host")]
    );
}

#[test]
fn test_begin_edit_for_removed_employee_offers_stored_position() {
    let session: ShiftEditSession = begin_edit(&create_stored_record(), &[]).unwrap();

    assert_eq!(session.choices[0].positions, vec![String::from("Server")]);
}

#[test]
fn test_recalculating_untouched_edit_reproduces_record() {
    let record: ShiftRecord = create_stored_record();
    let session: ShiftEditSession = begin_edit(&record, &create_test_employees()).unwrap();

    let recalculated: CalculatedShift = calculate(&session.draft, 0).unwrap();

    assert_eq!(recalculated.metadata, record.metadata);
    assert_eq!(recalculated.lines, record.lines);
}

#[test]
fn test_unsaved_record_cannot_be_edited() {
    let unsaved: ShiftRecord = calculate(&create_test_draft(), 0)
        .unwrap()
        .into_record(test_now());

    let result: Result<ShiftEditSession, CoreError> = begin_edit(&unsaved, &[]);

    assert_eq!(
        result.unwrap_err(),
        CoreError::InvalidTransition {
            from: ShiftLifecycle::Calculated,
            to: ShiftLifecycle::Edited,
        }
    );
}
