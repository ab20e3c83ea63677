// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, Cause, StateSnapshot};

fn create_test_event() -> AuditEvent {
    AuditEvent::new(
        None,
        Actor::new(String::from("manager-1"), String::from("manager")),
        Cause::new(String::from("req-1"), String::from("Close out dinner")),
        Action::new(String::from("CreateShift"), None),
        StateSnapshot::absent(),
        StateSnapshot::new(String::from("date=2026-03-14,employees=3")),
    )
}

#[test]
fn test_actor_creation_requires_all_fields() {
    let actor: Actor = Actor::new(String::from("user-123"), String::from("manager"));

    assert_eq!(actor.id, "user-123");
    assert_eq!(actor.actor_type, "manager");
}

#[test]
fn test_cause_creation_requires_all_fields() {
    let cause: Cause = Cause::new(String::from("req-456"), String::from("Edit shift"));

    assert_eq!(cause.id, "req-456");
    assert_eq!(cause.description, "Edit shift");
}

#[test]
fn test_action_creation_with_details() {
    let action: Action = Action::new(
        String::from("UpdateShift"),
        Some(String::from("Replaced 4 lines with 5")),
    );

    assert_eq!(action.name, "UpdateShift");
    assert_eq!(action.details, Some(String::from("Replaced 4 lines with 5")));
}

#[test]
fn test_absent_snapshot() {
    assert_eq!(StateSnapshot::absent().data, "none");
}

#[test]
fn test_new_event_is_unstored_and_unscoped() {
    let event: AuditEvent = create_test_event();

    assert_eq!(event.event_id, None);
    assert_eq!(event.shift_id, None);
    assert_eq!(event.action.name, "CreateShift");
    assert_eq!(event.before.data, "none");
}

#[test]
fn test_event_can_be_scoped_after_storage() {
    let event: AuditEvent = create_test_event().for_shift(7).with_event_id(3);

    assert_eq!(event.shift_id, Some(7));
    assert_eq!(event.event_id, Some(3));
    assert_eq!(event.actor.id, "manager-1");
}
