// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ShiftLifecycle;

#[test]
fn test_permitted_transitions() {
    assert!(ShiftLifecycle::Draft.can_transition_to(ShiftLifecycle::Calculated));
    assert!(ShiftLifecycle::Calculated.can_transition_to(ShiftLifecycle::Saved));
    assert!(ShiftLifecycle::Saved.can_transition_to(ShiftLifecycle::Edited));
    assert!(ShiftLifecycle::Edited.can_transition_to(ShiftLifecycle::Saved));
    assert!(ShiftLifecycle::Saved.can_transition_to(ShiftLifecycle::Deleted));
    assert!(ShiftLifecycle::Edited.can_transition_to(ShiftLifecycle::Deleted));
}

#[test]
fn test_draft_cannot_skip_calculation() {
    assert!(!ShiftLifecycle::Draft.can_transition_to(ShiftLifecycle::Saved));
    assert!(!ShiftLifecycle::Draft.can_transition_to(ShiftLifecycle::Deleted));
}

#[test]
fn test_unsaved_shift_cannot_be_edited_or_deleted() {
    assert!(!ShiftLifecycle::Calculated.can_transition_to(ShiftLifecycle::Edited));
    assert!(!ShiftLifecycle::Calculated.can_transition_to(ShiftLifecycle::Deleted));
}

#[test]
fn test_deleted_is_terminal() {
    let all: [ShiftLifecycle; 5] = [
        ShiftLifecycle::Draft,
        ShiftLifecycle::Calculated,
        ShiftLifecycle::Saved,
        ShiftLifecycle::Edited,
        ShiftLifecycle::Deleted,
    ];

    assert!(ShiftLifecycle::Deleted.is_terminal());
    for target in all {
        assert!(!ShiftLifecycle::Deleted.can_transition_to(target));
    }
}

#[test]
fn test_display_matches_as_str() {
    for state in [
        ShiftLifecycle::Draft,
        ShiftLifecycle::Calculated,
        ShiftLifecycle::Saved,
        ShiftLifecycle::Edited,
        ShiftLifecycle::Deleted,
    ] {
        assert_eq!(state.to_string(), state.as_str());
    }
}
