// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::draft::ShiftDraft;

/// A command represents manager intent to change a stored shift.
///
/// Commands are applied to the current record (if any) to produce the next
/// record and an audit event.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Calculate and store a new shift.
    CreateShift {
        /// The entered shift.
        draft: ShiftDraft,
    },
    /// Recalculate an existing shift and replace its lines.
    UpdateShift {
        /// The shift to replace.
        shift_id: i64,
        /// The corrected shift.
        draft: ShiftDraft,
    },
    /// Remove a shift and all of its lines.
    DeleteShift {
        /// The shift to remove.
        shift_id: i64,
    },
}

impl Command {
    /// The action name recorded in the audit trail.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateShift { .. } => "CreateShift",
            Self::UpdateShift { .. } => "UpdateShift",
            Self::DeleteShift { .. } => "DeleteShift",
        }
    }
}
