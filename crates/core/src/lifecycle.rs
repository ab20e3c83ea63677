// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// The lifecycle state of a shift record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShiftLifecycle {
    /// Being entered. Nothing has been calculated or stored.
    #[default]
    Draft,
    /// Allocated in memory but not yet stored.
    Calculated,
    /// Stored with an identifier.
    Saved,
    /// Loaded back into the entry form for correction.
    Edited,
    /// Removed from the store along with its lines. Terminal.
    Deleted,
}

impl std::fmt::Display for ShiftLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ShiftLifecycle {
    /// Converts this lifecycle state to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Calculated => "Calculated",
            Self::Saved => "Saved",
            Self::Edited => "Edited",
            Self::Deleted => "Deleted",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - Draft → Calculated
    /// - Calculated → Saved
    /// - Saved → Edited
    /// - Edited → Saved
    /// - Saved → Deleted
    /// - Edited → Deleted
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Calculated)
                | (Self::Calculated | Self::Edited, Self::Saved)
                | (Self::Saved, Self::Edited)
                | (Self::Saved | Self::Edited, Self::Deleted)
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}
