// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::draft::{DraftLine, ShiftDraft};
use crate::error::CoreError;
use crate::lifecycle::ShiftLifecycle;
use time::{Date, OffsetDateTime};
use tip_split_audit::StateSnapshot;
use tip_split_domain::{
    AllocationValidation, Employee, PoolCheck, ShiftEmployeeLine, ShiftMetadata, TipPools,
};

/// A stored (or about to be stored) shift with its allocated lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftRecord {
    /// The store-assigned identifier. `None` until persisted.
    shift_id: Option<i64>,
    /// Shift metadata.
    pub metadata: ShiftMetadata,
    /// When the shift was first saved. Updates keep the original value.
    pub created_at: OffsetDateTime,
    /// Allocated lines, in display order.
    pub lines: Vec<ShiftEmployeeLine>,
}

impl ShiftRecord {
    /// Creates a new, unstored record.
    #[must_use]
    pub const fn new(
        metadata: ShiftMetadata,
        created_at: OffsetDateTime,
        lines: Vec<ShiftEmployeeLine>,
    ) -> Self {
        Self {
            shift_id: None,
            metadata,
            created_at,
            lines,
        }
    }

    /// Returns this record carrying the given identifier.
    #[must_use]
    pub const fn with_shift_id(mut self, shift_id: i64) -> Self {
        self.shift_id = Some(shift_id);
        self
    }

    /// Returns the store-assigned identifier if persisted.
    #[must_use]
    pub const fn shift_id(&self) -> Option<i64> {
        self.shift_id
    }

    /// The lifecycle state of the record.
    #[must_use]
    pub const fn lifecycle(&self) -> ShiftLifecycle {
        if self.shift_id.is_some() {
            ShiftLifecycle::Saved
        } else {
            ShiftLifecycle::Calculated
        }
    }

    /// Number of employee lines.
    #[must_use]
    pub const fn employee_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of points across all lines.
    #[must_use]
    pub fn total_points(&self) -> f64 {
        self.lines.iter().map(ShiftEmployeeLine::points).sum()
    }

    /// Reconciles the stored amounts against the stored pools.
    #[must_use]
    pub fn validation(&self) -> AllocationValidation {
        if self.total_points() <= 0.0 {
            return AllocationValidation::undefined();
        }

        let digital: f64 = self.lines.iter().map(ShiftEmployeeLine::digital_tips).sum();
        let cash: f64 = self.lines.iter().map(ShiftEmployeeLine::cash_tips).sum();

        AllocationValidation {
            digital: PoolCheck::reconcile(self.metadata.tips.digital_pool(), digital),
            cash: PoolCheck::reconcile(self.metadata.tips.cash_pool(), cash),
        }
    }

    /// A compact summary for audit snapshots.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let tips: &TipPools = &self.metadata.tips;
        StateSnapshot::new(format!(
            "date={},shift_type={},employees={},credit_card_tips={:.2},house_tips={:.2},cash_tips={:.2}",
            self.metadata.date,
            self.metadata.shift_type,
            self.employee_count(),
            tips.credit_card_tips,
            tips.house_tips,
            tips.cash_tips,
        ))
    }
}

/// One row of the shift history list.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftSummary {
    /// The shift identifier.
    pub shift_id: i64,
    /// The date worked.
    pub date: Date,
    /// The shift type name.
    pub shift_type: String,
    /// The entered tip pools.
    pub tips: TipPools,
    /// When the shift was first saved.
    pub created_at: OffsetDateTime,
    /// Number of employee lines.
    pub employee_count: usize,
}

impl ShiftSummary {
    /// Summarizes a stored record. Returns `None` for an unstored record.
    #[must_use]
    pub fn from_record(record: &ShiftRecord) -> Option<Self> {
        Some(Self {
            shift_id: record.shift_id()?,
            date: record.metadata.date,
            shift_type: record.metadata.shift_type.clone(),
            tips: record.metadata.tips,
            created_at: record.created_at,
            employee_count: record.employee_count(),
        })
    }
}

/// The positions offered for one line of an edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionChoices {
    /// The employee on the line.
    pub employee_number: u32,
    /// The positions that may be selected.
    pub positions: Vec<String>,
}

/// A stored shift loaded back into the entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftEditSession {
    /// The shift being edited.
    pub shift_id: i64,
    /// The original creation timestamp.
    pub created_at: OffsetDateTime,
    /// The prefilled draft.
    pub draft: ShiftDraft,
    /// Position choices for each draft line, in the same order.
    pub choices: Vec<PositionChoices>,
}

impl ShiftEditSession {
    /// The lifecycle state of a shift under edit.
    #[must_use]
    pub const fn lifecycle(&self) -> ShiftLifecycle {
        ShiftLifecycle::Edited
    }
}

/// Loads a stored shift into an edit session.
///
/// Each line keeps its stored position and point value. The position
/// choices come from the employee's current eligibility; the stored
/// position is always offered even if the employee has since lost it, and
/// an employee who no longer exists is offered only the stored position.
///
/// # Arguments
///
/// * `record` - The stored shift
/// * `employees` - The current employee list
///
/// # Errors
///
/// Returns an error if the record has never been stored.
pub fn begin_edit(
    record: &ShiftRecord,
    employees: &[Employee],
) -> Result<ShiftEditSession, CoreError> {
    let Some(shift_id) = record.shift_id() else {
        return Err(CoreError::InvalidTransition {
            from: record.lifecycle(),
            to: ShiftLifecycle::Edited,
        });
    };

    let mut draft: ShiftDraft = ShiftDraft::new(
        Some(record.metadata.date),
        Some(record.metadata.shift_type.clone()),
        record.metadata.tips,
    );
    let mut choices: Vec<PositionChoices> = Vec::with_capacity(record.lines.len());

    for line in &record.lines {
        draft.push_line(DraftLine::from_stored(line));

        let employee: Option<&Employee> = employees
            .iter()
            .find(|employee| employee.employee_number == line.employee_number);
        let mut positions: Vec<String> = employee
            .map(|employee| employee.positions.clone())
            .unwrap_or_default();
        if !employee.is_some_and(|employee| employee.can_work(&line.position)) {
            positions.insert(0, line.position.clone());
        }

        choices.push(PositionChoices {
            employee_number: line.employee_number,
            positions,
        });
    }

    Ok(ShiftEditSession {
        shift_id,
        created_at: record.created_at,
        draft,
        choices,
    })
}
