// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift entry and calculation.
//!
//! A [`ShiftDraft`] holds whatever the manager has entered so far; nothing in
//! it is trusted. [`calculate`] validates the draft, derives hours and points
//! for every line, and allocates both tip pools. The result is held in memory
//! as a [`CalculatedShift`] until it is stored.

use crate::error::CoreError;
use crate::lifecycle::ShiftLifecycle;
use crate::record::ShiftRecord;
use time::{Date, OffsetDateTime, Time};
use tip_split_domain::{
    Allocation, AllocationInput, AllocationValidation, DomainError, ShiftEmployeeLine,
    ShiftMetadata, TipPools, allocate_tips, compute_hours_worked, validate_point_value,
    validate_tip_pools,
};
use tracing::{debug, warn};

/// One employee line as entered, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    /// The employee number, if one has been chosen.
    pub employee_number: Option<u32>,
    /// The employee's display name.
    pub employee_name: String,
    /// The position worked, if one has been chosen.
    pub position: Option<String>,
    /// The point multiplier for this line.
    pub point_value: f64,
    /// Clock-in time of day.
    pub clock_in: Option<Time>,
    /// Clock-out time of day.
    pub clock_out: Option<Time>,
}

impl DraftLine {
    /// Builds an editable line from a stored one.
    ///
    /// The stored point value is carried over unchanged, so recalculating an
    /// untouched line reproduces the stored points.
    #[must_use]
    pub fn from_stored(line: &ShiftEmployeeLine) -> Self {
        Self {
            employee_number: Some(line.employee_number),
            employee_name: line.employee_name.clone(),
            position: Some(line.position.clone()),
            point_value: line.point_value(),
            clock_in: Some(line.clock_in),
            clock_out: Some(line.clock_out),
        }
    }
}

/// A shift as entered, before validation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShiftDraft {
    /// The date the shift was worked.
    pub date: Option<Date>,
    /// The shift type name.
    pub shift_type: Option<String>,
    /// The entered tip amounts.
    pub tips: TipPools,
    /// The entered employee lines, in display order.
    pub lines: Vec<DraftLine>,
}

impl ShiftDraft {
    /// Creates an empty draft with the given metadata.
    #[must_use]
    pub const fn new(date: Option<Date>, shift_type: Option<String>, tips: TipPools) -> Self {
        Self {
            date,
            shift_type,
            tips,
            lines: Vec::new(),
        }
    }

    /// Appends a line.
    pub fn push_line(&mut self, line: DraftLine) {
        self.lines.push(line);
    }

    /// The lifecycle state of a draft.
    #[must_use]
    pub const fn lifecycle(&self) -> ShiftLifecycle {
        ShiftLifecycle::Draft
    }
}

/// A validated and allocated shift that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatedShift {
    /// Validated metadata.
    pub metadata: ShiftMetadata,
    /// Allocated lines, in entry order.
    pub lines: Vec<ShiftEmployeeLine>,
    /// Advisory reconciliation of both pools.
    pub validation: AllocationValidation,
}

impl CalculatedShift {
    /// The lifecycle state of a calculated shift.
    #[must_use]
    pub const fn lifecycle(&self) -> ShiftLifecycle {
        ShiftLifecycle::Calculated
    }

    /// Converts this calculation into an unstored record.
    ///
    /// # Arguments
    ///
    /// * `created_at` - The creation timestamp to record
    #[must_use]
    pub fn into_record(self, created_at: OffsetDateTime) -> ShiftRecord {
        ShiftRecord::new(self.metadata, created_at, self.lines)
    }
}

/// Validates a draft and allocates its tips.
///
/// Hours are always derived from the clock times here; a client never
/// supplies them. Pool reconciliation outside tolerance is logged, not
/// rejected.
///
/// # Arguments
///
/// * `draft` - The draft to calculate
/// * `rounding_minutes` - The clock rounding increment (0 disables rounding)
///
/// # Errors
///
/// Returns an error if:
/// - The date or shift type is missing
/// - A tip amount is invalid, or all three are zero
/// - There are no employee lines
/// - Any line is missing its employee, position, or clock times
/// - Any point value is negative or not finite
/// - Total points for the shift are zero
pub fn calculate(draft: &ShiftDraft, rounding_minutes: u32) -> Result<CalculatedShift, CoreError> {
    let metadata: ShiftMetadata = validate_metadata(draft)?;

    if draft.lines.is_empty() {
        return Err(DomainError::NoEmployeeLines.into());
    }

    let lines: Vec<ShiftEmployeeLine> = draft
        .lines
        .iter()
        .enumerate()
        .map(|(index, line)| build_line(index + 1, line, rounding_minutes))
        .collect::<Result<_, _>>()?;

    let inputs: Vec<AllocationInput> = lines
        .iter()
        .map(|line| AllocationInput {
            employee_number: line.employee_number,
            position: line.position.clone(),
            hours: line.hours_worked(),
            points: line.points(),
        })
        .collect();

    let allocation: Allocation = allocate_tips(
        &inputs,
        metadata.tips.digital_pool(),
        metadata.tips.cash_pool(),
    );

    if !allocation.validation.is_defined() {
        return Err(DomainError::ZeroTotalPoints.into());
    }

    if !allocation.validation.digital_ok() || !allocation.validation.cash_ok() {
        warn!(
            date = %metadata.date,
            shift_type = %metadata.shift_type,
            validation = ?allocation.validation,
            "Allocated tips do not reconcile with the entered pools"
        );
    }

    let lines: Vec<ShiftEmployeeLine> = lines
        .into_iter()
        .zip(allocation.results)
        .map(|(line, result)| line.with_allocation(result.digital_tips, result.cash_tips))
        .collect();

    debug!(
        date = %metadata.date,
        shift_type = %metadata.shift_type,
        lines = lines.len(),
        "Calculated shift"
    );

    Ok(CalculatedShift {
        metadata,
        lines,
        validation: allocation.validation,
    })
}

fn validate_metadata(draft: &ShiftDraft) -> Result<ShiftMetadata, DomainError> {
    let Some(date) = draft.date else {
        return Err(DomainError::MissingShiftField { field: "date" });
    };

    let shift_type: String = draft
        .shift_type
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(DomainError::MissingShiftField { field: "type" })?
        .to_string();

    validate_tip_pools(&draft.tips)?;

    Ok(ShiftMetadata {
        date,
        shift_type,
        tips: draft.tips,
    })
}

fn build_line(
    line_number: usize,
    line: &DraftLine,
    rounding_minutes: u32,
) -> Result<ShiftEmployeeLine, DomainError> {
    let missing = |field: &'static str| DomainError::MissingLineField {
        line: line_number,
        field,
    };

    let employee_number: u32 = line
        .employee_number
        .filter(|number| *number > 0)
        .ok_or_else(|| missing("employee ID"))?;
    let position: String = line
        .position
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| missing("position"))?
        .to_string();
    let clock_in: Time = line.clock_in.ok_or_else(|| missing("clock-in time"))?;
    let clock_out: Time = line.clock_out.ok_or_else(|| missing("clock-out time"))?;

    validate_point_value(&position, line.point_value)?;

    let hours_worked: f64 =
        compute_hours_worked(Some(clock_in), Some(clock_out), Some(rounding_minutes));

    Ok(ShiftEmployeeLine::new(
        employee_number,
        line.employee_name.clone(),
        position,
        line.point_value,
        clock_in,
        clock_out,
        hours_worked,
    ))
}
