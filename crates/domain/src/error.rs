// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur during domain validation and calculation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A name field (position, shift type, employee, restaurant) is empty or invalid.
    #[error("Invalid name: {0}")]
    InvalidName(String),
    /// The employee number is not a positive integer.
    #[error("Invalid employee number: {number}. Must be greater than 0")]
    InvalidEmployeeNumber {
        /// The rejected employee number.
        number: u32,
    },
    /// The employee has no eligible positions.
    #[error("Employee {employee_number} must be eligible for at least one position")]
    NoEligiblePositions {
        /// The employee number.
        employee_number: u32,
    },
    /// A point value is negative or not a finite number.
    #[error("Invalid point value {value} for position '{position}': must be a non-negative number")]
    InvalidPointValue {
        /// The position the point value applies to.
        position: String,
        /// The rejected value.
        value: f64,
    },
    /// A tip pool amount is negative or not a finite number.
    #[error("Invalid {pool} amount {value}: must be a non-negative number")]
    InvalidTipAmount {
        /// The pool name (`credit_card_tips`, `house_tips`, `cash_tips`).
        pool: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// All three tip pools are zero.
    #[error("At least one of credit card, house, or cash tips must be non-zero")]
    NoTipsEntered,
    /// A clock time could not be parsed.
    #[error("Failed to parse time '{input}': {error}")]
    TimeParseError {
        /// The invalid time string.
        input: String,
        /// The parsing error message.
        error: String,
    },
    /// A shift date could not be parsed.
    #[error("Failed to parse date '{input}': {error}")]
    DateParseError {
        /// The invalid date string.
        input: String,
        /// The parsing error message.
        error: String,
    },
    /// Required shift metadata is missing.
    #[error("Missing shift {field}")]
    MissingShiftField {
        /// The missing field.
        field: &'static str,
    },
    /// An employee line is missing a required field.
    #[error("Employee line {line} is missing {field}")]
    MissingLineField {
        /// The 1-based position of the line in the submission.
        line: usize,
        /// The missing field.
        field: &'static str,
    },
    /// A shift was submitted without any employee lines.
    #[error("A shift must include at least one employee")]
    NoEmployeeLines,
    /// Total points across all lines is zero, so tips cannot be divided.
    #[error("Total points for the shift is zero; tips cannot be allocated")]
    ZeroTotalPoints,
    /// Rounding granularity is outside the supported range.
    #[error("Invalid rounding increment: {minutes} minutes. Must be between 0 and 60")]
    InvalidRoundingMinutes {
        /// The rejected granularity.
        minutes: u32,
    },
    /// The employee number is already assigned to another employee.
    #[error("Employee ID {employee_number} is already in use")]
    DuplicateEmployeeNumber {
        /// The duplicate employee number.
        employee_number: u32,
    },
    /// A position with the same name already exists.
    #[error("Position '{0}' already exists")]
    DuplicatePosition(String),
    /// A shift type with the same name already exists.
    #[error("Shift type '{0}' already exists")]
    DuplicateShiftType(String),
    /// No employee carries the given employee number.
    #[error("Employee with ID {employee_number} not found")]
    EmployeeNotFound {
        /// The employee number that was looked up.
        employee_number: u32,
    },
    /// No employee record has the given internal id.
    #[error("Employee record {0} not found")]
    EmployeeRecordNotFound(i64),
    /// The named position does not exist.
    #[error("Position '{0}' not found")]
    PositionNotFound(String),
    /// The named shift type does not exist.
    #[error("Shift type '{0}' not found")]
    ShiftTypeNotFound(String),
    /// The shift does not exist.
    #[error("Shift {0} not found")]
    ShiftNotFound(i64),
}
