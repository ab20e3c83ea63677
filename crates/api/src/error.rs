// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use thiserror::Error;
use tip_split::{CoreError, StoreError};
use tip_split_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Whether this error reports a clash with an existing unique key.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DomainRuleViolation { rule, .. } if rule.starts_with("unique_"))
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidEmployeeNumber { number } => ApiError::InvalidInput {
            field: String::from("employee_number"),
            message: format!("Invalid employee number: {number}. Must be greater than 0"),
        },
        DomainError::NoEligiblePositions { employee_number } => ApiError::InvalidInput {
            field: String::from("positions"),
            message: format!(
                "Employee {employee_number} must be eligible for at least one position"
            ),
        },
        DomainError::InvalidPointValue { position, value } => ApiError::InvalidInput {
            field: String::from("point_value"),
            message: format!(
                "Invalid point value {value} for position '{position}': must be a non-negative number"
            ),
        },
        DomainError::InvalidTipAmount { pool, value } => ApiError::InvalidInput {
            field: pool.to_string(),
            message: format!("Invalid {pool} amount {value}: must be a non-negative number"),
        },
        DomainError::NoTipsEntered => ApiError::InvalidInput {
            field: String::from("tips"),
            message: String::from(
                "At least one of credit card, house, or cash tips must be non-zero",
            ),
        },
        DomainError::TimeParseError { input, error } => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("Failed to parse time '{input}': {error}"),
        },
        DomainError::DateParseError { input, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{input}': {error}"),
        },
        DomainError::MissingShiftField { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Missing shift {field}"),
        },
        DomainError::MissingLineField { line, field } => ApiError::InvalidInput {
            field: String::from("lines"),
            message: format!("Employee line {line} is missing {field}"),
        },
        DomainError::NoEmployeeLines => ApiError::InvalidInput {
            field: String::from("lines"),
            message: String::from("A shift must include at least one employee"),
        },
        DomainError::ZeroTotalPoints => ApiError::DomainRuleViolation {
            rule: String::from("positive_total_points"),
            message: String::from("Total points for the shift is zero; tips cannot be allocated"),
        },
        DomainError::InvalidRoundingMinutes { minutes } => ApiError::InvalidInput {
            field: String::from("time_rounding_minutes"),
            message: format!(
                "Invalid rounding increment: {minutes} minutes. Must be between 0 and 60"
            ),
        },
        DomainError::DuplicateEmployeeNumber { employee_number } => {
            ApiError::DomainRuleViolation {
                rule: String::from("unique_employee_number"),
                message: format!("Employee ID {employee_number} is already in use"),
            }
        }
        DomainError::DuplicatePosition(name) => ApiError::DomainRuleViolation {
            rule: String::from("unique_position"),
            message: format!("Position '{name}' already exists"),
        },
        DomainError::DuplicateShiftType(name) => ApiError::DomainRuleViolation {
            rule: String::from("unique_shift_type"),
            message: format!("Shift type '{name}' already exists"),
        },
        DomainError::EmployeeNotFound { employee_number } => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee with ID {employee_number} does not exist"),
        },
        DomainError::EmployeeRecordNotFound(record_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee record {record_id} does not exist"),
        },
        DomainError::PositionNotFound(name) => ApiError::ResourceNotFound {
            resource_type: String::from("Position"),
            message: format!("Position '{name}' does not exist"),
        },
        DomainError::ShiftTypeNotFound(name) => ApiError::ResourceNotFound {
            resource_type: String::from("Shift type"),
            message: format!("Shift type '{name}' does not exist"),
        },
        DomainError::ShiftNotFound(shift_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Shift"),
            message: format!("Shift {shift_id} does not exist"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvalidTransition { from, to } => ApiError::DomainRuleViolation {
            rule: String::from("shift_lifecycle"),
            message: format!("A shift cannot move from {from} to {to}"),
        },
    }
}

/// Translates a store error into an API error.
///
/// Backend failures become `Internal`; everything else keeps its meaning.
#[must_use]
pub fn translate_store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound { entity, key } => ApiError::ResourceNotFound {
            resource_type: capitalize(entity),
            message: format!("{entity} '{key}' does not exist"),
        },
        StoreError::DuplicateKey { entity, key } => ApiError::DomainRuleViolation {
            rule: format!("unique_{}", entity.replace(' ', "_")),
            message: format!("{} '{key}' already exists", capitalize(entity)),
        },
        StoreError::Backend(message) => ApiError::Internal { message },
    }
}

fn capitalize(value: &str) -> String {
    let mut chars: std::str::Chars<'_> = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
