// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Employee, Position, Settings, ShiftType, TipPools};

/// Largest supported clock rounding increment, in minutes.
pub const MAX_ROUNDING_MINUTES: u32 = 60;

/// Validates a position's name and default point value.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The default point value is negative or not finite
pub fn validate_position(position: &Position) -> Result<(), DomainError> {
    if position.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Position name cannot be empty",
        )));
    }

    validate_point_value(&position.name, position.default_point_value)
}

/// Validates a point value for the named position.
///
/// # Errors
///
/// Returns an error if the value is negative, NaN, or infinite.
pub fn validate_point_value(position: &str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::InvalidPointValue {
            position: position.to_string(),
            value,
        });
    }
    Ok(())
}

/// Validates that an employee's basic field constraints are met.
///
/// This does NOT check employee number uniqueness (that requires context).
///
/// # Errors
///
/// Returns an error if:
/// - The employee number is zero
/// - The first or last name is empty
/// - The employee has no eligible positions
pub fn validate_employee_fields(employee: &Employee) -> Result<(), DomainError> {
    if employee.employee_number == 0 {
        return Err(DomainError::InvalidEmployeeNumber {
            number: employee.employee_number,
        });
    }

    if employee.first_name.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "First name cannot be empty",
        )));
    }

    if employee.last_name.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Last name cannot be empty",
        )));
    }

    if employee.positions.iter().all(|p| p.trim().is_empty()) {
        return Err(DomainError::NoEligiblePositions {
            employee_number: employee.employee_number,
        });
    }

    Ok(())
}

/// Validates that an employee number is not already in use.
///
/// The record identified by `exclude_record_id` is skipped so an employee
/// can be saved again under its own number.
///
/// # Arguments
///
/// * `employee_number` - The candidate employee number
/// * `exclude_record_id` - The record being updated, if any
/// * `existing` - All existing employees
///
/// # Errors
///
/// Returns an error if another employee already carries the number.
pub fn validate_employee_number_unique(
    employee_number: u32,
    exclude_record_id: Option<i64>,
    existing: &[Employee],
) -> Result<(), DomainError> {
    let clash: bool = existing.iter().any(|employee| {
        employee.employee_number == employee_number
            && (exclude_record_id.is_none() || employee.record_id() != exclude_record_id)
    });

    if clash {
        return Err(DomainError::DuplicateEmployeeNumber { employee_number });
    }
    Ok(())
}

/// Validates a shift type name.
///
/// # Errors
///
/// Returns an error if the name is empty.
pub fn validate_shift_type(shift_type: &ShiftType) -> Result<(), DomainError> {
    if shift_type.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Shift type name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates the tip amounts entered for a shift.
///
/// # Errors
///
/// Returns an error if:
/// - Any amount is negative, NaN, or infinite
/// - All three amounts are zero
pub fn validate_tip_pools(tips: &TipPools) -> Result<(), DomainError> {
    let pools: [(&'static str, f64); 3] = [
        ("credit_card_tips", tips.credit_card_tips),
        ("house_tips", tips.house_tips),
        ("cash_tips", tips.cash_tips),
    ];

    for (pool, value) in pools {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidTipAmount { pool, value });
        }
    }

    if tips.is_empty() {
        return Err(DomainError::NoTipsEntered);
    }

    Ok(())
}

/// Validates restaurant settings.
///
/// # Errors
///
/// Returns an error if:
/// - The restaurant name is empty
/// - The rounding increment exceeds [`MAX_ROUNDING_MINUTES`]
pub fn validate_settings(settings: &Settings) -> Result<(), DomainError> {
    if settings.restaurant_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Restaurant name cannot be empty",
        )));
    }

    if settings.time_rounding_minutes > MAX_ROUNDING_MINUTES {
        return Err(DomainError::InvalidRoundingMinutes {
            minutes: settings.time_rounding_minutes,
        });
    }

    Ok(())
}
