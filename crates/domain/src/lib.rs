// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod allocation;
mod clock;
mod error;
mod points;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use allocation::{
    ALLOCATION_TOLERANCE, Allocation, AllocationInput, AllocationResult, AllocationValidation,
    PoolCheck, allocate_tips,
};
pub use clock::{compute_hours_worked, format_clock_time, parse_clock_time, parse_shift_date};
pub use error::DomainError;
pub use points::compute_points;
pub use types::{
    Employee, Position, Settings, ShiftEmployeeLine, ShiftMetadata, ShiftType, TipPools,
};
pub use validation::{
    MAX_ROUNDING_MINUTES, validate_employee_fields, validate_employee_number_unique,
    validate_point_value, validate_position, validate_settings, validate_shift_type,
    validate_tip_pools,
};
