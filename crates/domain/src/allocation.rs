// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Proportional tip allocation.
//!
//! Each pool is split by each line's share of the total points. Individual
//! amounts keep full floating-point precision; rounding to cents is left to
//! display and export. After allocation the distributed sums are compared
//! against the pools within [`ALLOCATION_TOLERANCE`]. That check only absorbs
//! floating-point summation error and is reported, never enforced.

use serde::{Deserialize, Serialize};

/// Maximum absolute difference between a pool and the sum of its allocations.
pub const ALLOCATION_TOLERANCE: f64 = 0.02;

/// One employee line as seen by the allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationInput {
    /// The employee number.
    pub employee_number: u32,
    /// The position worked.
    pub position: String,
    /// Hours worked.
    pub hours: f64,
    /// Points earned.
    pub points: f64,
}

/// One employee's allocated share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// The employee number.
    pub employee_number: u32,
    /// The position worked.
    pub position: String,
    /// Hours worked.
    pub hours: f64,
    /// Points earned.
    pub points: f64,
    /// Share of the digital pool.
    pub digital_tips: f64,
    /// Share of the cash pool.
    pub cash_tips: f64,
}

/// Outcome of reconciling one pool against its distributed total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PoolCheck {
    /// The distributed sum matches the pool within tolerance.
    Balanced,
    /// The distributed sum differs from the pool by at least the tolerance.
    OutOfTolerance {
        /// The pool total.
        expected: f64,
        /// The sum of the allocated amounts.
        distributed: f64,
    },
    /// Nothing could be distributed because total points were zero.
    Undefined,
}

impl PoolCheck {
    /// Compares a pool total to the sum actually distributed.
    #[must_use]
    pub fn reconcile(expected: f64, distributed: f64) -> Self {
        if (expected - distributed).abs() < ALLOCATION_TOLERANCE {
            Self::Balanced
        } else {
            Self::OutOfTolerance {
                expected,
                distributed,
            }
        }
    }

    /// Returns true only for `Balanced`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

/// Advisory reconciliation of both pools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationValidation {
    /// Digital pool check.
    pub digital: PoolCheck,
    /// Cash pool check.
    pub cash: PoolCheck,
}

impl AllocationValidation {
    /// Validation for an allocation that could not be performed.
    #[must_use]
    pub const fn undefined() -> Self {
        Self {
            digital: PoolCheck::Undefined,
            cash: PoolCheck::Undefined,
        }
    }

    /// Whether the digital pool reconciled.
    #[must_use]
    pub const fn digital_ok(&self) -> bool {
        self.digital.is_ok()
    }

    /// Whether the cash pool reconciled.
    #[must_use]
    pub const fn cash_ok(&self) -> bool {
        self.cash.is_ok()
    }

    /// Whether an allocation was actually performed.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        !matches!(self.digital, PoolCheck::Undefined) && !matches!(self.cash, PoolCheck::Undefined)
    }
}

/// The result of splitting both pools across a set of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Per-employee results, in input order.
    pub results: Vec<AllocationResult>,
    /// Advisory reconciliation.
    pub validation: AllocationValidation,
}

/// Splits the digital and cash pools across lines in proportion to points.
///
/// When total points are zero (including an empty line set) nothing is
/// divided: the result set is empty and both pool checks are `Undefined`.
/// Callers must treat that as a rejected calculation.
///
/// # Arguments
///
/// * `lines` - The lines to allocate across
/// * `digital_pool` - Credit card plus house tips
/// * `cash_pool` - Cash tips
#[must_use]
pub fn allocate_tips(lines: &[AllocationInput], digital_pool: f64, cash_pool: f64) -> Allocation {
    let total_points: f64 = lines.iter().map(|line| line.points).sum();

    if total_points <= 0.0 || !total_points.is_finite() {
        return Allocation {
            results: Vec::new(),
            validation: AllocationValidation::undefined(),
        };
    }

    let results: Vec<AllocationResult> = lines
        .iter()
        .map(|line| {
            let share: f64 = line.points / total_points;
            AllocationResult {
                employee_number: line.employee_number,
                position: line.position.clone(),
                hours: line.hours,
                points: line.points,
                digital_tips: digital_pool * share,
                cash_tips: cash_pool * share,
            }
        })
        .collect();

    let distributed_digital: f64 = results.iter().map(|r| r.digital_tips).sum();
    let distributed_cash: f64 = results.iter().map(|r| r.cash_tips).sum();

    Allocation {
        results,
        validation: AllocationValidation {
            digital: PoolCheck::reconcile(digital_pool, distributed_digital),
            cash: PoolCheck::reconcile(cash_pool, distributed_cash),
        },
    }
}
