// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Computes the points an employee earns on a shift.
///
/// Points are the weighting unit used to split pooled tips:
/// `hours_worked * point_value`.
///
/// # Arguments
///
/// * `hours_worked` - Decimal hours worked
/// * `point_value` - The position multiplier in effect for the line
#[must_use]
pub const fn compute_points(hours_worked: f64, point_value: f64) -> f64 {
    hours_worked * point_value
}
