// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::points::compute_points;
use serde::{Deserialize, Serialize};
use time::{Date, Time};

/// A job position and the point multiplier it carries by default.
///
/// Positions are identified by name. Employees and shift lines refer to a
/// position by name only; nothing enforces that the position still exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// The unique position name (e.g., "Server", "Busser").
    pub name: String,
    /// The multiplier applied to hours worked when this position is assigned.
    pub default_point_value: f64,
}

impl Position {
    /// Creates a new `Position`.
    ///
    /// # Arguments
    ///
    /// * `name` - The position name (surrounding whitespace is trimmed)
    /// * `default_point_value` - The default point multiplier
    #[must_use]
    pub fn new(name: &str, default_point_value: f64) -> Self {
        Self {
            name: name.trim().to_string(),
            default_point_value,
        }
    }
}

/// An employee who can be placed on a shift.
///
/// An employee has two identifiers: the internal `record_id` assigned by the
/// store, and the `employee_number` the restaurant uses on the floor. Only the
/// employee number is ever copied into shift lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The internal record identifier. `None` until persisted.
    record_id: Option<i64>,
    /// The restaurant-assigned employee number (unique, positive).
    pub employee_number: u32,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Names of the positions this employee may work.
    pub positions: Vec<String>,
}

impl Employee {
    /// Creates a new `Employee` without a persisted record id.
    #[must_use]
    pub fn new(
        employee_number: u32,
        first_name: &str,
        last_name: &str,
        positions: Vec<String>,
    ) -> Self {
        Self {
            record_id: None,
            employee_number,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            positions,
        }
    }

    /// Returns a copy of this employee carrying the given record id.
    #[must_use]
    pub const fn with_record_id(mut self, record_id: i64) -> Self {
        self.record_id = Some(record_id);
        self
    }

    /// Returns the internal record identifier if persisted.
    #[must_use]
    pub const fn record_id(&self) -> Option<i64> {
        self.record_id
    }

    /// Returns the name shown on reports ("First Last").
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Checks whether the employee is eligible for the named position.
    #[must_use]
    pub fn can_work(&self, position: &str) -> bool {
        self.positions.iter().any(|p| p == position)
    }
}

/// A named kind of shift (e.g., "Lunch", "Dinner").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftType {
    /// The unique shift type name.
    pub name: String,
}

impl ShiftType {
    /// Creates a new `ShiftType`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
        }
    }
}

/// Restaurant-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Name printed on reports and exports.
    pub restaurant_name: String,
    /// Clock-time rounding increment in minutes. Zero disables rounding.
    pub time_rounding_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            restaurant_name: String::from("My Restaurant"),
            time_rounding_minutes: 0,
        }
    }
}

/// The three tip amounts entered for a shift.
///
/// Credit card and house tips are always combined into a single digital
/// pool before allocation. Cash tips are allocated separately.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TipPools {
    /// Tips left on credit cards.
    pub credit_card_tips: f64,
    /// Tips paid by the house.
    pub house_tips: f64,
    /// Cash tips.
    pub cash_tips: f64,
}

impl TipPools {
    /// Creates a new set of tip pools.
    #[must_use]
    pub const fn new(credit_card_tips: f64, house_tips: f64, cash_tips: f64) -> Self {
        Self {
            credit_card_tips,
            house_tips,
            cash_tips,
        }
    }

    /// The combined digital pool (credit card plus house tips).
    #[must_use]
    pub const fn digital_pool(&self) -> f64 {
        self.credit_card_tips + self.house_tips
    }

    /// The cash pool.
    #[must_use]
    pub const fn cash_pool(&self) -> f64 {
        self.cash_tips
    }

    /// Returns true when no tips of any kind were entered.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_empty(&self) -> bool {
        self.credit_card_tips == 0.0 && self.house_tips == 0.0 && self.cash_tips == 0.0
    }
}

/// Validated shift metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftMetadata {
    /// The calendar date the shift was worked.
    pub date: Date,
    /// The shift type name.
    pub shift_type: String,
    /// The tip pools collected during the shift.
    pub tips: TipPools,
}

/// One employee's participation in a single shift.
///
/// The point value is a snapshot taken when the line was built; later edits
/// to the position's default never reach an existing line. `points` is
/// always `hours_worked * point_value`. Lines have no setters; a corrected
/// line is rebuilt from its draft, which derives points again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftEmployeeLine {
    /// The employee number.
    pub employee_number: u32,
    /// The employee's display name at the time of allocation.
    pub employee_name: String,
    /// The position worked on this shift.
    pub position: String,
    /// Clock-in time of day.
    pub clock_in: Time,
    /// Clock-out time of day.
    pub clock_out: Time,
    point_value: f64,
    hours_worked: f64,
    points: f64,
    digital_tips: f64,
    cash_tips: f64,
}

impl ShiftEmployeeLine {
    /// Creates a new, unallocated line.
    ///
    /// # Arguments
    ///
    /// * `employee_number` - The employee number
    /// * `employee_name` - The employee's display name
    /// * `position` - The position worked
    /// * `point_value` - The point multiplier snapshot for this line
    /// * `clock_in` - Clock-in time of day
    /// * `clock_out` - Clock-out time of day
    /// * `hours_worked` - Hours derived from the clock times
    #[must_use]
    pub fn new(
        employee_number: u32,
        employee_name: String,
        position: String,
        point_value: f64,
        clock_in: Time,
        clock_out: Time,
        hours_worked: f64,
    ) -> Self {
        Self {
            employee_number,
            employee_name,
            position,
            clock_in,
            clock_out,
            point_value,
            hours_worked,
            points: compute_points(hours_worked, point_value),
            digital_tips: 0.0,
            cash_tips: 0.0,
        }
    }

    /// Returns this line carrying the given allocated amounts.
    #[must_use]
    pub const fn with_allocation(mut self, digital_tips: f64, cash_tips: f64) -> Self {
        self.digital_tips = digital_tips;
        self.cash_tips = cash_tips;
        self
    }

    /// The point multiplier snapshot.
    #[must_use]
    pub const fn point_value(&self) -> f64 {
        self.point_value
    }

    /// Hours worked.
    #[must_use]
    pub const fn hours_worked(&self) -> f64 {
        self.hours_worked
    }

    /// Points earned (`hours_worked * point_value`).
    #[must_use]
    pub const fn points(&self) -> f64 {
        self.points
    }

    /// Allocated share of the digital pool.
    #[must_use]
    pub const fn digital_tips(&self) -> f64 {
        self.digital_tips
    }

    /// Allocated share of the cash pool.
    #[must_use]
    pub const fn cash_tips(&self) -> f64 {
        self.cash_tips
    }

    /// Digital plus cash tips.
    #[must_use]
    pub fn total_tips(&self) -> f64 {
        self.digital_tips + self.cash_tips
    }
}
