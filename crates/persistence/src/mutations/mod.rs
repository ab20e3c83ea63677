// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Every mutation that touches more than one row runs inside a single
//! transaction, so a failure leaves the previously stored data in place.
//!
//! - `reference` — Positions, employees, shift types, and settings
//! - `shifts` — Shift records and their lines
//! - `audit` — Audit event appends

pub mod audit;
pub mod reference;
pub mod shifts;
