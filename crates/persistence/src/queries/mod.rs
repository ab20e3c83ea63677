// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `reference` — Positions, employees, shift types, and settings
//! - `shifts` — Shift records, their lines, and the history list
//! - `audit` — Audit timeline

pub mod audit;
pub mod reference;
pub mod shifts;
