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

//! Shift lifecycle and storage contracts.
//!
//! This crate turns entered shifts into allocated records, moves them
//! through their lifecycle with an audit event for every stored change, and
//! defines the repository traits every store implements.

mod apply;
mod command;
mod draft;
mod error;
mod lifecycle;
mod memory;
mod record;
mod store;

#[cfg(test)]
mod tests;

pub use apply::{ShiftWrite, TransitionResult, apply};
pub use command::Command;
pub use draft::{CalculatedShift, DraftLine, ShiftDraft, calculate};
pub use error::{CoreError, StoreError};
pub use lifecycle::ShiftLifecycle;
pub use memory::InMemoryStore;
pub use record::{PositionChoices, ShiftEditSession, ShiftRecord, ShiftSummary, begin_edit};
pub use store::{
    AuditLog, EmployeeRepository, PersistedTransition, PositionRepository, SettingsRepository,
    ShiftRepository, ShiftTypeRepository, TipStore,
};
