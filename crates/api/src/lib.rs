// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Tip Split system.
//!
//! This crate sits between the HTTP server and the core. It turns raw
//! requests into drafts by resolving employees, positions, and shift types
//! against reference data, drives the shift lifecycle through
//! [`tip_split::apply`], writes the results and their audit events to the
//! store, and translates every lower-layer error into an [`ApiError`].
//!
//! Submitted allocation amounts are never accepted; every save recomputes
//! the allocation from hours and point values.

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
#![allow(clippy::multiple_crate_versions)]

mod csv_export;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use csv_export::{CSV_HEADER, CsvExport, export_file_name, export_shift_lines};
pub use error::{ApiError, translate_core_error, translate_domain_error, translate_store_error};
pub use handlers::{
    ApiResult, calculate_shift, create_employee, create_position, create_shift, create_shift_type,
    delete_employee, delete_position, delete_shift, delete_shift_type, edit_shift,
    export_shift_csv, get_audit_timeline, get_employee, get_settings, get_shift, list_employees,
    list_positions, list_shift_types, list_shifts, rename_shift_type, update_employee,
    update_position, update_settings, update_shift,
};
pub use request_response::{
    AuditEventInfo, AuditTimelineResponse, EditLineInfo, EditShiftResponse, EmployeeInfo,
    EmployeeRequest, ListEmployeesResponse, ListPositionsResponse, ListShiftTypesResponse,
    ListShiftsResponse, PositionRequest, SettingsRequest, ShiftLineInfo, ShiftLineRequest,
    ShiftRequest, ShiftResponse, ShiftSummaryInfo, ShiftTypeRequest, ValidationInfo,
};
