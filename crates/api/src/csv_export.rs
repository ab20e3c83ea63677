// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of a shift's allocation.
//!
//! One header row followed by one row per employee line, in line order.
//! Numeric columns are rendered with two decimal places. Quoting of names
//! and positions that contain commas, quotes, or newlines is left to the
//! `csv` writer's standard rules.

use csv::Writer;
use tip_split::ShiftRecord;
use tip_split_domain::ShiftEmployeeLine;

use crate::error::ApiError;

/// Column headers of the export.
pub const CSV_HEADER: [&str; 8] = [
    "Employee ID",
    "Name",
    "Position",
    "Hours",
    "Points",
    "Digital Tips",
    "Cash Tips",
    "Total",
];

/// A rendered export and the name to offer it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested download file name.
    pub file_name: String,
    /// The CSV text.
    pub content: String,
}

fn line_to_row(line: &ShiftEmployeeLine) -> [String; 8] {
    [
        line.employee_number.to_string(),
        line.employee_name.clone(),
        line.position.clone(),
        format!("{:.2}", line.hours_worked()),
        format!("{:.2}", line.points()),
        format!("{:.2}", line.digital_tips()),
        format!("{:.2}", line.cash_tips()),
        format!("{:.2}", line.total_tips()),
    ]
}

/// Renders a shift's lines as CSV text.
///
/// # Arguments
///
/// * `record` - The shift to export
///
/// # Errors
///
/// Returns an error if the CSV writer fails, which only happens on an
/// internal fault since output goes to memory.
pub fn export_shift_lines(record: &ShiftRecord) -> Result<String, ApiError> {
    let mut writer: Writer<Vec<u8>> = Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_failure)?;
    for line in &record.lines {
        writer.write_record(line_to_row(line)).map_err(csv_failure)?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("Failed to finish CSV export: {e}"),
    })?;

    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("CSV export produced invalid UTF-8: {e}"),
    })
}

/// Suggested download name for a shift export, e.g. `shift_2026-03-14_Dinner.csv`.
#[must_use]
pub fn export_file_name(record: &ShiftRecord) -> String {
    let shift_type: String = record
        .metadata
        .shift_type
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("shift_{}_{shift_type}.csv", record.metadata.date)
}

fn csv_failure(err: csv::Error) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to write CSV export: {err}"),
    }
}
