//! Excel workbook reader (xlsx, xlsm, xls, ods)

use std::borrow::Cow;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::Timelike;

use crate::config::Config;
use crate::error::LoadError;
use crate::model::{CellValue, Column, Table};

use super::normalize_label;

/// Read one sheet of an in-memory workbook into a table.
///
/// The sheet is `config.sheet_name` when set, otherwise the first sheet.
pub fn read_workbook(bytes: &[u8], config: &Config) -> Result<Table, LoadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheets = workbook.sheet_names();
    let sheet_name = match config.sheet_name {
        Some(ref name) => sheets
            .iter()
            .find(|s| *s == name)
            .cloned()
            .ok_or_else(|| LoadError::SheetNotFound(name.clone()))?,
        None => sheets.first().cloned().ok_or(LoadError::NoSheets)?,
    };

    let range: Range<Data> = workbook.worksheet_range(&sheet_name)?;
    parse_range(&range, &sheet_name)
}

fn parse_range(range: &Range<Data>, sheet_name: &str) -> Result<Table, LoadError> {
    let mut rows = range.rows();

    // First row is header
    let header_row = rows
        .next()
        .ok_or_else(|| LoadError::NoHeader(sheet_name.to_string()))?;
    let (start_row, start_col) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or_default();

    // Blank labels are named after their absolute sheet column (A = 0)
    let columns: Vec<Column> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = normalize_label(&cell_to_string(cell));
            let name = if name.is_empty() {
                format!("Unnamed: {}", start_col + i)
            } else {
                name
            };
            Column::new(name, i)
        })
        .collect();

    let mut table = Table::new(columns);

    // Sheet line of the header, 1-indexed
    let header_line = start_row + 1;

    for (offset, row) in rows.enumerate() {
        let cells: Vec<CellValue> = row.iter().map(convert_cell).collect();
        table.add_row(cells, header_line + offset + 1);
    }

    table.infer_column_types();
    Ok(table)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => {
            if s.is_empty() {
                CellValue::Null
            } else {
                CellValue::String(Cow::Owned(s.clone()))
            }
        }
        Data::Float(f) => {
            // Check if it's actually an integer
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                CellValue::Int(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                return CellValue::Float(dt.as_f64());
            }
            match dt.as_datetime() {
                Some(datetime)
                    if datetime.num_seconds_from_midnight() == 0 && datetime.nanosecond() == 0 =>
                {
                    CellValue::Date(datetime.date())
                }
                Some(datetime) => CellValue::DateTime(datetime),
                None => CellValue::Float(dt.as_f64()),
            }
        }
        Data::DateTimeIso(s) => {
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                CellValue::DateTime(dt)
            } else if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                CellValue::Date(d)
            } else {
                CellValue::String(Cow::Owned(s.clone()))
            }
        }
        Data::DurationIso(s) => CellValue::String(Cow::Owned(s.clone())),
        Data::Error(e) => CellValue::String(Cow::Owned(e.to_string())),
    }
}
