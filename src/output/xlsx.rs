//! Spreadsheet serializer for merged tables

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use rust_xlsxwriter::{Format, Workbook};

use crate::config::Config;
use crate::error::MergeError;
use crate::model::{CellValue, Table};

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Days from 0001-01-01 (CE day 1) to the Excel epoch 1899-12-30
const EXCEL_EPOCH_DAYS_FROM_CE: i32 = 693_594;

/// Encode a table as a single-sheet xlsx workbook.
///
/// Row 1 holds the column labels as given; each table row follows. Null
/// cells are left blank.
pub fn to_xlsx_bytes(table: &Table, config: &Config) -> Result<Vec<u8>, MergeError> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format(DATE_FORMAT);
    let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(config.output_sheet_name.as_str())?;

    let col_count = u16::try_from(table.column_count())
        .map_err(|_| MergeError::TooLarge(format!("{} columns", table.column_count())))?;
    let row_count = u32::try_from(table.row_count())
        .ok()
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| MergeError::TooLarge(format!("{} rows", table.row_count())))?;

    for (col, column) in (0..col_count).zip(&table.columns) {
        worksheet.write_string(0, col, column.name.as_str())?;
    }

    for (row_num, row) in (1..row_count).zip(&table.rows) {
        for (col, cell) in (0..col_count).zip(&row.cells) {
            match cell {
                CellValue::Null => {}
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b)?;
                }
                CellValue::Int(i) => {
                    worksheet.write_number(row_num, col, *i as f64)?;
                }
                CellValue::Float(f) => {
                    worksheet.write_number(row_num, col, *f)?;
                }
                CellValue::String(s) => {
                    worksheet.write_string(row_num, col, s.as_ref())?;
                }
                CellValue::Date(d) => {
                    worksheet.write_number_with_format(row_num, col, date_serial(*d), &date_format)?;
                }
                CellValue::DateTime(dt) => {
                    worksheet.write_number_with_format(
                        row_num,
                        col,
                        datetime_serial(*dt),
                        &datetime_format,
                    )?;
                }
            }
        }
    }

    tracing::debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        sheet = %config.output_sheet_name,
        "serialized workbook"
    );

    Ok(workbook.save_to_buffer()?)
}

/// Excel serial day number of a date (1900 date system)
fn date_serial(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce() - EXCEL_EPOCH_DAYS_FROM_CE)
}

fn datetime_serial(datetime: NaiveDateTime) -> f64 {
    let seconds = f64::from(datetime.num_seconds_from_midnight())
        + f64::from(datetime.nanosecond()) / 1e9;
    date_serial(datetime.date()) + seconds / 86_400.0
}
