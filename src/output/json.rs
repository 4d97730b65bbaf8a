//! JSON report format

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::batch::Report;
use crate::config::XLSX_MIME_TYPE;
use crate::merge::MergeStats;
use crate::model::{CellValue, Column};

use super::ReportFormatter;

/// JSON report formatter
pub struct JsonOutput {
    pretty: bool,
    preview_rows: usize,
}

impl JsonOutput {
    pub fn new(preview_rows: usize) -> Self {
        Self {
            pretty: true,
            preview_rows,
        }
    }

    pub fn compact(preview_rows: usize) -> Self {
        Self {
            pretty: false,
            preview_rows,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a MergeStats>,
    columns: Vec<&'a Column>,
    preview: Vec<&'a [CellValue]>,
}

impl ReportFormatter for JsonOutput {
    fn render(
        &self,
        report: &Report,
        destination: &Path,
        writer: &mut dyn WriteColor,
    ) -> Result<()> {
        let mut output = JsonReport {
            status: "",
            message: report.message(),
            output_file: None,
            mime_type: None,
            stats: None,
            columns: Vec::new(),
            preview: Vec::new(),
        };

        match report {
            Report::NoFiles => output.status = "no_files",
            Report::NeedMoreFiles => output.status = "need_more_files",
            Report::NoCommonColumns { stats } => {
                output.status = "no_common_columns";
                output.stats = Some(stats);
            }
            Report::Merged { stats, table, .. } => {
                output.status = "merged";
                output.output_file = Some(destination.display().to_string());
                output.mime_type = Some(XLSX_MIME_TYPE);
                output.stats = Some(stats);
                output.columns = table.columns.iter().collect();
                output.preview = table
                    .rows
                    .iter()
                    .take(self.preview_rows)
                    .map(|row| row.cells.as_slice())
                    .collect();
            }
        }

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
