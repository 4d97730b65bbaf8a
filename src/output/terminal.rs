//! Colored terminal report

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::batch::Report;
use crate::merge::MergeStats;
use crate::model::Table;

use super::ReportFormatter;

/// Terminal report with colored status lines and a table preview
pub struct TerminalOutput {
    preview_rows: usize,
}

impl TerminalOutput {
    pub fn new(preview_rows: usize) -> Self {
        Self { preview_rows }
    }

    fn write_status(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()> {
        let color = match report {
            Report::Merged { .. } => Color::Green,
            Report::NoCommonColumns { .. } => Color::Red,
            Report::NoFiles | Report::NeedMoreFiles => Color::Cyan,
        };
        writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(writer, "{}", report.message())?;
        writer.reset()?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_files(&self, stats: &MergeStats, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(writer, "{} file(s) uploaded.", stats.files.len())?;
        for file in &stats.files {
            write!(
                writer,
                "  {} ({} rows, {} columns)",
                file.name, file.rows, file.columns
            )?;
            if !file.dropped_columns.is_empty() {
                writer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                write!(writer, " dropped: {}", file.dropped_columns.join(", "))?;
                writer.reset()?;
            }
            writeln!(writer)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_preview(&self, table: &Table, writer: &mut dyn WriteColor) -> Result<()> {
        if self.preview_rows == 0 || table.column_count() == 0 {
            return Ok(());
        }

        let mut builder = Builder::default();
        builder.push_record(table.labels().map(str::to_string));
        for row in table.rows.iter().take(self.preview_rows) {
            builder.push_record(row.cells.iter().map(|c| c.display().into_owned()));
        }
        let grid = builder.build().with(Style::modern()).to_string();
        writeln!(writer, "{}", grid)?;

        let hidden = table.row_count().saturating_sub(self.preview_rows);
        if hidden > 0 {
            writeln!(writer, "... {} more row(s)", hidden)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ReportFormatter for TerminalOutput {
    fn render(
        &self,
        report: &Report,
        destination: &Path,
        writer: &mut dyn WriteColor,
    ) -> Result<()> {
        match report {
            Report::NoFiles | Report::NeedMoreFiles => {
                self.write_status(report, writer)?;
            }
            Report::NoCommonColumns { stats } => {
                self.write_files(stats, writer)?;
                self.write_status(report, writer)?;
            }
            Report::Merged { stats, table, .. } => {
                self.write_files(stats, writer)?;
                self.write_preview(table, writer)?;
                self.write_status(report, writer)?;
                writeln!(writer, "Wrote {}", destination.display())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::FileSummary;
    use crate::model::Column;
    use termcolor::NoColor;

    fn render(output: &TerminalOutput, report: &Report) -> String {
        let mut out = NoColor::new(Vec::new());
        output
            .render(report, Path::new("merged_output.xlsx"), &mut out)
            .unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    fn merged_report(rows: usize) -> Report {
        let mut table = Table::new(vec![Column::new("City", 0), Column::new("Name", 1)]);
        for i in 0..rows {
            table.add_row(vec!["Oslo".into(), format!("n{}", i).into()], i + 2);
        }
        Report::Merged {
            stats: MergeStats {
                files: vec![
                    FileSummary {
                        name: "a.xlsx".into(),
                        rows,
                        columns: 3,
                        dropped_columns: vec!["Age".into()],
                    },
                    FileSummary {
                        name: "b.xlsx".into(),
                        rows: 0,
                        columns: 2,
                        dropped_columns: Vec::new(),
                    },
                ],
                rows,
                columns: 2,
            },
            table,
            bytes: Vec::new(),
        }
    }

    #[test]
    fn test_merged_output() {
        let text = render(&TerminalOutput::new(2), &merged_report(3));

        assert!(text.contains("2 file(s) uploaded."));
        assert!(text.contains("a.xlsx (3 rows, 3 columns) dropped: Age"));
        assert!(text.contains("City"));
        assert!(text.contains("n1"));
        assert!(!text.contains("n2"));
        assert!(text.contains("... 1 more row(s)"));
        assert!(text.contains("Merged! Final data has 3 rows and 2 columns."));
        assert!(text.contains("Wrote merged_output.xlsx"));
    }

    #[test]
    fn test_preview_disabled() {
        let text = render(&TerminalOutput::new(0), &merged_report(3));
        assert!(!text.contains("n0"));
        assert!(text.contains("Merged!"));
    }

    #[test]
    fn test_gate_messages() {
        let output = TerminalOutput::default();
        assert_eq!(
            render(&output, &Report::NeedMoreFiles).trim(),
            "Please upload at least two files to merge."
        );
        assert_eq!(
            render(&output, &Report::NoFiles).trim(),
            "Upload spreadsheet files to begin."
        );
    }

    #[test]
    fn test_no_common_columns_output() {
        let report = Report::NoCommonColumns {
            stats: MergeStats::default(),
        };
        let text = render(&TerminalOutput::default(), &report);
        assert!(text.contains("no common columns found"));
        assert!(!text.contains("Wrote"));
    }
}
