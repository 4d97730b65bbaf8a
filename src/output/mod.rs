//! Output: the xlsx serializer and merge report formatting

mod json;
mod terminal;
mod xlsx;

use std::path::Path;

use anyhow::Result;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::batch::Report;
use crate::config::{Config, OutputFormat};

pub use json::JsonOutput;
pub use terminal::TerminalOutput;
pub use xlsx::to_xlsx_bytes;

/// Trait for report formatters
pub trait ReportFormatter {
    /// Render a batch report. `destination` is where a merged workbook was written.
    fn render(&self, report: &Report, destination: &Path, writer: &mut dyn WriteColor)
        -> Result<()>;
}

/// Factory for creating report formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create a report formatter based on configuration
    pub fn create(config: &Config) -> Box<dyn ReportFormatter> {
        match config.output_format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new(config.preview_rows)),
            OutputFormat::Json => Box::new(JsonOutput::new(config.preview_rows)),
        }
    }
}

/// Render a report to stdout
pub fn render_to_stdout(report: &Report, config: &Config) -> Result<()> {
    let color_choice = match config.output_format {
        OutputFormat::Terminal => ColorChoice::Auto,
        OutputFormat::Json => ColorChoice::Never,
    };
    let formatter = OutputFactory::create(config);
    let mut stdout = StandardStream::stdout(color_choice);
    formatter.render(report, &config.output_file, &mut stdout)
}
