//! Configuration handling for xlmerge

use std::path::PathBuf;

/// File name offered for the merged download
pub const DOWNLOAD_FILE_NAME: &str = "merged_output.xlsx";

/// MIME type of the merged download
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Sheet name used for the merged workbook
pub const DEFAULT_SHEET_NAME: &str = "Merged Data";

/// Output format for merge reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration for merge operations
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the merged workbook is written
    pub output_file: PathBuf,
    /// Which sheet to read from each input (first sheet when unset)
    pub sheet_name: Option<String>,
    /// Name of the sheet in the merged workbook
    pub output_sheet_name: String,
    /// Report format
    pub output_format: OutputFormat,
    /// Rows shown in the terminal preview
    pub preview_rows: usize,
    /// Merge even when only one file is given
    pub allow_single: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file: PathBuf::from(DOWNLOAD_FILE_NAME),
            sheet_name: None,
            output_sheet_name: DEFAULT_SHEET_NAME.to_string(),
            output_format: OutputFormat::default(),
            preview_rows: 10,
            allow_single: false,
        }
    }
}

impl Config {
    /// Create a new Config writing to `output_file`
    pub fn new(output_file: PathBuf) -> Self {
        Self {
            output_file,
            ..Default::default()
        }
    }

    /// Set input sheet name
    pub fn with_sheet_name(mut self, name: String) -> Self {
        self.sheet_name = Some(name);
        self
    }

    /// Set the merged sheet name
    pub fn with_output_sheet_name(mut self, name: String) -> Self {
        self.output_sheet_name = name;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set preview row count
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Allow a single input file through the batch gate
    pub fn with_allow_single(mut self, allow: bool) -> Self {
        self.allow_single = allow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("terminal".parse::<OutputFormat>(), Ok(OutputFormat::Terminal));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output_file, PathBuf::from("merged_output.xlsx"));
        assert_eq!(config.output_sheet_name, "Merged Data");
        assert!(config.sheet_name.is_none());
        assert!(!config.allow_single);
    }
}
