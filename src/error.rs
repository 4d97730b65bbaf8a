//! Error types for loading, merging and writing

use std::path::PathBuf;

use thiserror::Error;

/// A file could not be read as a spreadsheet
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("not a spreadsheet (expected an xlsx, xlsm, xls or ods file)")]
    NotASpreadsheet,

    #[error("cannot open workbook")]
    Open(#[from] calamine::Error),

    #[error("workbook contains no sheets")]
    NoSheets,

    #[error("sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("sheet '{0}' has no header row")]
    NoHeader(String),
}

/// Failure of a merge batch. Any error aborts the whole batch.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("failed to load {file}")]
    Load {
        file: String,
        #[source]
        source: LoadError,
    },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write merged workbook")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("merged table exceeds the sheet limit ({0})")]
    TooLarge(String),
}

impl MergeError {
    /// Name of the input file that failed to load, if any
    pub fn file(&self) -> Option<&str> {
        match self {
            MergeError::Load { file, .. } => Some(file),
            _ => None,
        }
    }
}
