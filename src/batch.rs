//! Batch shell: the upload gate and the load, merge, serialize pipeline

use crate::config::Config;
use crate::error::MergeError;
use crate::loader::SourceFile;
use crate::merge::{merge, MergeOutcome, MergeStats};
use crate::model::Table;
use crate::output::to_xlsx_bytes;

/// Whether a batch may be merged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    NoFiles,
    NeedMoreFiles,
    Ready,
}

/// Merging needs at least two files
pub fn check_batch(file_count: usize) -> Gate {
    match file_count {
        0 => Gate::NoFiles,
        1 => Gate::NeedMoreFiles,
        _ => Gate::Ready,
    }
}

/// What the presentation layer shows for a batch
#[derive(Debug)]
pub enum Report {
    /// Nothing uploaded
    NoFiles,
    /// One file uploaded; at least two are needed
    NeedMoreFiles,
    /// The files share no column
    NoCommonColumns { stats: MergeStats },
    /// Merge succeeded; `bytes` is the xlsx download
    Merged {
        stats: MergeStats,
        table: Table,
        bytes: Vec<u8>,
    },
}

impl Report {
    pub fn is_success(&self) -> bool {
        matches!(self, Report::Merged { .. })
    }

    /// One-line message for the condition
    pub fn message(&self) -> String {
        match self {
            Report::NoFiles => "Upload spreadsheet files to begin.".to_string(),
            Report::NeedMoreFiles => "Please upload at least two files to merge.".to_string(),
            Report::NoCommonColumns { .. } => {
                "Failed to merge: no common columns found across all files.".to_string()
            }
            Report::Merged { stats, .. } => format!(
                "Merged! Final data has {} rows and {} columns.",
                stats.rows, stats.columns
            ),
        }
    }
}

/// Run one batch through the gate, the merger and the serializer.
///
/// Load and write failures are errors; every other outcome is a `Report`.
pub fn run_batch(files: &[SourceFile], config: &Config) -> Result<Report, MergeError> {
    match check_batch(files.len()) {
        Gate::NoFiles => return Ok(Report::NoFiles),
        Gate::NeedMoreFiles if !config.allow_single => return Ok(Report::NeedMoreFiles),
        _ => {}
    }

    tracing::debug!(files = files.len(), "merging batch");

    match merge(files, config)? {
        MergeOutcome::EmptyBatch => Ok(Report::NoFiles),
        MergeOutcome::NoCommonColumns { stats } => Ok(Report::NoCommonColumns { stats }),
        MergeOutcome::Merged { table, stats } => {
            let bytes = to_xlsx_bytes(&table, config)?;
            Ok(Report::Merged {
                stats,
                table,
                bytes,
            })
        }
    }
}
