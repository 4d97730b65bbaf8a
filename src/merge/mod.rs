//! Merge engine: intersects column labels and concatenates rows

mod columns;

use serde::Serialize;

use crate::config::Config;
use crate::error::MergeError;
use crate::loader::{load_all, SourceFile};
use crate::model::Table;

pub use columns::{common_columns, dropped_columns};

/// Per-file summary of a merge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    /// Labels of this file that are not common to every file
    pub dropped_columns: Vec<String>,
}

/// Statistics about a merge
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct MergeStats {
    pub files: Vec<FileSummary>,
    pub rows: usize,
    pub columns: usize,
}

/// Result of merging a batch of tables
#[derive(Debug)]
pub enum MergeOutcome {
    /// No tables were given; nothing was computed
    EmptyBatch,
    /// The tables share no column label
    NoCommonColumns { stats: MergeStats },
    /// Rows of every table, projected onto the sorted common columns
    Merged { table: Table, stats: MergeStats },
}

impl MergeOutcome {
    /// The merged table, if any
    pub fn table(&self) -> Option<&Table> {
        match self {
            MergeOutcome::Merged { table, .. } => Some(table),
            _ => None,
        }
    }
}

/// Merge loaded tables on their common columns.
///
/// Row order is table order, then each table's own row order.
pub fn merge_tables(tables: Vec<Table>) -> MergeOutcome {
    if tables.is_empty() {
        return MergeOutcome::EmptyBatch;
    }

    let common = common_columns(&tables);
    let files: Vec<FileSummary> = tables
        .iter()
        .map(|table| FileSummary {
            name: table.name.clone(),
            rows: table.row_count(),
            columns: table.label_set().len(),
            dropped_columns: dropped_columns(table, &common),
        })
        .collect();

    if common.is_empty() {
        tracing::warn!(files = tables.len(), "no common columns found across all files");
        return MergeOutcome::NoCommonColumns {
            stats: MergeStats {
                files,
                rows: 0,
                columns: 0,
            },
        };
    }

    for file in files.iter().filter(|f| !f.dropped_columns.is_empty()) {
        tracing::debug!(
            file = %file.name,
            dropped = ?file.dropped_columns,
            "dropping columns not present in every file"
        );
    }

    let mut projected = tables.iter().enumerate().map(|(index, table)| {
        let mut projected = table.project(&common);
        projected.set_source_file(index);
        projected
    });
    let mut merged = match projected.next() {
        Some(first) => first.with_name(String::new()),
        None => return MergeOutcome::EmptyBatch,
    };
    for table in projected {
        merged.append(table);
    }
    merged.infer_column_types();

    let stats = MergeStats {
        files,
        rows: merged.row_count(),
        columns: merged.column_count(),
    };
    tracing::debug!(rows = stats.rows, columns = stats.columns, "merged tables");

    MergeOutcome::Merged {
        table: merged,
        stats,
    }
}

/// Load a batch of files and merge them. Any load failure aborts the batch.
pub fn merge(files: &[SourceFile], config: &Config) -> Result<MergeOutcome, MergeError> {
    let tables = load_all(files, config)?;
    Ok(merge_tables(tables))
}
