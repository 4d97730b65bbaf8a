//! Table, Row, and Cell data structures

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexSet;
use serde::Serialize;

use super::schema::{CellType, Column};

/// A cell value with type information
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl CellValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The type tag of this value
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Null => CellType::Null,
            CellValue::Bool(_) => CellType::Bool,
            CellValue::Int(_) => CellType::Int,
            CellValue::Float(_) => CellType::Float,
            CellValue::String(_) => CellType::String,
            CellValue::Date(_) => CellType::Date,
            CellValue::DateTime(_) => CellType::DateTime,
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
            CellValue::Date(d) => Cow::Owned(d.to_string()),
            CellValue::DateTime(dt) => Cow::Owned(dt.to_string()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(Cow::Owned(s))
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// A row in the table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Original line/row number in source file (1-indexed)
    pub source_line: usize,
    /// Position of the source file in the batch
    pub source_file: usize,
}

impl Row {
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self {
            cells,
            source_line,
            source_file: 0,
        }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// A table containing columns and rows
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Name of the file the table was read from
    pub name: String,
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            name: String::new(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Set the source name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a row to the table, padding or truncating it to the column count
    pub fn add_row(&mut self, mut cells: Vec<CellValue>, source_line: usize) {
        cells.resize(self.columns.len(), CellValue::Null);
        self.rows.push(Row::new(cells, source_line));
    }

    /// Get column index by name. Duplicate labels resolve to the first occurrence.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column labels in table order, duplicates included
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Distinct column labels in first-occurrence order
    pub fn label_set(&self) -> IndexSet<&str> {
        self.labels().collect()
    }

    /// Labels that occur more than once, each reported once
    pub fn duplicate_labels(&self) -> Vec<&str> {
        let mut seen = IndexSet::new();
        let mut dupes = IndexSet::new();
        for label in self.labels() {
            if !seen.insert(label) {
                dupes.insert(label);
            }
        }
        dupes.into_iter().collect()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Build a new table holding exactly `labels`, in that order.
    ///
    /// Columns not listed are dropped. A label the table lacks becomes an
    /// all-null column.
    pub fn project(&self, labels: &[String]) -> Table {
        let sources: Vec<Option<usize>> =
            labels.iter().map(|label| self.column_index(label)).collect();

        let columns = labels
            .iter()
            .zip(&sources)
            .enumerate()
            .map(|(i, (label, src))| {
                let cell_type = src
                    .and_then(|idx| self.columns.get(idx))
                    .map(|c| c.inferred_type)
                    .unwrap_or_default();
                Column::with_type(label.clone(), i, cell_type)
            })
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let cells = sources
                    .iter()
                    .map(|src| {
                        src.and_then(|idx| row.get(idx))
                            .cloned()
                            .unwrap_or(CellValue::Null)
                    })
                    .collect();
                Row {
                    cells,
                    source_line: row.source_line,
                    source_file: row.source_file,
                }
            })
            .collect();

        Table {
            name: self.name.clone(),
            columns,
            rows,
        }
    }

    /// Tag every row with its file's position in the batch
    pub fn set_source_file(&mut self, index: usize) {
        for row in &mut self.rows {
            row.source_file = index;
        }
    }

    /// Append another table's rows. The caller guarantees matching columns.
    pub fn append(&mut self, other: Table) {
        self.rows.extend(other.rows);
    }

    /// Recompute each column's inferred type from its cells
    pub fn infer_column_types(&mut self) {
        for (col_idx, column) in self.columns.iter_mut().enumerate() {
            column.inferred_type = self
                .rows
                .iter()
                .filter_map(|row| row.get(col_idx))
                .fold(CellType::Null, |acc, cell| acc.widen(cell.cell_type()));
        }
    }
}
