//! Column labels and the value type seen under each

use serde::Serialize;

/// Type of the values stored in a column, widened across its cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    #[default]
    Null,
    Bool,
    Int,
    Float,
    String,
    Date,
    DateTime,
    Mixed,
}

impl CellType {
    /// Smallest type that holds values of both `self` and `other`.
    ///
    /// Nulls never widen a column; ints widen to floats and dates to
    /// datetimes. Any other disagreement is `Mixed`.
    pub fn widen(self, other: CellType) -> CellType {
        use CellType::*;

        match (self, other) {
            (a, b) if a == b => a,
            (Null, t) | (t, Null) => t,
            (Int, Float) | (Float, Int) => Float,
            (Date, DateTime) | (DateTime, Date) => DateTime,
            _ => Mixed,
        }
    }
}

/// A header label with its position in the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Trimmed header text
    pub name: String,
    /// 0-based position
    pub index: usize,
    /// Widened type of the column's cells
    pub inferred_type: CellType,
}

impl Column {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self::with_type(name, index, CellType::Null)
    }

    pub fn with_type(name: impl Into<String>, index: usize, inferred_type: CellType) -> Self {
        Self {
            name: name.into(),
            index,
            inferred_type,
        }
    }
}
