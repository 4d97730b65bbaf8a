//! Loader layer: reads uploaded spreadsheets into tables with normalized labels

mod excel;

use std::path::Path;

use crate::config::Config;
use crate::error::{LoadError, MergeError};
use crate::model::Table;

pub use self::excel::read_workbook;

/// One uploaded file: a user-supplied name plus its raw bytes
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk, naming it by its path
    pub fn from_path(path: &Path) -> Result<Self, MergeError> {
        let bytes = std::fs::read(path).map_err(|source| MergeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path.display().to_string(), bytes))
    }
}

/// Trim leading and trailing whitespace from a header label
pub fn normalize_label(label: &str) -> String {
    label.trim().to_string()
}

/// Detect the spreadsheet container from its magic bytes
pub fn detect_format(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 4 {
        return None;
    }

    // Zip container (xlsx, xlsm, ods)
    if &bytes[0..4] == b"PK\x03\x04" {
        return Some("xlsx");
    }

    // OLE2 compound document (xls)
    if &bytes[0..4] == b"\xD0\xCF\x11\xE0" {
        return Some("xls");
    }

    None
}

/// Load one file into a table named after it
pub fn load_table(file: &SourceFile, config: &Config) -> Result<Table, LoadError> {
    if detect_format(&file.bytes).is_none() {
        return Err(LoadError::NotASpreadsheet);
    }

    let table = read_workbook(&file.bytes, config)?.with_name(file.name.clone());

    for label in table.duplicate_labels() {
        tracing::warn!(
            file = %file.name,
            label,
            "duplicate column label after trimming; using the first occurrence"
        );
    }

    tracing::debug!(
        file = %file.name,
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded table"
    );

    Ok(table)
}

/// Load every file in order. The first failure aborts the batch.
pub fn load_all(files: &[SourceFile], config: &Config) -> Result<Vec<Table>, MergeError> {
    files
        .iter()
        .map(|file| {
            load_table(file, config).map_err(|source| MergeError::Load {
                file: file.name.clone(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;
    use rust_xlsxwriter::Workbook;

    fn workbook_bytes(header: &[&str], rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, label) in header.iter().enumerate() {
            sheet.write_string(0, col as u16, *label).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                sheet.write_string(r as u32 + 1, col as u16, *value).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(b"PK\x03\x04rest"), Some("xlsx"));
        assert_eq!(detect_format(b"\xD0\xCF\x11\xE0rest"), Some("xls"));
        assert_eq!(detect_format(b"a,b,c\n"), None);
        assert_eq!(detect_format(b"PK"), None);
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Age \t"), "Age");
        assert_eq!(normalize_label("Name"), "Name");
    }

    #[test]
    fn test_load_trims_header_labels() {
        let bytes = workbook_bytes(&[" Age ", "Name\t"], &[&["x", "y"]]);
        let table = load_table(&SourceFile::new("a.xlsx", bytes), &Config::default()).unwrap();

        let labels: Vec<_> = table.labels().collect();
        assert_eq!(labels, vec!["Age", "Name"]);
        assert_eq!(table.name, "a.xlsx");
        assert_eq!(table.rows[0].cells, vec![CellValue::from("x"), CellValue::from("y")]);
        assert_eq!(table.rows[0].source_line, 2);
    }

    #[test]
    fn test_blank_header_named_by_sheet_column() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(2, 1, "A").unwrap(); // B3
        sheet.write_string(2, 3, "B").unwrap(); // D3
        sheet.write_number(3, 2, 7.0).unwrap(); // C4
        let bytes = workbook.save_to_buffer().unwrap();

        let table = load_table(&SourceFile::new("offset.xlsx", bytes), &Config::default()).unwrap();
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["A", "Unnamed: 2", "B"]);
        assert_eq!(table.rows[0].cells[1], CellValue::Int(7));
        assert_eq!(table.rows[0].source_line, 4);
    }

    #[test]
    fn test_load_rejects_non_spreadsheet() {
        let file = SourceFile::new("notes.txt", b"just some text".to_vec());
        let err = load_table(&file, &Config::default()).unwrap_err();
        assert!(matches!(err, LoadError::NotASpreadsheet));
    }

    #[test]
    fn test_load_all_names_failing_file() {
        let good = SourceFile::new("good.xlsx", workbook_bytes(&["A"], &[&["1"]]));
        let bad = SourceFile::new("bad.xlsx", b"PK\x03\x04 truncated".to_vec());

        let err = load_all(&[good, bad], &Config::default()).unwrap_err();
        assert_eq!(err.file(), Some("bad.xlsx"));
        assert!(err.to_string().contains("bad.xlsx"));
    }

    #[test]
    fn test_load_missing_sheet() {
        let file = SourceFile::new("a.xlsx", workbook_bytes(&["A"], &[]));
        let config = Config::default().with_sheet_name("Nope".to_string());
        let err = load_table(&file, &config).unwrap_err();
        assert!(matches!(err, LoadError::SheetNotFound(ref name) if name == "Nope"));
    }

    #[test]
    fn test_load_empty_sheet_has_no_header() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        let bytes = workbook.save_to_buffer().unwrap();

        let err = load_table(&SourceFile::new("empty.xlsx", bytes), &Config::default()).unwrap_err();
        assert!(matches!(err, LoadError::NoHeader(_)));
    }
}
