// src/workbook/models.rs
use std::fmt;
use std::path::PathBuf;

/// One row of a worksheet grid, every cell already normalized to a string
/// (empty cells are `""`).
pub type Row = Vec<String>;

/// A named worksheet as a header-less grid of string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worksheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self { name: name.into(), rows }
    }

    /// Builds a worksheet from string literals.
    #[cfg(test)]
    pub fn from_strs(name: &str, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        Self::new(name, rows)
    }
}

/// Where a workbook is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkbookSource {
    /// A workbook file on local disk (e.g. the admin upload folder).
    Path(PathBuf),
    /// An HTTP(S) export URL, such as a spreadsheet "download as xlsx" link.
    Url(String),
}

impl WorkbookSource {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            WorkbookSource::Url(trimmed.to_string())
        } else {
            WorkbookSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for WorkbookSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkbookSource::Path(path) => write!(f, "{}", path.display()),
            WorkbookSource::Url(url) => write!(f, "{}", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parsing() {
        assert_eq!(
            WorkbookSource::parse("https://example.org/export?format=xlsx"),
            WorkbookSource::Url("https://example.org/export?format=xlsx".to_string())
        );
        assert_eq!(
            WorkbookSource::parse(" HTTP://example.org/a.xlsx "),
            WorkbookSource::Url("HTTP://example.org/a.xlsx".to_string())
        );
        assert_eq!(
            WorkbookSource::parse("static/uploads/journals.xlsx"),
            WorkbookSource::Path(PathBuf::from("static/uploads/journals.xlsx"))
        );
    }

    #[test]
    fn test_from_strs_keeps_shape() {
        let sheet = Worksheet::from_strs("Sheet1", &[&["a", ""], &[]]);
        assert_eq!(sheet.name, "Sheet1");
        assert_eq!(sheet.rows, vec![vec!["a".to_string(), String::new()], vec![]]);
    }
}
