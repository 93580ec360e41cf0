// src/extractors/mod.rs
pub mod authors;
pub mod journals;
pub mod rows;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use authors::{extract_author_sheets, AuthorPosition, AuthorTable, SheetAuthors};
#[allow(unused_imports)]
pub use journals::{extract_journal_catalog, JournalCatalog, JournalRecord};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::{load_worksheets, WorkbookSource};

    #[test]
    fn test_missing_workbook_gives_empty_results() {
        let source = WorkbookSource::parse("static/uploads/does-not-exist.xlsx");
        let worksheets = tokio_test::block_on(load_worksheets(&source));

        let sheets = extract_author_sheets(&worksheets);
        let catalog = extract_journal_catalog(&worksheets);

        assert!(sheets.is_empty());
        assert!(catalog.is_empty());
        assert_eq!(serde_json::to_string(&sheets).unwrap(), "[]");
        assert_eq!(serde_json::to_string(&catalog).unwrap(), "{}");
    }
}
