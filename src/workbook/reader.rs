// src/workbook/reader.rs
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::utils::error::WorkbookError;
use crate::workbook::models::{Row, Worksheet};

/// Decodes a workbook (xlsx, xlsm, xlsb, xls or ods) held in memory into
/// one `Worksheet` per sheet, in workbook order.
pub fn read_worksheets(bytes: Vec<u8>) -> Result<Vec<Worksheet>, WorkbookError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet_names = workbook.sheet_names().to_owned();

    let mut worksheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = workbook.worksheet_range(&name)?;
        let rows = range_to_rows(&range);
        tracing::debug!("Read worksheet '{}' ({} rows)", name, rows.len());
        worksheets.push(Worksheet::new(name, rows));
    }

    Ok(worksheets)
}

fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
    range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect()
}

/// Normalizes a cell to text. Empty, error and NaN cells become `""`.
pub(crate) fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(text) => text.trim().to_string(),
        Data::Float(value) if value.is_nan() => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_normalization() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("  Author 1 ".to_string())), "Author 1");
        assert_eq!(cell_to_string(&Data::Float(f64::NAN)), "");
        assert_eq!(cell_to_string(&Data::Float(5000.0)), "5000");
        assert_eq!(cell_to_string(&Data::Int(3)), "3");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }

    #[test]
    fn test_garbage_bytes_are_a_decode_error() {
        let result = read_worksheets(b"definitely not a spreadsheet".to_vec());
        assert!(result.is_err(), "Garbage input should not decode");
    }
}
