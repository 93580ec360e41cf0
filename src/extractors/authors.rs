// src/extractors/authors.rs

// --- Imports ---
use crate::extractors::rows::{classify_row, join_cells, lowercase_row, text_len, RowKind, BOILERPLATE_PHRASE};
use crate::workbook::models::{Row, Worksheet};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// --- Constants ---
// Joined text must be longer than this to count as sheet info or a title.
const MIN_TEXT_LEN: usize = 3;

// Column fallbacks when the header row does not name a column.
const DEFAULT_AUTHOR_COL: usize = 0;
const DEFAULT_AMOUNT_COL: usize = 1;
const DEFAULT_STATUS_COL: usize = 2;

// --- Regex Patterns (Lazy Static) ---
static AUTHOR_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)author").expect("Failed to compile AUTHOR_WORD_RE"));

static DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("Failed to compile DIGITS_RE"));

// --- Data Structures ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorPosition {
    pub level: String,  // e.g. "Author 2"
    pub price: String,  // kept as written, e.g. "5k" or "₹ 4500"
    pub status: String, // e.g. "Available"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorTable {
    pub title: String,
    pub authors: Vec<AuthorPosition>,
}

/// Everything extracted from one worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetAuthors {
    pub sheet: String,
    pub info: String,
    pub tables: Vec<AuthorTable>,
}

/// Column indices resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TableColumns {
    author: usize,
    amount: usize,
    status: usize,
}

impl TableColumns {
    fn from_header(lower_row: &[String]) -> Self {
        let find = |matches: &dyn Fn(&str) -> bool, default: usize| {
            lower_row.iter().position(|c| matches(c)).unwrap_or(default)
        };
        Self {
            author: find(&|c: &str| c.contains("position") || c.contains("author"), DEFAULT_AUTHOR_COL),
            amount: find(&|c: &str| c.contains("amount") || c.contains("price"), DEFAULT_AMOUNT_COL),
            status: find(&|c: &str| c.contains("status"), DEFAULT_STATUS_COL),
        }
    }
}

#[derive(Debug)]
struct OpenTable {
    title: String,
    columns: TableColumns,
    authors: Vec<AuthorPosition>,
}

impl OpenTable {
    fn into_table(self) -> AuthorTable {
        AuthorTable { title: self.title, authors: self.authors }
    }

    /// Closing on a blank row or at the end of the grid: tables without a
    /// single author row are dropped.
    fn close(self) -> Option<AuthorTable> {
        if self.authors.is_empty() {
            tracing::debug!("Dropping table '{}' with no author rows", self.title);
            return None;
        }
        Some(self.into_table())
    }
}

/// Scan state for one worksheet.
#[derive(Debug)]
enum ScanState {
    /// No header seen yet; free text accumulates into the sheet info.
    BeforeTable,
    InTable(OpenTable),
    /// A table was closed by a blank row. Sheet info no longer accumulates.
    BetweenTables,
}

/// Accumulated output of a worksheet scan.
struct SheetScan<'a> {
    rows: &'a [Row],
    info: Vec<String>,
    tables: Vec<AuthorTable>,
}

impl<'a> SheetScan<'a> {
    fn new(rows: &'a [Row]) -> Self {
        Self { rows, info: Vec::new(), tables: Vec::new() }
    }

    /// Consumes row `index` and returns the next state.
    fn transition(&mut self, state: ScanState, index: usize) -> ScanState {
        let rows = self.rows;
        let row = &rows[index];
        match (state, classify_row(row)) {
            (state, RowKind::Header) => {
                // A new header closes the open table as is, even with no rows.
                if let ScanState::InTable(open) = state {
                    self.tables.push(open.into_table());
                }
                ScanState::InTable(self.open_table(index))
            }
            (ScanState::BeforeTable, RowKind::Text) => {
                let text = join_cells(row);
                if text_len(&text) > MIN_TEXT_LEN {
                    self.info.push(text);
                }
                ScanState::BeforeTable
            }
            (ScanState::BeforeTable, _) => ScanState::BeforeTable,
            (ScanState::InTable(open), RowKind::Blank) => {
                self.push(open);
                ScanState::BetweenTables
            }
            (ScanState::InTable(mut open), _) => {
                if let Some(position) = read_position(row, &open.columns) {
                    open.authors.push(position);
                }
                ScanState::InTable(open)
            }
            (ScanState::BetweenTables, _) => ScanState::BetweenTables,
        }
    }

    fn open_table(&self, header_index: usize) -> OpenTable {
        let header = &self.rows[header_index];
        let columns = TableColumns::from_header(&lowercase_row(header));
        let title = self.find_title(header_index);
        tracing::trace!("Opened table '{}' at row {} with columns {:?}", title, header_index, columns);
        OpenTable { title, columns, authors: Vec::new() }
    }

    /// Nearest line above the header that is long enough and not boilerplate.
    fn find_title(&self, header_index: usize) -> String {
        self.rows[..header_index]
            .iter()
            .rev()
            .map(|row| join_cells(row))
            .find(|line| text_len(line) > MIN_TEXT_LEN && !line.to_lowercase().contains(BOILERPLATE_PHRASE))
            .unwrap_or_default()
    }

    fn push(&mut self, open: OpenTable) {
        if let Some(table) = open.close() {
            self.tables.push(table);
        }
    }

    fn finish(mut self, state: ScanState, sheet: &str) -> SheetAuthors {
        if let ScanState::InTable(open) = state {
            self.push(open);
        }
        SheetAuthors {
            sheet: sheet.to_string(),
            info: self.info.join("\n"),
            tables: self.tables,
        }
    }
}

fn cell_at(row: &[String], index: usize) -> &str {
    row.get(index).map(|c| c.trim()).unwrap_or("")
}

/// Reads one data row of an open table. `None` when the row carries no
/// author label.
fn read_position(row: &[String], columns: &TableColumns) -> Option<AuthorPosition> {
    // 1. Author label from its column, or from any cell starting with "author"
    let mut author_cell = cell_at(row, columns.author);
    if author_cell.is_empty() {
        author_cell = row
            .iter()
            .map(|c| c.trim())
            .find(|c| c.to_lowercase().starts_with("author"))
            .unwrap_or("");
    }
    // 2. Notes, totals and the like carry no author label
    if !AUTHOR_WORD_RE.is_match(author_cell) {
        return None;
    }

    // 3. Price and status, possibly packed into the status cell
    let (price, status) = split_amount_status(cell_at(row, columns.amount), cell_at(row, columns.status));
    Some(AuthorPosition { level: normalize_level(author_cell), price, status })
}

/// Cleans an author label: colons and hyphens go, whitespace collapses, and
/// a label that lost the word "Author" but has a number becomes "Author N".
pub fn normalize_level(author_cell: &str) -> String {
    let stripped = author_cell
        .replace(|c: char| c == ':' || c == '-', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if !AUTHOR_WORD_RE.is_match(&stripped) {
        if let Some(digits) = DIGITS_RE.find(&stripped) {
            return format!("Author {}", digits.as_str());
        }
    }
    stripped
}

/// Resolves price and status. With no amount cell, the status cell holds
/// both: "2k Available" -> ("2k", "Available").
fn split_amount_status(amount: &str, status: &str) -> (String, String) {
    if !amount.is_empty() {
        return (amount.to_string(), status.to_string());
    }
    let mut tokens = status.split_whitespace();
    let price = tokens.next().unwrap_or("").to_string();
    let rest = tokens.collect::<Vec<_>>().join(" ");
    (price, rest)
}

/// Extracts sheet info and author-position tables from one worksheet.
pub fn extract_sheet(worksheet: &Worksheet) -> SheetAuthors {
    let mut scan = SheetScan::new(&worksheet.rows);
    let mut state = ScanState::BeforeTable;
    for index in 0..worksheet.rows.len() {
        state = scan.transition(state, index);
    }
    let sheet = scan.finish(state, &worksheet.name);
    tracing::debug!("Sheet '{}': {} table(s), {} info chars", sheet.sheet, sheet.tables.len(), sheet.info.len());
    sheet
}

/// Extracts every worksheet, keeping workbook order.
pub fn extract_author_sheets(worksheets: &[Worksheet]) -> Vec<SheetAuthors> {
    worksheets.iter().map(extract_sheet).collect()
}
