// src/extractors/rows.rs
//! Row-level heuristics shared by the extractors.
//!
//! The rules are plain case-insensitive substring checks over hand-edited
//! sheets. Each rule is a named predicate; `classify_row` is the only place
//! they are combined.

use once_cell::sync::Lazy;
use regex::Regex;

pub const BOILERPLATE_PHRASE: &str = "author position";

/// A cell that starts with the word "Author", leading whitespace tolerated.
static AUTHOR_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*Author\b").expect("Failed to compile AUTHOR_LABEL_RE"));

/// How a single row is treated by the author table scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Every cell is empty.
    Blank,
    /// Column header of an author-position table.
    Header,
    /// Carries an "Author ..." label, i.e. looks like table data.
    AuthorLabel,
    /// Repeated "Author position available" banner text.
    Boilerplate,
    /// Anything else: free text.
    Text,
}

impl RowKind {
    pub fn label(self) -> &'static str {
        match self {
            RowKind::Blank => "blank",
            RowKind::Header => "header",
            RowKind::AuthorLabel => "author",
            RowKind::Boilerplate => "boilerplate",
            RowKind::Text => "text",
        }
    }
}

/// Lowercased copy of a row, used for every keyword check.
pub fn lowercase_row(row: &[String]) -> Vec<String> {
    row.iter().map(|cell| cell.to_lowercase()).collect()
}

/// Header rows name a position column, an amount/price column and a status
/// column, in any order.
pub fn is_header_row(lower_row: &[String]) -> bool {
    lower_row.iter().any(|c| c.contains("position"))
        && lower_row.iter().any(|c| c.contains("amount") || c.contains("price"))
        && lower_row.iter().any(|c| c.contains("status"))
}

pub fn is_boilerplate_row(lower_row: &[String]) -> bool {
    lower_row.iter().any(|c| c.contains(BOILERPLATE_PHRASE))
}

pub fn is_author_label_row(row: &[String]) -> bool {
    row.iter().any(|c| !c.is_empty() && AUTHOR_LABEL_RE.is_match(c))
}

pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

/// Single dispatch point for the row predicates. Precedence: blank, header,
/// author label, boilerplate, text.
pub fn classify_row(row: &[String]) -> RowKind {
    if is_blank_row(row) {
        return RowKind::Blank;
    }
    let lower_row = lowercase_row(row);
    if is_header_row(&lower_row) {
        RowKind::Header
    } else if is_author_label_row(row) {
        RowKind::AuthorLabel
    } else if is_boilerplate_row(&lower_row) {
        RowKind::Boilerplate
    } else {
        RowKind::Text
    }
}

/// Joins the non-empty cells of a row with single spaces.
pub fn join_cells(row: &[String]) -> String {
    row.iter()
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text length as the number of characters, not bytes.
pub fn text_len(text: &str) -> usize {
    text.chars().count()
}
