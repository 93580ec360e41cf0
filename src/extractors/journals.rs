// src/extractors/journals.rs

// --- Imports ---
use crate::extractors::rows::join_cells;
use crate::workbook::models::Worksheet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// --- Constants ---
// Stand-ins when a block has no link or no price line
const LINK_PLACEHOLDER: &str = "#";
const PRICE_MISSING: &str = "N/A";

// --- Regex Patterns (Lazy Static) ---
// "3k", "12L": thousand / lakh shorthand right after the digits.
static PRICE_SHORTHAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+[kKlL]").expect("Failed to compile PRICE_SHORTHAND_RE"));

// --- Data Structures ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub link: String,         // Journal homepage, or "#"
    pub details: Vec<String>, // Every line after the first
    pub price: String,        // Last price-like line, or "N/A"
}

/// Journal records per worksheet. Serializes as a JSON object keyed by
/// sheet name, in workbook order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalCatalog {
    sheets: Vec<(String, Vec<JournalRecord>)>,
}

impl JournalCatalog {
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[JournalRecord])> {
        self.sheets.iter().map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Later sheets with a repeated name replace the earlier entry.
    fn insert(&mut self, sheet: String, records: Vec<JournalRecord>) {
        match self.sheets.iter_mut().find(|(name, _)| *name == sheet) {
            Some(entry) => entry.1 = records,
            None => self.sheets.push((sheet, records)),
        }
    }
}

// Hand-written so the sheets serialize as an object, not a list of pairs
impl Serialize for JournalCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sheets.len()))?;
        for (name, records) in &self.sheets {
            map.serialize_entry(name, records)?;
        }
        map.end()
    }
}

// --- Block Parsing ---

/// Splits a worksheet into blank-row delimited blocks and parses each one.
pub fn parse_journal_sheet(worksheet: &Worksheet) -> Vec<JournalRecord> {
    let mut journals = Vec::new();
    let mut block: Vec<String> = Vec::new();

    for row in &worksheet.rows {
        // 1. Collapse the row into one line of text
        let line = join_cells(row);

        // 2. A blank line closes the current block
        if line.is_empty() {
            if !block.is_empty() {
                journals.push(parse_journal_block(&block));
                block.clear();
            }
            continue;
        }

        // 3. Anything else extends it
        block.push(line);
    }

    // 4. Flush the block still open at the end of the sheet
    if !block.is_empty() {
        journals.push(parse_journal_block(&block));
    }

    tracing::debug!("Sheet '{}': {} journal block(s)", worksheet.name, journals.len());
    journals
}

/// Parses one block of lines:
/// link on the first line, the last price-like line, everything after the
/// first line as details.
pub fn parse_journal_block(block: &[String]) -> JournalRecord {
    // 1. Link: only when the block opens with a URL
    let link = match block.first() {
        Some(first) if first.starts_with("http") => first.clone(),
        _ => LINK_PLACEHOLDER.to_string(),
    };

    // 2. Price: scan from the end, first hit wins
    // TODO: confirm with the journal sheet owners that the last price line is the authoritative one.
    let price = block
        .iter()
        .rev()
        .find(|line| is_price_line(line))
        .cloned()
        .unwrap_or_else(|| PRICE_MISSING.to_string());

    // 3. Details: everything after the first line
    let details = block.iter().skip(1).cloned().collect();

    JournalRecord { link, details, price }
}

fn is_price_line(line: &str) -> bool {
    line.to_lowercase().contains("price") || PRICE_SHORTHAND_RE.is_match(line)
}

/// Parses every worksheet into a catalog keyed by sheet name.
pub fn extract_journal_catalog(worksheets: &[Worksheet]) -> JournalCatalog {
    let mut catalog = JournalCatalog::default();
    for worksheet in worksheets {
        catalog.insert(worksheet.name.clone(), parse_journal_sheet(worksheet));
    }
    catalog
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_blank_rows_delimit_blocks() {
        let sheet = Worksheet::from_strs(
            "Scopus",
            &[&["https://journal.example/a", ""], &["", "Journal A"], &["", ""], &["Lonely line"]],
        );
        let records = parse_journal_sheet(&sheet);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].link, "https://journal.example/a");
        assert_eq!(records[0].details, lines(&["Journal A"]));
        assert_eq!(records[1].link, "#");
        assert!(records[1].details.is_empty());
        assert_eq!(records[1].price, "N/A");
    }

    #[test]
    fn test_consecutive_blank_rows_do_not_make_empty_records() {
        let sheet = Worksheet::from_strs("S", &[&[""], &["A journal"], &[""], &["", ""], &[""], &["B journal"], &[""]]);
        assert_eq!(parse_journal_sheet(&sheet).len(), 2);
    }

    #[test]
    fn test_last_price_line_wins() {
        let block = lines(&[
            "https://journal.example/b",
            "Journal of Applied Things",
            "Price: 3.5k (old)",
            "ISSN 1234-5678",
            "Publication price 4k",
            "Indexed in Scopus",
        ]);
        let record = parse_journal_block(&block);

        assert_eq!(record.price, "Publication price 4k");
        assert_eq!(record.details.len(), 5);
    }

    #[test]
    fn test_price_shorthand_needs_adjacent_suffix() {
        assert_eq!(parse_journal_block(&lines(&["Journal", "Charges 12L"])).price, "Charges 12L");
        assert_eq!(parse_journal_block(&lines(&["Journal", "Fee 25K total"])).price, "Fee 25K total");
        assert_eq!(parse_journal_block(&lines(&["Journal", "Volume 12 lists"])).price, "N/A");
    }

    #[test]
    fn test_first_line_is_kept_out_of_details() {
        let record = parse_journal_block(&lines(&["Journal of X", "PRICE on request"]));
        assert_eq!(record.link, "#");
        assert_eq!(record.details, lines(&["PRICE on request"]));
        assert_eq!(record.price, "PRICE on request");
    }

    #[test]
    fn test_catalog_serializes_as_ordered_map() {
        let sheets = vec![
            Worksheet::from_strs("Zeta", &[&["https://z.example"]]),
            Worksheet::from_strs("Alpha", &[]),
        ];
        let catalog = extract_journal_catalog(&sheets);

        assert_eq!(catalog.len(), 2);
        let names: Vec<&str> = catalog.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(json, r##"{"Zeta":[{"link":"https://z.example","details":[],"price":"N/A"}],"Alpha":[]}"##);
    }
}
