// src/storage/records.rs
use serde::{Deserialize, Serialize};

use crate::extractors::SheetAuthors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRecord {
    pub id: u32,
    pub name: String,
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    pub id: u32,
    pub sheet_id: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub id: u32,
    pub table_id: u32,
    pub level: String,
    pub amount: String,
    pub status: String,
}

/// Relational form of the extracted author sheets: three flat record lists
/// linked by ids. Ids start at 1 and follow source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSnapshot {
    pub sheets: Vec<SheetRecord>,
    pub tables: Vec<TableRecord>,
    pub positions: Vec<PositionRecord>,
}

impl AuthorSnapshot {
    pub fn from_sheets(sheets: &[SheetAuthors]) -> Self {
        let mut snapshot = Self::default();

        for sheet in sheets {
            let sheet_id = next_id(snapshot.sheets.len());
            snapshot.sheets.push(SheetRecord {
                id: sheet_id,
                name: sheet.sheet.clone(),
                info: sheet.info.clone(),
            });

            for table in &sheet.tables {
                let table_id = next_id(snapshot.tables.len());
                snapshot.tables.push(TableRecord {
                    id: table_id,
                    sheet_id,
                    title: table.title.clone(),
                });

                for author in &table.authors {
                    snapshot.positions.push(PositionRecord {
                        id: next_id(snapshot.positions.len()),
                        table_id,
                        level: author.level.clone(),
                        amount: author.price.clone(),
                        status: author.status.clone(),
                    });
                }
            }
        }

        snapshot
    }
}

fn next_id(current_len: usize) -> u32 {
    u32::try_from(current_len + 1).unwrap_or(u32::MAX)
}
