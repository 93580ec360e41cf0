// src/storage/mod.rs
pub mod records;

use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::JournalCatalog;
use crate::utils::error::StorageError;
use crate::workbook::WorkbookSource;

pub use records::AuthorSnapshot;

const AUTHOR_SNAPSHOT_FILE: &str = "authors.json";
const AUTHOR_METADATA_FILE: &str = "authors_meta.json";
const JOURNAL_CATALOG_FILE: &str = "journals.json";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Replaces the stored author snapshot as a whole. Nothing is merged
    /// with the previous snapshot.
    pub fn replace_author_snapshot(&self, snapshot: &AuthorSnapshot) -> Result<PathBuf, StorageError> {
        let path = self.write_json(AUTHOR_SNAPSHOT_FILE, snapshot)?;
        tracing::info!(
            "Replaced author snapshot at {} ({} sheets, {} tables, {} positions)",
            path.display(),
            snapshot.sheets.len(),
            snapshot.tables.len(),
            snapshot.positions.len()
        );
        Ok(path)
    }

    /// Saves metadata about the last snapshot in JSON format
    pub fn save_snapshot_metadata(&self, snapshot: &AuthorSnapshot, source: &WorkbookSource) -> Result<PathBuf, StorageError> {
        let metadata = serde_json::json!({
            "source": source.to_string(),
            "sheet_count": snapshot.sheets.len(),
            "table_count": snapshot.tables.len(),
            "position_count": snapshot.positions.len(),
            "migrated_at": chrono::Utc::now().to_rfc3339(),
        });

        let path = self.write_json(AUTHOR_METADATA_FILE, &metadata)?;
        tracing::info!("Saved metadata to {}", path.display());
        Ok(path)
    }

    pub fn save_journal_catalog(&self, catalog: &JournalCatalog) -> Result<PathBuf, StorageError> {
        let path = self.write_json(JOURNAL_CATALOG_FILE, catalog)?;
        tracing::info!("Saved journal catalog ({} sheets) to {}", catalog.len(), path.display());
        Ok(path)
    }

    /// Writes through a sibling temp file and renames it into place, so a
    /// reader never sees a half-written file.
    fn write_json<T: serde::Serialize + ?Sized>(&self, filename: &str, value: &T) -> Result<PathBuf, StorageError> {
        let contents = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let file_path = self.base_dir.join(filename);
        let tmp_path = self.base_dir.join(format!(".{}.tmp", filename));

        fs::write(&tmp_path, contents)
            .map_err(StorageError::IoError)?;
        fs::rename(&tmp_path, &file_path)
            .map_err(StorageError::IoError)?;

        Ok(file_path)
    }
}
