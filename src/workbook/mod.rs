// src/workbook/mod.rs
pub mod client;
pub mod models;
pub mod reader;
#[cfg(test)]
mod test_server;

pub use models::{Worksheet, WorkbookSource};

/// Loads every worksheet of a workbook.
///
/// This is the error boundary for workbook input: a missing workbook yields
/// an empty list, and so does one that cannot be downloaded or decoded
/// (after logging the failure). It never propagates an error to the caller.
pub async fn load_worksheets(source: &WorkbookSource) -> Vec<Worksheet> {
    let bytes = match client::fetch_workbook(source).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            tracing::warn!("Workbook not found: {}", source);
            return Vec::new();
        }
        Err(e) => {
            tracing::error!("Failed to fetch workbook {}: {}", source, e);
            return Vec::new();
        }
    };

    match reader::read_worksheets(bytes) {
        Ok(worksheets) => {
            tracing::info!("Loaded {} worksheet(s) from {}", worksheets.len(), source);
            worksheets
        }
        Err(e) => {
            tracing::error!("Error reading workbook {}: {}", source, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_workbook_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authors.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let worksheets = tokio_test::block_on(load_worksheets(&WorkbookSource::Path(path)));
        assert!(worksheets.is_empty(), "Malformed workbook should load as empty");
    }

    #[test]
    fn test_failed_download_loads_as_empty() {
        let worksheets = tokio_test::block_on(async {
            let url = test_server::serve_once(500, b"internal error").await;
            load_worksheets(&WorkbookSource::Url(url)).await
        });
        assert!(worksheets.is_empty(), "HTTP 500 should load as empty");
    }

    #[test]
    fn test_forbidden_download_loads_as_empty() {
        let worksheets = tokio_test::block_on(async {
            let url = test_server::serve_once(403, b"").await;
            load_worksheets(&WorkbookSource::Url(url)).await
        });
        assert!(worksheets.is_empty(), "HTTP 403 should load as empty");
    }
}
