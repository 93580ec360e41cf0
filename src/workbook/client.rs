// src/workbook/client.rs
use crate::utils::error::WorkbookError;
use crate::workbook::models::WorkbookSource;
use reqwest::header;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

const WORKBOOK_USER_AGENT: &str = concat!("sheet_extractor/", env!("CARGO_PKG_VERSION"));
const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Creates a reqwest client for workbook downloads.
fn build_download_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(WORKBOOK_USER_AGENT)
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .build()
}

/// Fetches the raw workbook bytes.
/// `Ok(None)` means the workbook does not exist (missing file, HTTP 404);
/// that is an expected condition, not an error.
pub async fn fetch_workbook(source: &WorkbookSource) -> Result<Option<Vec<u8>>, WorkbookError> {
    match source {
        WorkbookSource::Path(path) => read_workbook_file(path).await,
        WorkbookSource::Url(url) => download_workbook(url).await,
    }
}

async fn read_workbook_file(path: &Path) -> Result<Option<Vec<u8>>, WorkbookError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
            Ok(Some(bytes))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(WorkbookError::Io(e)),
    }
}

/// Downloads a workbook export from its URL.
pub async fn download_workbook(url: &str) -> Result<Option<Vec<u8>>, WorkbookError> {
    let client = build_download_client()?;
    download_with(&client, url).await
}

async fn download_with(client: &reqwest::Client, url: &str) -> Result<Option<Vec<u8>>, WorkbookError> {
    tracing::info!("Downloading workbook from: {}", url);

    let response = client
        .get(url)
        .header(header::ACCEPT, "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet,application/octet-stream,*/*")
        .send()
        .await?; // Propagates reqwest::Error as WorkbookError::Network

    // Check if the request was successful (status code 2xx)
    let status = response.status();
    if !status.is_success() {
        // A missing export is the same as a missing file
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::warn!("Received 404 Not Found for URL: {}", url);
            return Ok(None);
        }
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        // Private sheets answer 401/403 instead of the file
        if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!("Workbook export is not shared publicly - check the link permissions.");
            return Err(WorkbookError::Forbidden(url.to_string()));
        }
        // Return generic HTTP error
        return Err(WorkbookError::Http(status));
    }

    // Read the whole body as raw bytes
    let body = response.bytes().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(Some(body.to_vec()))
}
