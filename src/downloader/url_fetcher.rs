use crate::config::{ApiToken, ResolvedConfig};
use crate::errors::{AppError, AppResult};
use crate::ui;
use crate::utils::{absolute_save_path, parse_content_disposition_filename, sanitize_filename};
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::Client;
use std::path::Path;
use tokio::fs;
use tokio::time::{sleep, Duration};
use tracing::{info, warn};
use url::Url;

/// Counters for one URL-list run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UrlReport {
    pub downloaded: usize,
    pub skipped_existing: usize,
    pub failed: usize,
}

enum UrlOutcome {
    Downloaded,
    AlreadyExists,
    Failed,
}

/// Downloads an explicit, ordered list of resource URLs.
///
/// There is no page index here; resumability rests entirely on the per-file
/// existence check. Any error while processing a single URL is logged with
/// the offending URL and the loop moves on — one bad entry never aborts the
/// rest of the list.
pub async fn download_from_urls(
    client: &Client,
    token: &ApiToken,
    urls: &[String],
    config: &ResolvedConfig,
) -> AppResult<UrlReport> {
    fs::create_dir_all(&config.urls_dir).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to create directory {}: {e}",
            config.urls_dir.display()
        ))
    })?;

    let mut report = UrlReport::default();
    let pb = ui::create_progress_bar(urls.len() as u64, "URL list")?;

    for url in urls {
        match download_one_url(client, token, url, &config.urls_dir, config.delay_ms).await {
            Ok(UrlOutcome::Downloaded) => report.downloaded += 1,
            Ok(UrlOutcome::AlreadyExists) => report.skipped_existing += 1,
            Ok(UrlOutcome::Failed) => report.failed += 1,
            Err(e) => {
                warn!(url = %url, error = %e, "Error processing URL");
                report.failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message(format!("{} file(s) downloaded", report.downloaded));
    Ok(report)
}

/// Processes a single URL end to end.
///
/// The existence check runs against the provisional `file_{id}` name derived
/// from the URL. When the response declares its own filename, the file is
/// written under that declared name instead, even though the skip check used
/// the provisional one (kept for compatibility with existing mirrors).
async fn download_one_url(
    client: &Client,
    token: &ApiToken,
    raw_url: &str,
    dir: &Path,
    delay_ms: u64,
) -> AppResult<UrlOutcome> {
    let mut url = Url::parse(raw_url)?;
    let provisional = provisional_filename(&url)
        .ok_or_else(|| AppError::UrlError(format!("No file id segment in {raw_url}")))?;

    let provisional_path = absolute_save_path(dir, &provisional)?;
    if provisional_path.exists() {
        info!(file = %provisional, "File already exists, skipping");
        return Ok(UrlOutcome::AlreadyExists);
    }

    url.query_pairs_mut().append_pair("api_token", token.as_str());
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(url = %raw_url, status = status.as_u16(), body = %body, "Error downloading URL");
        sleep(Duration::from_millis(delay_ms)).await;
        return Ok(UrlOutcome::Failed);
    }

    // Prefer the filename the server declares over the URL-derived guess
    let declared_name = response
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_content_disposition_filename)
        .map(|name| sanitize_filename(&name))
        .filter(|name| !name.is_empty());
    let file_name = declared_name.unwrap_or(provisional);
    let file_path = absolute_save_path(dir, &file_name)?;

    let body = response.bytes().await?;
    fs::write(&file_path, &body)
        .await
        .map_err(|e| AppError::IoError(format!("Failed to write {}: {e}", file_path.display())))?;
    info!(file = %file_name, bytes = body.len(), "Downloaded file");

    sleep(Duration::from_millis(delay_ms)).await;
    Ok(UrlOutcome::Downloaded)
}

/// Derives the provisional local name from the second-to-last path segment,
/// which holds the file id on download URLs like `…/files/12782/download`.
fn provisional_filename(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.collect();
    if segments.len() < 2 {
        return None;
    }
    let id = segments[segments.len() - 2];
    let name = sanitize_filename(&format!("file_{id}"));
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
