use crate::config::{ApiToken, ResolvedConfig};
use crate::errors::{AppError, AppResult};
use crate::models::{FileDescriptor, ListingPage};
use crate::ui;
use crate::utils::{absolute_save_path, index_file_name};
use reqwest::Client;
use tokio::fs;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

/// Counters for one full paginated sync run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Pages that contained at least one descriptor
    pub pages: usize,
    pub downloaded: usize,
    pub skipped_existing: usize,
    pub skipped_external: usize,
    pub skipped_missing_id: usize,
    pub failed: usize,
}

/// Mirrors every natively stored file the account knows about.
///
/// Walks listing pages 0, 1, 2, … until one comes back empty. Each page's
/// descriptor list is persisted as a JSON index before any download from it
/// starts; on re-runs a cached index is loaded instead of re-fetching, and
/// files already on disk are skipped, so an interrupted run resumes cleanly.
///
/// A listing failure ends the whole run (later pages are meaningless without
/// a gap-free index sequence); a single file failing to download is logged
/// and the run continues.
pub async fn sync_all_files(
    client: &Client,
    token: &ApiToken,
    config: &ResolvedConfig,
) -> AppResult<SyncReport> {
    fs::create_dir_all(&config.sync_dir).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to create directory {}: {e}",
            config.sync_dir.display()
        ))
    })?;

    let mut report = SyncReport::default();
    let mut page = 0usize;
    loop {
        let files = load_or_fetch_page(client, token, config, page).await?;
        if files.is_empty() {
            info!(page, "No files found");
            break;
        }
        report.pages += 1;
        download_page_files(client, token, config, page, &files, &mut report).await?;
        page += 1;
    }
    Ok(report)
}

/// Loads one page's descriptor list, preferring the on-disk index cache.
///
/// A fresh fetch persists the index unconditionally on success, even when
/// the page is empty, so the cache stays contiguous from page 0.
async fn load_or_fetch_page(
    client: &Client,
    token: &ApiToken,
    config: &ResolvedConfig,
    page: usize,
) -> AppResult<Vec<FileDescriptor>> {
    let index_path = config.sync_dir.join(index_file_name(page));
    if index_path.exists() {
        debug!(page, path = %index_path.display(), "Loading cached page index");
        let contents = fs::read_to_string(&index_path).await.map_err(|e| {
            AppError::IoError(format!("Failed to read index {}: {e}", index_path.display()))
        })?;
        return serde_json::from_str(&contents).map_err(|e| {
            AppError::ParseError(format!("Invalid index {}: {e}", index_path.display()))
        });
    }

    let start = (page * config.page_limit).to_string();
    let limit = config.page_limit.to_string();
    let response = client
        .get(format!("{}/files", config.base_url))
        .query(&[
            ("api_token", token.as_str()),
            ("start", start.as_str()),
            ("limit", limit.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(page, status = status.as_u16(), body = %body, "Error fetching file list");
        return Err(AppError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    let listing: ListingPage = serde_json::from_str(&response.text().await?)?;
    let files = listing.into_descriptors();

    let pretty = serde_json::to_string_pretty(&files)?;
    fs::write(&index_path, pretty).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to write index {}: {e}",
            index_path.display()
        ))
    })?;
    info!(page, files = files.len(), "Fetched and cached page index");
    Ok(files)
}

/// Downloads every descriptor of one page that is not already on disk.
async fn download_page_files(
    client: &Client,
    token: &ApiToken,
    config: &ResolvedConfig,
    page: usize,
    files: &[FileDescriptor],
    report: &mut SyncReport,
) -> AppResult<()> {
    let pb = ui::create_progress_bar(files.len() as u64, &format!("Page {page:04}"))?;

    for file in files {
        if file.is_externally_linked() {
            debug!(
                page,
                id = file.id,
                location = file.remote_location.as_deref(),
                "Skipping externally linked file"
            );
            report.skipped_external += 1;
            pb.inc(1);
            continue;
        }

        let Some((id, file_name)) = file.id.zip(file.local_filename()) else {
            warn!(page, "Skipping file with missing ID");
            report.skipped_missing_id += 1;
            pb.inc(1);
            continue;
        };

        let file_path = absolute_save_path(&config.sync_dir, &file_name)?;
        if file_path.exists() {
            report.skipped_existing += 1;
            pb.inc(1);
            continue;
        }

        pb.set_message(file_name.clone());
        let result = async {
            let body = fetch_file_body(client, token, config, id).await?;
            fs::write(&file_path, &body).await.map_err(|e| {
                AppError::IoError(format!("Failed to write {}: {e}", file_path.display()))
            })?;
            Ok::<usize, AppError>(body.len())
        }
        .await;

        match result {
            Ok(bytes) => {
                debug!(id, file = %file_name, bytes, "Downloaded file");
                report.downloaded += 1;
            }
            Err(e) => {
                warn!(id, file = %file_name, error = %e, "Error downloading file");
                report.failed += 1;
            }
        }
        sleep(Duration::from_millis(config.delay_ms)).await;
        pb.inc(1);
    }

    pb.finish_with_message(format!("{} file(s) downloaded", report.downloaded));
    Ok(())
}

/// Fetches one file's raw content via the per-file download sub-endpoint.
///
/// The body is fully read before the caller writes anything, so a failed
/// transfer never leaves a partial file behind.
async fn fetch_file_body(
    client: &Client,
    token: &ApiToken,
    config: &ResolvedConfig,
    id: i64,
) -> AppResult<Vec<u8>> {
    let response = client
        .get(format!("{}/files/{id}/download", config.base_url))
        .query(&[("api_token", token.as_str())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.bytes().await?.to_vec())
}
