use crate::config::{ApiToken, ResolvedConfig, ResolvedConfigFile};
use crate::downloader::{download_from_urls, sync_all_files};
use crate::errors::{AppError, AppResult};
use crate::utils::read_url_list;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Parses command-line arguments and runs the selected fetcher.
///
/// Three subcommands are available:
/// - `sync`: mirror every file the account knows about, page by page
/// - `urls`: download an explicit list of file URLs from a text file
/// - `toml`: run either fetcher from a TOML configuration file
///
/// The token has already been loaded at startup and is threaded through to
/// the fetchers; it never comes from the environment again after that.
pub async fn cli(token: &ApiToken) -> AppResult<()> {
    let cmd = Command::new("crm-files-cli")
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .subcommand(
            Command::new("sync")
                .about("Mirror every file the account knows about, page by page")
                .after_help(
                    "Page listings are cached as index_NNNN_files.json next to the files;\n\
                     delete an index file to refetch that page on the next run.\n\
                     Example:\n  crm-files-cli sync -d ./pipedrive-files",
                )
                .arg(
                    Arg::new("dir")
                        .short('d')
                        .long("dir")
                        .help("Directory for page indexes and downloaded files")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("base_url")
                        .short('b')
                        .long("base-url")
                        .help("Base URL of the file-storage API")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("page_limit")
                        .short('l')
                        .long("page-limit")
                        .help("Files requested per listing page")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("delay_ms")
                        .long("delay-ms")
                        .help("Pause in milliseconds after every download attempt")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("urls")
                .about("Download an explicit list of file URLs")
                .arg(
                    Arg::new("file")
                        .help("Text file with one URL per line ('#' comments allowed)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("dir")
                        .short('d')
                        .long("dir")
                        .help("Directory for downloaded files")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("delay_ms")
                        .long("delay-ms")
                        .help("Pause in milliseconds after every download attempt")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("toml")
                .about("Run using a TOML configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to the TOML config file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        );

    let mut cmd_for_help = cmd.clone();
    let matches = cmd.get_matches();

    match matches.subcommand() {
        Some(("sync", sub)) => {
            let mut config = ResolvedConfig::default();
            if let Some(dir) = sub.get_one::<String>("dir") {
                config.sync_dir = PathBuf::from(dir);
            }
            if let Some(base_url) = sub.get_one::<String>("base_url") {
                config.base_url = base_url.trim_end_matches('/').to_string();
            }
            if let Some(&page_limit) = sub.get_one::<usize>("page_limit") {
                config.page_limit = page_limit;
            }
            if let Some(&delay_ms) = sub.get_one::<u64>("delay_ms") {
                config.delay_ms = delay_ms;
            }
            if config.page_limit == 0 {
                return Err(AppError::InvalidInput(
                    "Page limit must be greater than 0".into(),
                ));
            }

            run_sync(token, &config).await?;
        }
        Some(("urls", sub)) => {
            let list_path = sub.get_one::<PathBuf>("file").expect("file is required");

            let mut config = ResolvedConfig::default();
            if let Some(dir) = sub.get_one::<String>("dir") {
                config.urls_dir = PathBuf::from(dir);
            }
            if let Some(&delay_ms) = sub.get_one::<u64>("delay_ms") {
                config.delay_ms = delay_ms;
            }

            let urls = read_url_list(list_path)?;
            if urls.is_empty() {
                return Err(AppError::InvalidInput(format!(
                    "No URLs found in {}",
                    list_path.display()
                )));
            }

            run_urls(token, &urls, &config).await?;
        }
        Some(("toml", sub)) => {
            let config_path = sub
                .get_one::<PathBuf>("config")
                .expect("config is required");

            let file_config = ResolvedConfigFile::from_toml_file(config_path)?;
            match file_config.mode.as_str() {
                "sync" => run_sync(token, &file_config.resolved).await?,
                _ => run_urls(token, &file_config.urls, &file_config.resolved).await?,
            }
        }
        _ => {
            cmd_for_help
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

async fn run_sync(token: &ApiToken, config: &ResolvedConfig) -> AppResult<()> {
    info!(
        dir = %config.sync_dir.display(),
        page_limit = config.page_limit,
        "Starting paginated sync"
    );

    let client = reqwest::Client::new();
    let report = sync_all_files(&client, token, config).await?;

    info!(
        pages = report.pages,
        downloaded = report.downloaded,
        skipped_existing = report.skipped_existing,
        skipped_external = report.skipped_external,
        skipped_missing_id = report.skipped_missing_id,
        failed = report.failed,
        "Sync completed"
    );
    Ok(())
}

async fn run_urls(token: &ApiToken, urls: &[String], config: &ResolvedConfig) -> AppResult<()> {
    info!(
        dir = %config.urls_dir.display(),
        urls = urls.len(),
        "Starting URL-list download"
    );

    let client = reqwest::Client::new();
    let report = download_from_urls(&client, token, urls, config).await?;

    info!(
        downloaded = report.downloaded,
        skipped_existing = report.skipped_existing,
        failed = report.failed,
        "Download complete"
    );
    Ok(())
}
