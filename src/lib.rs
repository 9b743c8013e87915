//! crm-files-cli library
//!
//! This crate provides the core functionality for the `crm-files-cli` binary.
//! Keep the crate root minimal — implementation and tests live in their modules.
//!
//! ## Overview
//!
//! The library is organized into modules that handle different aspects of
//! mirroring a CRM account's file store to local disk:
//!
//! - [`downloader`] - The two fetchers: a paginated sync with on-disk JSON
//!   page indexes, and an explicit URL-list download
//! - [`cli`] - Command-line interface dispatching to the fetchers
//! - [`config`] - Token loading and resolved run configuration
//! - [`models`] - File descriptors and listing-page wire shapes
//! - [`errors`] - Error types used throughout the application
//! - [`utils`] - Filename sanitizing, path and header helpers
//!
//! ## Example Usage
//!
//! ```no_run
//! use crm_files_cli::config::{ApiToken, ResolvedConfig};
//! use crm_files_cli::downloader::sync_all_files;
//! use crm_files_cli::errors::AppResult;
//!
//! # async fn example() -> AppResult<()> {
//! let token = ApiToken::from_env()?;
//! let config = ResolvedConfig::default();
//! let client = reqwest::Client::new();
//!
//! let report = sync_all_files(&client, &token, &config).await?;
//! println!("{} file(s) downloaded", report.downloaded);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;
