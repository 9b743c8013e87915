//! Download operations for the CRM file store.
//!
//! Two independent fetchers share the same leaf utilities but never interact:
//! [`sync_all_files`] walks the paginated listing endpoint and mirrors every
//! natively stored file, while [`download_from_urls`] works through an
//! explicit list of resource URLs.

mod page_fetcher;
mod url_fetcher;

// Re-export public API
pub use page_fetcher::{sync_all_files, SyncReport};
pub use url_fetcher::{download_from_urls, UrlReport};
