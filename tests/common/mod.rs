//! Common test utilities for integration tests

use crm_files_cli::config::ResolvedConfig;
use serde_json::{json, Value};
use std::path::Path;

#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-token";

/// Config pointing both fetchers at a mock server and a temp directory,
/// with the rate-limit delay disabled.
#[allow(dead_code)]
pub fn test_config(base_url: &str, dir: &Path, page_limit: usize) -> ResolvedConfig {
    ResolvedConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        sync_dir: dir.to_path_buf(),
        urls_dir: dir.to_path_buf(),
        page_limit,
        delay_ms: 0,
    }
}

/// One listing entry in the shape the file-storage API returns.
#[allow(dead_code)]
pub fn file_entry(id: Value, name: Value, deal_id: Value, remote_location: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "deal_id": deal_id,
        "remote_location": remote_location,
    })
}

/// Full listing response body for one page.
#[allow(dead_code)]
pub fn listing_body(files: Vec<Value>) -> Value {
    json!({ "success": true, "data": files })
}
