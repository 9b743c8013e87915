// Remote API defaults (Pipedrive-style v1 file storage)
pub const DEFAULT_BASE_URL: &str = "https://api.pipedrive.com/v1";

// Default save directories
pub const DEFAULT_SYNC_DIR: &str = "./pipedrive-files";
pub const DEFAULT_URLS_DIR: &str = "./downloaded-files";

// Max files per page per API docs
pub const DEFAULT_PAGE_LIMIT: usize = 100;

// Pause after each download attempt to stay under the rate limit
pub const DEFAULT_DELAY_MS: u64 = 100;

// Environment variable holding the API token
pub const TOKEN_ENV_VAR: &str = "API_TOKEN";

// Name used when a descriptor carries no usable name
pub const FALLBACK_FILE_NAME: &str = "unnamed_file";

// remote_location values whose content lives in a third-party service and
// cannot be fetched through the native download endpoint
pub const EXTERNAL_REMOTE_LOCATIONS: &[&str] = &["googledocs"];
