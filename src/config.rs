use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_DELAY_MS, DEFAULT_PAGE_LIMIT, DEFAULT_SYNC_DIR, DEFAULT_URLS_DIR,
    TOKEN_ENV_VAR,
};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// The API token, loaded once at startup and threaded through the fetchers.
///
/// `Debug` redacts the secret so it can never leak through logging.
#[derive(Clone)]
pub struct ApiToken(String);

impl ApiToken {
    /// Loads the token from the environment, honoring a `.env` file in the
    /// working directory. Runs before any network or filesystem activity;
    /// an absent or blank token is a fatal startup error.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        match std::env::var(TOKEN_ENV_VAR) {
            Ok(token) if !token.trim().is_empty() => Ok(Self(token.trim().to_string())),
            _ => Err(AppError::MissingToken),
        }
    }

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// Resolved configuration with all values filled in (no Options).
///
/// Defaults mirror the documented constants, so a bare `sync` or `urls` run
/// behaves like the stock tool. All fields have concrete values, making it
/// safe to access directly without unwrapping.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Base URL of the file-storage API (listing and download endpoints)
    pub base_url: String,
    /// Directory for page indexes and files downloaded by `sync`
    pub sync_dir: PathBuf,
    /// Directory for files downloaded by `urls`
    pub urls_dir: PathBuf,
    /// Files requested per listing page
    pub page_limit: usize,
    /// Pause in milliseconds after every download attempt
    pub delay_ms: u64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sync_dir: PathBuf::from(DEFAULT_SYNC_DIR),
            urls_dir: PathBuf::from(DEFAULT_URLS_DIR),
            page_limit: DEFAULT_PAGE_LIMIT,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

/// Configuration that can be loaded from a TOML file.
///
/// Deserializes the required `mode` field plus optional overrides. Unknown
/// keys end up in the flattened [`ResolvedConfig`], which rejects them to
/// catch typos; `page_limit` must be greater than 0.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolvedConfigFile {
    /// Which fetcher to run: `"sync"` or `"urls"`
    pub mode: String,
    /// URL list for `urls` mode
    #[serde(default)]
    pub urls: Vec<String>,
    /// Flattened resolved configuration with the documented defaults
    #[serde(flatten)]
    pub resolved: ResolvedConfig,
}

impl ResolvedConfigFile {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the TOML is malformed, unknown keys are
    /// present, the mode is not recognized, `page_limit` is 0, or `urls`
    /// mode has an empty URL list.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfigFile = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        match config.mode.as_str() {
            "sync" | "urls" => {}
            other => {
                return Err(AppError::InvalidInput(format!(
                    "Unknown mode '{other}' (expected 'sync' or 'urls')"
                )));
            }
        }
        if config.resolved.page_limit == 0 {
            return Err(AppError::InvalidInput(
                "Page limit must be greater than 0".into(),
            ));
        }
        if config.mode == "urls" && config.urls.is_empty() {
            return Err(AppError::InvalidInput(
                "'urls' mode requires a non-empty urls list".into(),
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_values() {
        let config = ResolvedConfig::default();
        assert_eq!(config.base_url, "https://api.pipedrive.com/v1");
        assert_eq!(config.sync_dir, PathBuf::from("./pipedrive-files"));
        assert_eq!(config.urls_dir, PathBuf::from("./downloaded-files"));
        assert_eq!(config.page_limit, 100);
        assert_eq!(config.delay_ms, 100);
    }

    #[test]
    fn minimal_toml_is_parsed_and_defaults_apply() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            mode = "sync"
            "#,
        )
        .unwrap();

        let config = ResolvedConfigFile::from_toml_file(tmp.path()).unwrap();
        assert_eq!(config.mode, "sync");
        assert!(config.urls.is_empty());
        assert_eq!(config.resolved.page_limit, 100);
        assert_eq!(config.resolved.delay_ms, 100);
    }

    #[test]
    fn toml_overrides_are_applied() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            mode = "urls"
            urls = ["https://a.example/files/1/download"]
            urls_dir = "exports"
            delay_ms = 250
            "#,
        )
        .unwrap();

        let config = ResolvedConfigFile::from_toml_file(tmp.path()).unwrap();
        assert_eq!(config.urls.len(), 1);
        assert_eq!(config.resolved.urls_dir, PathBuf::from("exports"));
        assert_eq!(config.resolved.delay_ms, 250);
    }

    #[test]
    fn unknown_mode_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            mode = "mirror"
            "#,
        )
        .unwrap();

        assert!(ResolvedConfigFile::from_toml_file(tmp.path()).is_err());
    }

    #[test]
    fn zero_page_limit_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            mode = "sync"
            page_limit = 0
            "#,
        )
        .unwrap();

        assert!(ResolvedConfigFile::from_toml_file(tmp.path()).is_err());
    }

    #[test]
    fn urls_mode_without_urls_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            mode = "urls"
            "#,
        )
        .unwrap();

        assert!(ResolvedConfigFile::from_toml_file(tmp.path()).is_err());
    }

    #[test]
    fn unknown_key_errors() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            mode = "sync"
            extra_flag = true
            "#,
        )
        .unwrap();

        assert!(ResolvedConfigFile::from_toml_file(tmp.path()).is_err());
    }

    #[test]
    fn api_token_debug_is_redacted() {
        let token = ApiToken::new("super-secret");
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
        assert_eq!(token.as_str(), "super-secret");
    }
}
