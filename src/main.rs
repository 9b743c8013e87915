use crm_files_cli::cli;
use crm_files_cli::config::ApiToken;
use crm_files_cli::errors::{self, AppResult};
use tracing_subscriber::EnvFilter;

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Token loading happens before any network or filesystem activity
    let token = ApiToken::from_env()?;

    let rt =
        tokio::runtime::Runtime::new().map_err(|e| errors::AppError::IoError(e.to_string()))?;
    rt.block_on(cli::cli(&token))?;
    Ok(())
}
