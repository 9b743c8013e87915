use crate::errors::{AppError, AppResult};
use indicatif::{ProgressBar, ProgressStyle};

/// Creates a progress bar with the standard application styling.
///
/// The `label` appears as the bar's prefix and names the unit of work being
/// tracked, e.g. `Page 0003` during a paginated sync or `URL list` for the
/// explicit-URL fetcher.
///
/// # Errors
///
/// Returns an error if the progress bar template fails to compile.
pub fn create_progress_bar(total: u64, label: &str) -> AppResult<ProgressBar> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} {prefix:.bold} [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
            )
            .map_err(|e| AppError::IoError(format!("Failed to create progress bar template: {e}")))?
            .progress_chars("#>-"),
    );
    pb.set_prefix(label.to_string());
    Ok(pb)
}
