use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};

// Keep names well under common filesystem limits
const MAX_FILENAME_BYTES: usize = 200;

/// Replaces characters that are invalid in filenames on common platforms.
///
/// Path separators, Windows-reserved punctuation and control characters become
/// underscores; the result is trimmed of surrounding whitespace, underscores
/// and dots and capped in length. Returns an empty string when nothing usable
/// remains, so callers can pick their own fallback name.
pub fn sanitize_filename(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = replaced
        .trim()
        .trim_matches(|c| c == '_' || c == '.')
        .trim();
    let mut name = trimmed.to_string();
    if name.len() > MAX_FILENAME_BYTES {
        let mut cut = MAX_FILENAME_BYTES;
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        name.truncate(cut);
    }
    name
}

/// Name of the cached JSON index for one listing page.
pub fn index_file_name(page: usize) -> String {
    format!("index_{page:04}_files.json")
}

/// Resolves a save path to an absolute path, applying the Windows
/// extended-length prefix before any filesystem call is made with it.
pub fn absolute_save_path(dir: &Path, file_name: &str) -> AppResult<PathBuf> {
    let joined = dir.join(file_name);
    let absolute = std::path::absolute(&joined)
        .map_err(|e| AppError::IoError(format!("Failed to resolve {}: {e}", joined.display())))?;
    Ok(extended_length(absolute))
}

// Long paths need the \\?\ prefix on Windows
#[cfg(windows)]
fn extended_length(path: PathBuf) -> PathBuf {
    if path.as_os_str().to_string_lossy().starts_with(r"\\?\") {
        path
    } else {
        PathBuf::from(format!(r"\\?\{}", path.display()))
    }
}

#[cfg(not(windows))]
fn extended_length(path: PathBuf) -> PathBuf {
    path
}

/// Extracts the declared filename from a Content-Disposition style header
/// value, e.g. `attachment; filename="report.pdf"`.
pub fn parse_content_disposition_filename(header: &str) -> Option<String> {
    let (_, rest) = header.rsplit_once("filename=")?;
    let value = rest
        .trim()
        .trim_matches(|c| c == '"' || c == ';')
        .trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Reads a newline-separated URL list. Blank lines and `#` comments are
/// ignored; surrounding whitespace is trimmed.
pub fn read_url_list(path: &Path) -> AppResult<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| AppError::IoError(format!("Failed to read {}: {e}", path.display())))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
