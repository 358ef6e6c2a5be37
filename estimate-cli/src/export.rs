use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info};

/// Shown when the quote file could not be written; details go to the log.
pub const EXPORT_FAILED_NOTICE: &str =
    "The quote file could not be saved. Please unlock the quote again to retry.";

/// `Quote_<phone>.txt` in the working directory.
pub fn default_export_path(phone: &str) -> PathBuf {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    PathBuf::from(format!("Quote_{digits}.txt"))
}

pub fn write_quote(
    path: &Path,
    report: &str,
) -> Result<()> {
    std::fs::write(path, report)
        .with_context(|| format!("Failed to write quote file '{}'", path.display()))?;
    info!(path = %path.display(), "exported quote");
    Ok(())
}

/// Writes the quote and returns the line to show the user. Failure never
/// aborts the quote flow.
pub fn export_or_notify(
    path: &Path,
    report: &str,
) -> String {
    match write_quote(path, report) {
        Ok(()) => format!("Quote saved to {}", path.display()),
        Err(error) => {
            error!(error = format!("{error:#}"), "quote export failed");
            EXPORT_FAILED_NOTICE.to_string()
        }
    }
}
