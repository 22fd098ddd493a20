//! Append-only output file for available domains

use std::path::Path;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::{DomainScoutError, Result};

/// Append domains to `path`, one per line, creating the file if needed.
///
/// Existing content is never truncated, so repeated runs accumulate.
pub async fn append_available(path: &Path, domains: &[String]) -> Result<()> {
    if domains.is_empty() {
        return Ok(());
    }

    let path_info = || Some(path.to_string_lossy().to_string());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DomainScoutError::io(e.to_string(), Some(parent.to_string_lossy().to_string())))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| DomainScoutError::io(e.to_string(), path_info()))?;

    let mut body = domains.join("\n");
    body.push('\n');

    file.write_all(body.as_bytes())
        .await
        .map_err(|e| DomainScoutError::io(e.to_string(), path_info()))?;
    file.flush()
        .await
        .map_err(|e| DomainScoutError::io(e.to_string(), path_info()))?;

    tracing::debug!(path = %path.display(), count = domains.len(), "Appended available domains");
    Ok(())
}
