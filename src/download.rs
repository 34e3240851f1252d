//! Writing downloaded media to disk

use crate::error::{Result, ResultExt};
use std::path::Path;
use tracing::info;
use url::Url;

/// Write `bytes` to `path`, creating parent directories
pub async fn save(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Blocking [`save`]
pub fn save_blocking(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Lowercased file extension of the last path segment of `url`
pub fn extension_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.next_back()?;
    let (_, extension) = segment.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();
    if extension.is_empty() || extension.len() > 5 || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(extension)
}
