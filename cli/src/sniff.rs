use crate::transport::LocalFile;
use anyhow::{Context, Result};
use std::path::Path;

pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// MIME type from the file's magic bytes, the way a browser would report it
/// for images.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(format) => format.to_mime_type(),
        Err(_) => UNKNOWN_MIME,
    }
}

/// Reads `path` into memory. `mime` overrides sniffing.
pub async fn load_file(path: &Path, mime: Option<&str>) -> Result<LocalFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))?;
    let mime = mime
        .map(str::to_string)
        .unwrap_or_else(|| sniff_mime(&bytes).to_string());

    log::info!("Loaded {} ({} bytes, {})", name, bytes.len(), mime);
    Ok(LocalFile { name, mime, bytes })
}
