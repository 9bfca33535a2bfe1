// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

/// True when the name ends in ".pdf", ignoring case
pub fn is_pdf_filename(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

/// File size in whole kilobytes, rounded half up
pub fn format_size_kb(bytes: u64) -> u64 {
    (bytes as f64 / 1024.0).round() as u64
}

/// Strip trailing slashes so endpoint paths can be appended directly
pub fn normalize_api_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Write file content, creating parent directories first
pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
