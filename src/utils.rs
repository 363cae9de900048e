// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// MIME type for the upload formats the backend accepts
pub fn content_type_for(filename: &str) -> Option<&'static str> {
    match get_file_extension(filename).as_deref() {
        Some("pdf") => Some(PDF_MIME),
        Some("docx") => Some(DOCX_MIME),
        _ => None,
    }
}

/// File name component of a path, as sent in the multipart part
pub fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .ok_or_else(|| anyhow::anyhow!("Path has no file name: {}", path.display()))
}

/// Read an upload with proper error context
pub async fn read_upload(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Read file content as string with proper error context
pub async fn read_file_content(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Case-folded, trimmed search term
pub fn normalize_search_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Default path for a results export
pub fn export_file_path(base: &Path) -> PathBuf {
    base.join(format!(
        "results_{}.csv",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ))
}
