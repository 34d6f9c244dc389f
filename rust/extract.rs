use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use gag::Gag;
use pdf_extract::extract_text_by_pages;
use tempfile::Builder;
use tracing::debug;

use crate::error::ServiceError;

pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;
const PDF_SUFFIX: &str = ".pdf";

/// A PDF received from a client, kept in memory for the duration of one request.
#[derive(Debug)]
pub struct UploadedPdf {
    pub filename: String,
    pub data: Vec<u8>,
}

impl UploadedPdf {
    /// Checks the declared extension and the size ceiling.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if !self.filename.ends_with(PDF_SUFFIX) {
            return Err(ServiceError::NotAPdf);
        }
        if self.data.len() > MAX_FILE_SIZE {
            return Err(ServiceError::FileTooLarge);
        }
        Ok(())
    }
}

/// Extracts the trimmed text of a PDF, staging the bytes in a temporary file
/// under `dir`. The file is removed before this returns, whatever the outcome.
pub async fn extract_text(dir: PathBuf, data: Vec<u8>) -> Result<String, ServiceError> {
    let pages = tokio::task::spawn_blocking(move || extract_pages_in(&dir, &data))
        .await
        .map_err(|e| ServiceError::processing(anyhow!("PDF parser aborted: {e}")))?
        .map_err(ServiceError::processing)?;

    debug!(page_count = pages.len(), "extracted PDF pages");

    let text = join_pages(&pages);
    if text.is_empty() {
        return Err(ServiceError::NoText);
    }
    Ok(text)
}

fn extract_pages_in(dir: &Path, data: &[u8]) -> Result<Vec<String>> {
    let mut staged = Builder::new()
        .prefix("upload-")
        .suffix(PDF_SUFFIX)
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    staged
        .write_all(data)
        .and_then(|_| staged.flush())
        .context("Failed to write temporary PDF")?;

    extract_pages_quiet(staged.path())
}

fn extract_pages_quiet(path: &Path) -> Result<Vec<String>> {
    // Suppress noisy stdout from the pdf-extract parser.
    let _gag_out = Gag::stdout().ok();
    extract_text_by_pages(path).map_err(|e| anyhow!("{e}"))
}

fn join_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text.trim().to_string()
}
