use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_FILENAME: &str = "documento.pdf";

/// Body of a successful `/upload-pdf` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub text_length: usize,
    pub extracted_text: String,
    pub summary: String,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl DownloadRequest {
    pub fn source_filename(&self) -> &str {
        self.filename.as_deref().unwrap_or(DEFAULT_SOURCE_FILENAME)
    }
}
