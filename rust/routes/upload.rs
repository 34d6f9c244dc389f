use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use tracing::{info, warn};

use crate::{
    error::ServiceError,
    extract::{UploadedPdf, extract_text},
    summarize::summarize,
};

use super::{AppState, models::UploadResponse};

const FILE_FIELD: &str = "file";
const PREVIEW_CHARS: usize = 500;

pub async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ServiceError> {
    let result = match multipart {
        Ok(multipart) => handle(&state, multipart).await,
        Err(rejection) => Err(ServiceError::MissingFile(rejection.body_text())),
    };
    result
        .map(Json)
        .inspect_err(|e| warn!(status = %e.status(), error = %e, "upload-pdf failed"))
}

async fn handle(state: &AppState, multipart: Multipart) -> Result<UploadResponse, ServiceError> {
    let upload = read_upload(multipart).await?;
    upload.validate()?;

    info!(
        filename = %upload.filename,
        size = upload.data.len(),
        "received PDF upload"
    );

    let UploadedPdf { filename, data } = upload;
    let text = extract_text(state.upload_dir.clone(), data).await?;
    let text_length = text.chars().count();

    info!(filename = %filename, text_length, "extracted PDF text");

    let summary = summarize(&state.http, &state.config, &text).await?;

    Ok(UploadResponse {
        filename,
        text_length,
        extracted_text: preview(&text, PREVIEW_CHARS),
        summary,
        error: None,
    })
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadedPdf, ServiceError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            // Drain fields we do not use.
            let _ = field.bytes().await;
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?.to_vec();
        return Ok(UploadedPdf { filename, data });
    }

    Err(ServiceError::MissingFile(format!(
        "campo '{FILE_FIELD}' mancante"
    )))
}

fn multipart_error(err: MultipartError) -> ServiceError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServiceError::FileTooLarge
    } else {
        ServiceError::MissingFile(err.body_text())
    }
}

/// The first `max_chars` characters of `text`, with `...` appended only when
/// something was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
