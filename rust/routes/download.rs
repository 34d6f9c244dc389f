use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::{error::ServiceError, report::render_summary_pdf};

use super::models::DownloadRequest;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const ATTACHMENT_DISPOSITION: &str = "attachment; filename=riassunto.pdf";

pub async fn download_summary(
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let Json(request) = payload
        .map_err(|rejection| ServiceError::InvalidRequest(rejection.body_text()))
        .inspect_err(|e| warn!(error = %e, "download-summary rejected the request body"))?;

    let summary = request.summary.as_deref().unwrap_or_default();
    if summary.is_empty() {
        warn!("download-summary rejected an empty summary");
        return Err(ServiceError::EmptySummary);
    }

    let pdf = render_summary_pdf(summary, request.source_filename())
        .map_err(ServiceError::render)
        .inspect_err(|e| warn!(error = %e, "download-summary failed"))?;

    info!(
        source = %request.source_filename(),
        size = pdf.len(),
        "rendered summary PDF"
    );

    Ok((
        [
            (CONTENT_TYPE, PDF_CONTENT_TYPE),
            (CONTENT_DISPOSITION, ATTACHMENT_DISPOSITION),
        ],
        pdf,
    )
        .into_response())
}
