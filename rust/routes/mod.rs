use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use reqwest::Client;
use tower_http::cors::CorsLayer;

use crate::{config::AppConfig, extract::MAX_FILE_SIZE};

pub mod download;
pub mod models;
pub mod root;
pub mod upload;

// Leaves room for multipart framing around a maximum-size file, so the
// explicit size check is the one that rejects it.
const MAX_REQUEST_BODY_BYTES: usize = MAX_FILE_SIZE + 1024 * 1024;

/// Immutable state shared by every handler.
pub struct AppState {
    pub config: AppConfig,
    pub http: Client,
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            http: Client::new(),
            upload_dir: std::env::temp_dir(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root::info))
        .route("/upload-pdf", post(upload::upload_pdf))
        .route("/download-summary", post(download::download_summary))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(CorsLayer::very_permissive())
}
