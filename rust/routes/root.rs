use axum::Json;
use serde_json::{Value, json};

pub const INFO_MESSAGE: &str = "PDF Summarizer API - Upload PDF at /upload-pdf";

pub async fn info() -> Json<Value> {
    Json(json!({ "message": INFO_MESSAGE }))
}
