use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Il file deve essere un PDF. Estensione non valida.")]
    NotAPdf,

    #[error("File troppo grande. Massimo 5MB.")]
    FileTooLarge,

    #[error("Impossibile estrarre testo dal PDF. Verifica che il PDF contenga testo.")]
    NoText,

    #[error("Nessun file caricato: {0}")]
    MissingFile(String),

    #[error("Riassunto vuoto")]
    EmptySummary,

    #[error("Richiesta non valida: {0}")]
    InvalidRequest(String),

    #[error("API key OpenAI non configurata. Imposta OPENAI_API_KEY.")]
    MissingApiKey,

    #[error("Errore nell'elaborazione: {0}")]
    Processing(String),

    #[error("Errore nel download: {0}")]
    Render(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotAPdf
            | ServiceError::FileTooLarge
            | ServiceError::NoText
            | ServiceError::MissingFile(_)
            | ServiceError::EmptySummary
            | ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::MissingApiKey
            | ServiceError::Processing(_)
            | ServiceError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wraps an internal failure from the upload pipeline.
    pub fn processing(err: anyhow::Error) -> Self {
        ServiceError::Processing(format!("{err:#}"))
    }

    pub fn render(err: anyhow::Error) -> Self {
        ServiceError::Render(format!("{err:#}"))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}
