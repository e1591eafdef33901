use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::answer::GenerateError;

/// Errors surfaced by `/chatbot`, rendered as `{"ok": false, "error": ...}`.
///
/// Messages are user-facing and in French, the default language of the
/// persona.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Question vide.")]
    EmptyQuestion,

    #[error("Crédits API insuffisants (insufficient_quota).")]
    QuotaExceeded,

    #[error("Trop de requêtes. Réessaie dans un instant.")]
    RateLimited,

    #[error("Erreur interne.")]
    Internal(#[source] GenerateError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyQuestion => StatusCode::BAD_REQUEST,
            Self::QuotaExceeded | Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GenerateError> for ApiError {
    fn from(e: GenerateError) -> Self {
        match e {
            GenerateError::QuotaExceeded(_) => Self::QuotaExceeded,
            GenerateError::RateLimited(_) => Self::RateLimited,
            other => Self::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match &self {
            ApiError::EmptyQuestion => {
                tracing::debug!(%message, "Client error");
            }
            ApiError::QuotaExceeded | ApiError::RateLimited => {
                tracing::info!(%message, "Model rate limit reached");
            }
            ApiError::Internal(source) => {
                tracing::error!(error = %source, "Server error");
            }
        }

        (status, Json(json!({ "ok": false, "error": message }))).into_response()
    }
}
