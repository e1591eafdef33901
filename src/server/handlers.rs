use axum::{body::Bytes, extract::State, response::Html, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{error::ApiError, AppState};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub ok: bool,
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub document: DocumentSummary,
}

#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub source: String,
    pub version: String,
    pub chars: usize,
    pub loaded_at: DateTime<Utc>,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Liveness probe, with the identity of the loaded document
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let document = state.service.document();
    Json(HealthResponse {
        status: "ok".to_string(),
        document: DocumentSummary {
            source: document.source().to_string(),
            version: document.version().as_str().to_string(),
            chars: document.char_len(),
            loaded_at: document.loaded_at(),
        },
    })
}

/// Answer one question. A missing or unparsable body counts as an empty
/// question.
pub async fn chatbot(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let request: ChatRequest = serde_json::from_slice(&body).unwrap_or_default();
    let question = request.question.unwrap_or_default();
    let question = question.trim();

    if question.is_empty() {
        return Err(ApiError::EmptyQuestion);
    }

    let answer = state.service.answer(question).await?;

    Ok(Json(ChatResponse {
        ok: true,
        response: answer.text,
    }))
}
