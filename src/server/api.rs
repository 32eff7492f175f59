//! HTTP API server implementation

use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::core::client::AsyncTranslator;
use crate::core::config::TranslatorConfig;
use crate::core::errors::TranslationError;
use crate::core::models::{TranslationOutput, TranslationRequest};
use crate::store::history::{HistoryItem, HistoryStore};

/// Application state
#[derive(Clone)]
pub struct AppState {
    translator: AsyncTranslator,
    history: Arc<Mutex<HistoryStore>>,
}

impl AppState {
    pub fn new(translator: AsyncTranslator, history: HistoryStore) -> Self {
        Self {
            translator,
            history: Arc::new(Mutex::new(history)),
        }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Translation request body
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateBody {
    #[serde(flatten)]
    pub request: TranslationRequest,
    #[serde(default)]
    pub save_to_history: bool,
}

/// History page query
#[derive(Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

/// One history entry with its id
#[derive(Serialize)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(flatten)]
    pub item: HistoryItem,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

type ApiError = (StatusCode, axum::Json<ErrorResponse>);

fn error_response(status: StatusCode, code: &str, message: String) -> ApiError {
    (
        status,
        axum::Json(ErrorResponse {
            error: ErrorDetail {
                message,
                code: Some(code.to_string()),
                r#type: Some(
                    if status.is_client_error() {
                        "invalid_request_error"
                    } else {
                        "api_error"
                    }
                    .to_string(),
                ),
            },
        }),
    )
}

/// Status and error code for a failed translation
fn classify(err: &TranslationError) -> (StatusCode, &'static str) {
    match err.root_cause() {
        TranslationError::TokenGenerationFailure { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "token_error")
        }
        TranslationError::NetworkFailure { .. } | TranslationError::ApiError { .. } => {
            (StatusCode::BAD_GATEWAY, "provider_unreachable")
        }
        TranslationError::ResponseParseFailure { .. } => {
            (StatusCode::BAD_GATEWAY, "provider_response_invalid")
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "translation_error"),
    }
}

/// Health check handler
async fn health_check() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Translation handler
async fn translate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateBody>,
) -> Result<axum::Json<TranslationOutput>, ApiError> {
    let request = payload.request;

    if request.text.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "invalid_request",
            "text cannot be empty".to_string(),
        ));
    }

    let result = state.translator.translate(&request).await.map_err(|e| {
        warn!("Translation failed: {}", e);
        let (status, code) = classify(&e);
        error_response(status, code, e.to_string())
    })?;

    let output = TranslationOutput::new(&request, result);

    if payload.save_to_history {
        if let Err(e) = state.history.lock().await.add(&output) {
            warn!("Failed to save history: {}", e);
        }
    }

    Ok(axum::Json(output))
}

/// History listing handler
async fn history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> axum::Json<Vec<HistoryEntry>> {
    let entries = state
        .history
        .lock()
        .await
        .list(query.offset, query.limit)
        .into_iter()
        .map(|(id, item)| HistoryEntry { id, item })
        .collect();

    axum::Json(entries)
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/translate", post(translate))
        .route("/history", get(history))
        .with_state(Arc::new(state))
}

/// Run the HTTP server
pub async fn run_server(config: TranslatorConfig, host: String, port: u16) -> anyhow::Result<()> {
    let history = HistoryStore::open(&config.history_path)?;
    let translator = AsyncTranslator::new(config)?;

    let app = router(AppState::new(translator, history));

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_map_through_split_wrappers() {
        let err = TranslationError::split(
            crate::core::errors::SplitSide::Right,
            TranslationError::ResponseParseFailure {
                message: "bad".to_string(),
            },
        );

        assert_eq!(
            classify(&err),
            (StatusCode::BAD_GATEWAY, "provider_response_invalid")
        );
    }

    #[test]
    fn test_translate_body_accepts_flat_request() {
        let body: TranslateBody = serde_json::from_str(
            r#"{"inputLang":"en","outputLang":"fr","text":"Hello","options":{"chinaMode":true},"saveToHistory":true}"#,
        )
        .unwrap();

        assert_eq!(body.request.text, "Hello");
        assert_eq!(body.request.options.china_mode, Some(true));
        assert!(body.save_to_history);
    }
}
