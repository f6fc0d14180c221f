//! HTTP surface for docsum.
//!
//! The router exposes a compact set of endpoints:
//!
//! - `POST /summarize/` – Multipart upload with a single file field. Returns
//!   `{"summary", "filename"}`, or `{"summary": "No content found in the document."}` when the
//!   extracted text is empty. Also reachable as `POST /summarize` and `POST /upload`.
//! - `GET /health` – Liveness probe.
//! - `GET /metrics` – Summarization counters.
//! - `GET /commands` – Machine-readable command catalog.
//!
//! Unsupported extensions answer 400 and parser failures 500, both with a `detail` message.
//! Other failures answer with an `error` message. With `LEGACY_ERROR_RESPONSES` enabled every
//! failure is reported as a 200 response carrying an `error` message instead.

use crate::config::Config;
use crate::extraction::ExtractionError;
use crate::metrics::MetricsSnapshot;
use crate::processing::{SummarizeApi, SummarizeError, SummaryOutcome, UploadedDocument};
use crate::summarization::NO_CONTENT_MESSAGE;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

const FILE_FIELD: &str = "file";

/// Build the HTTP router exposing the summarization API surface.
pub fn create_router<S>(service: Arc<S>, config: &Config) -> Router
where
    S: SummarizeApi + 'static,
{
    let state = AppState {
        service,
        legacy_errors: config.legacy_error_responses,
    };

    // Development setting: every origin, method and header is allowed.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/summarize/", post(summarize_upload::<S>))
        .route("/summarize", post(summarize_upload::<S>))
        .route("/upload", post(summarize_upload::<S>))
        .route("/health", get(health))
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
        .with_state(state)
}

struct AppState<S> {
    service: Arc<S>,
    legacy_errors: bool,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            legacy_errors: self.legacy_errors,
        }
    }
}

/// Response body for the summarize endpoints.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SummaryResponse {
    /// Summary text, or the no-content message.
    pub summary: String,
    /// Uploaded filename; absent when the document had no content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl From<SummaryOutcome> for SummaryResponse {
    fn from(outcome: SummaryOutcome) -> Self {
        match outcome {
            SummaryOutcome::Summarized { summary, filename } => Self {
                summary,
                filename: Some(filename),
            },
            SummaryOutcome::NoContent => Self {
                summary: NO_CONTENT_MESSAGE.to_string(),
                filename: None,
            },
        }
    }
}

/// Summarize the uploaded file.
///
/// The field named `file` is used; failing that, the first field carrying a filename.
async fn summarize_upload<S>(
    State(state): State<AppState<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SummaryResponse>, ApiFailure>
where
    S: SummarizeApi,
{
    let legacy = state.legacy_errors;
    let document = read_upload(multipart)
        .await
        .map_err(|error| ApiFailure { error, legacy })?;
    let outcome = state
        .service
        .summarize(document)
        .await
        .map_err(|error| ApiFailure {
            error: ApiError::Summarize(error),
            legacy,
        })?;
    Ok(Json(outcome.into()))
}

async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadedDocument, ApiError> {
    let mut multipart = multipart.map_err(|rejection| ApiError::Upload(rejection.to_string()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| ApiError::Upload(error.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) && field.file_name().is_none() {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|error| ApiError::Upload(error.to_string()))?;
        return Ok(UploadedDocument::new(filename, bytes.to_vec()));
    }

    Err(ApiError::Upload(format!("Missing '{FILE_FIELD}' field in multipart body")))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Return the summarization counters.
async fn get_metrics<S>(State(state): State<AppState<S>>) -> Json<MetricsSnapshot>
where
    S: SummarizeApi,
{
    Json(state.service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery in hosts and tools.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "summarize",
                method: "POST",
                path: "/summarize/",
                description: "Upload a PDF, DOCX, PPTX or TXT file as multipart field 'file'. Response returns { \"summary\": string, \"filename\": string }.",
            },
            CommandDescriptor {
                name: "health",
                method: "GET",
                path: "/health",
                description: "Liveness probe.",
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return counters of summarized, empty, and failed uploads.",
            },
        ],
    })
}

enum ApiError {
    Summarize(SummarizeError),
    Upload(String),
}

struct ApiFailure {
    error: ApiError,
    legacy: bool,
}

enum ErrorBody {
    /// Typed HTTP error with a `detail` message.
    Detail(String),
    /// Generic failure with an `error` message.
    Error(String),
}

impl ApiError {
    fn classify(self) -> (StatusCode, ErrorBody) {
        match self {
            Self::Summarize(SummarizeError::Extraction(error)) => match error {
                ExtractionError::UnsupportedFormat => {
                    (StatusCode::BAD_REQUEST, ErrorBody::Detail(error.to_string()))
                }
                ExtractionError::Extraction { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::Detail(error.to_string()),
                ),
                ExtractionError::Decode(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::Error(error.to_string()),
                ),
            },
            Self::Summarize(SummarizeError::Internal(message)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::Error(message))
            }
            Self::Upload(message) => (StatusCode::BAD_REQUEST, ErrorBody::Error(message)),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let (status, body) = self.error.classify();
        if self.legacy {
            let message = match body {
                ErrorBody::Detail(detail) => format!("{}: {detail}", status.as_u16()),
                ErrorBody::Error(message) => message,
            };
            return (StatusCode::OK, Json(json!({ "error": message }))).into_response();
        }

        let body = match body {
            ErrorBody::Detail(detail) => json!({ "detail": detail }),
            ErrorBody::Error(message) => json!({ "error": message }),
        };
        (status, Json(body)).into_response()
    }
}
