use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use veil_core::Document;
use veil_engine::Pipeline;

// Request body structs for REST API
#[derive(Deserialize)]
struct TransformRequest {
    text: String,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct DetectRequest {
    text: String,
}

/// Failed request, rendered as `{"error": "..."}`
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(error: anyhow::Error) -> Self {
        warn!(error = %error, "request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{:#}", error),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

/// HTTP front end over a shared pipeline
pub struct VeilServer {
    pub pipeline: Arc<Pipeline>,
}

#[derive(Clone)]
struct AppState {
    server: Arc<VeilServer>,
}

impl VeilServer {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Routes with permissive CORS
    pub fn router(self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/health", get(handle_health))
            .route("/api/transform", post(api_transform))
            .route("/api/detect", post(api_detect))
            .layer(cors)
            .with_state(AppState {
                server: Arc::new(self),
            })
    }

    pub async fn serve(self, host: &str, port: u16) -> anyhow::Result<()> {
        let extractor = self.pipeline.extractor_name().to_string();
        let app = self.router();

        let addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&addr).await?;

        info!(extractor = %extractor, "veil server listening on {}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// GET /health
async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "veil",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok"
    }))
}

/// POST /api/transform - Pseudonymize one inline document
async fn api_transform(
    State(state): State<AppState>,
    body: Result<Json<TransformRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body?;
    if req.text.trim().is_empty() {
        return Err(ApiError::bad_request("text must not be empty"));
    }

    let document = Document::new("text:request", req.text);
    let transformation = state
        .server
        .pipeline
        .transform_seeded(&document, req.seed)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(transformation).into_response())
}

/// POST /api/detect - List detections without replacing them
async fn api_detect(
    State(state): State<AppState>,
    body: Result<Json<DetectRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body?;
    if req.text.trim().is_empty() {
        return Err(ApiError::bad_request("text must not be empty"));
    }

    let entities = state
        .server
        .pipeline
        .detect(&req.text)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(entities).into_response())
}
