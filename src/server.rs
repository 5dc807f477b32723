//! HTTP server exposing the chat and feedback workflow.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/chat` | Match a message against the knowledge base |
//! | `POST` | `/feedback` | Teach the correct answer for a question |
//! | `GET`  | `/health` | Health check |
//!
//! Anything else falls through to the static front-end directory when
//! `[server].static_dir` is configured.
//!
//! # Error Contract
//!
//! Validation problems (empty message, short feedback) are part of the
//! regular response bodies, not HTTP faults. Unexpected persistence errors
//! surface as `500` with a JSON body:
//!
//! ```json
//! { "error": { "code": "internal", "message": "..." } }
//! ```
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted; the front-end is
//! served from a separate origin during development.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::Config;
use crate::db;
use crate::learning;
use crate::matcher;
use crate::migrate;
use crate::predictor;
use crate::store;

/// Shared application state passed to all route handlers via Axum's
/// `State` extractor.
#[derive(Clone)]
struct AppState {
    pool: sqlx::SqlitePool,
    config: Arc<Config>,
}

/// Starts the HTTP server.
///
/// Connects the database pool and applies the schema before binding; a
/// failure at this stage is fatal rather than serving a degraded process.
/// Runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();

    let pool = db::connect(config).await?;
    migrate::apply_schema(&pool).await?;

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/chat", post(handle_chat))
        .route("/feedback", post(handle_feedback))
        .route("/health", get(handle_health));

    let app = match &state.config.server.static_dir {
        Some(dir) => {
            tracing::info!("serving front-end assets from {}", dir.display());
            app.fallback_service(ServeDir::new(dir))
        }
        None => app,
    };

    let app = app.layer(cors).with_state(state);

    println!("chatkb listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error body for server faults.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 500 error for unexpected persistence failures.
fn internal(err: anyhow::Error) -> AppError {
    tracing::error!("request failed: {err:#}");
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: err.to_string(),
    }
}

// ============ POST /chat ============

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Serialize)]
struct ChatResponse {
    answer: String,
    needs_feedback: bool,
    confidence: f64,
}

/// Handler for `POST /chat`.
///
/// Matches the message against every stored question. Below the confidence
/// threshold the placeholder prediction is returned, the question is
/// logged for feedback, and `needs_feedback` is set.
async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = req.message.trim();

    if message.is_empty() {
        return Ok(Json(ChatResponse {
            answer: "Please ask something.".to_string(),
            needs_feedback: false,
            confidence: 0.0,
        }));
    }

    let entries = store::list_knowledge_entries(&state.pool)
        .await
        .map_err(internal)?;
    let (answer, score) = matcher::find_best_answer(&entries, message);

    match answer {
        Some(answer) if score >= state.config.matching.threshold => Ok(Json(ChatResponse {
            answer,
            needs_feedback: false,
            confidence: score,
        })),
        _ => {
            let predicted = predictor::predict_answer(message);
            learning::record_unknown(&state.pool, message, predicted, score)
                .await
                .map_err(internal)?;
            tracing::debug!(score, "no confident match, logged unknown question");

            Ok(Json(ChatResponse {
                answer: predicted.to_string(),
                needs_feedback: true,
                confidence: score,
            }))
        }
    }
}

// ============ POST /feedback ============

#[derive(Deserialize)]
struct FeedbackRequest {
    question: String,
    feedback: String,
}

#[derive(Serialize)]
struct FeedbackResponse {
    status: String,
    message: String,
}

/// Handler for `POST /feedback`.
///
/// Delegates to the learning workflow; validation failures come back as
/// `status = "error"` in the body.
async fn handle_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let outcome = learning::apply_feedback(&state.pool, &req.question, &req.feedback)
        .await
        .map_err(internal)?;

    Ok(Json(FeedbackResponse {
        status: outcome.status.as_str().to_string(),
        message: outcome.message,
    }))
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

/// Handler for `GET /health`. Liveness only; says nothing about the
/// database.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
