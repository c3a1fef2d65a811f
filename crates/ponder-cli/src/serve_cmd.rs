//! The `ponder serve` command: HTTP boundary for the chat pipeline.
//!
//! One route, `POST /api/chat`. Everything that can go wrong past method
//! dispatch collapses to a single 500 shape carrying a fixed apology plus
//! the underlying failure's description; no partial results are ever
//! returned. Each request is fully independent -- a failure is isolated to
//! that request's response.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing::error;

use ponder_core::completion::CompletionClient;
use ponder_core::pipeline::run_chat;
use ponder_core::types::{ChatRequest, ChatResponse};

/// Fixed user-facing apology included in every failure response.
const FALLBACK_MESSAGE: &str =
    "I encountered an error processing your request. Please try again.";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn CompletionClient>,
    pub model: String,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// A request failure: the whole operation is all-or-nothing, so any error
/// reaching this boundary produces the same body shape.
pub struct AppError {
    message: String,
}

impl AppError {
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({
            "error": self.message,
            "response": FALLBACK_MESSAGE,
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(state: AppState, bind: &str, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("ponder serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("ponder serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Rejected before any model interaction.
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "error": "Method not allowed" })),
    )
}

async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    // A body that does not parse as a ChatRequest gets the same generic
    // failure shape as a completion failure.
    let Json(request) = body.map_err(AppError::internal)?;

    let response = run_chat(state.client.as_ref(), &state.model, &request)
        .await
        .map_err(|e| {
            error!(error = %e, "chat request failed");
            AppError::internal(e)
        })?;

    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
