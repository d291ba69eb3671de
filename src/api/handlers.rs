//! HTTP request handlers for the underwriting API.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::request::{ExtractRequest, UnderwriteRequest};
use super::response::{ApiErrorResponse, HealthResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/underwrite", post(underwrite_handler))
        .route("/extract", post(extract_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for `POST /underwrite`.
///
/// Always answers 200 with an income decision once the body parses; model
/// failures surface as fallback decisions, not HTTP errors.
async fn underwrite_handler(
    State(state): State<AppState>,
    payload: Result<Json<UnderwriteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing underwrite request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return reject(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let outcome = state
        .pipeline()
        .underwrite(&request.document_text, &request.borrower)
        .instrument(info_span!("underwrite", correlation_id = %correlation_id))
        .await;

    info!(
        correlation_id = %correlation_id,
        document_chars = request.document_text.chars().count(),
        borrower_fields = request.borrower.len(),
        fallback = outcome.is_fallback(),
        duration_ms = start_time.elapsed().as_millis() as u64,
        "Underwrite request completed"
    );

    (StatusCode::OK, Json(outcome.decision)).into_response()
}

/// Handler for `POST /extract`.
async fn extract_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return reject(correlation_id, rejection),
    };

    let fact = state.pipeline().extract(&request.document_text);
    info!(
        correlation_id = %correlation_id,
        populated_fields = fact.populated_field_count(),
        "Extract request completed"
    );

    (StatusCode::OK, Json(fact)).into_response()
}

/// Handler for `GET /health`.
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.pipeline().evaluator().is_configured()))
}

fn reject(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %rejection.body_text(),
        "Request body rejected"
    );
    ApiErrorResponse::from(rejection).into_response()
}
