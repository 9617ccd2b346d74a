//! Lesson plan generation endpoint.
//!
//! `POST /generate` with `{ "inputs": { ... } }` answers with a normalized
//! plan. Preflight `OPTIONS` short-circuits with 204 before the method or
//! body is looked at. The body is only read once the method is known to be
//! POST, so an oversized body never pre-empts the 204 or 405 answers.

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::RequestId;
use crate::plan::GenerateBody;
use crate::state::AppState;

/// Largest request body accepted for generation
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Generate handler.
#[instrument(
    name = "generate::generate",
    skip(state, request),
    fields(
        method = %request.method(),
        mock = state.mode.is_mock(),
        request_id = tracing::field::Empty,
    )
)]
pub async fn generate(State(state): State<AppState>, request: Request) -> Result<Response, AppError> {
    if let Some(RequestId(id)) = request.extensions().get::<RequestId>() {
        tracing::Span::current().record("request_id", tracing::field::display(id));
    }

    let method = request.method().clone();
    if method == Method::OPTIONS {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let body = to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "Failed to read request body");
            AppError::MissingFields
        })?;

    let params = GenerateBody::from_slice(&body)?.into_params()?;

    tracing::debug!(
        subject = %params.subject_topic,
        grade = %params.grade_age,
        objectives = params.objectives.len(),
        "Generating plan"
    );

    let plan = state.mode.generate(&params).await?;

    Ok(Json(plan).into_response())
}
