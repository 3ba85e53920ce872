//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortUrl": "http://localhost:8080/go/k3x9qa",
///   "shortCode": "k3x9qa",
///   "longUrl": "https://example.com/some/long/path"
/// }
/// ```
///
/// # Cancellation
///
/// The work runs in its own task, so a client that disconnects mid-request
/// does not abort an insert that has already started.
///
/// # Errors
///
/// - 400 if the body is malformed or the URL is rejected
/// - 500 `exhausted_retries` if no free code could be allocated
/// - 500 `storage_error` on storage faults
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let service = state.link_service.clone();
    let link = tokio::spawn(async move { service.shorten(payload.long_url).await })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Shorten task failed");
            AppError::internal("Couldn't shorten the URL, please try again later", json!({}))
        })??;

    Ok((StatusCode::CREATED, Json(link.into())))
}
