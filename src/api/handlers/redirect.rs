//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /go/{code}` (prefix configurable with `SHORT_PATH_PREFIX`)
///
/// # Response
///
/// `308 Permanent Redirect` with `Location` set to the stored long URL.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 400 Bad Request if the short code is malformed or not valid UTF-8.
pub async fn redirect_handler(
    path: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Path(code) = path?;
    follow(&state, &code).await
}

/// Answers `{prefix}` and `{prefix}/` requests that carry no code at all.
pub async fn missing_code_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    follow(&state, "").await
}

async fn follow(state: &AppState, code: &str) -> Result<Response, AppError> {
    let long_url = state.link_service.resolve(code).await?;

    metrics::counter!("redirects_total").increment(1);
    debug!(code = %code, "Redirecting");

    let location = location_header(&long_url)?;

    Ok((StatusCode::PERMANENT_REDIRECT, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` value, using the stored URL as-is when possible.
///
/// Non-ASCII URLs cannot go into a header verbatim; for those the equivalent
/// ASCII serialization (punycode host, percent-encoded path) is sent instead.
fn location_header(long_url: &str) -> Result<HeaderValue, AppError> {
    if let Ok(value) = HeaderValue::from_str(long_url) {
        return Ok(value);
    }

    Url::parse(long_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            AppError::internal(
                "Stored URL cannot be used as a redirect target",
                json!({}),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_header_verbatim() {
        let value = location_header("https://example.com/a?b=1#c").unwrap();
        assert_eq!(value, "https://example.com/a?b=1#c");
    }

    #[test]
    fn test_location_header_non_ascii() {
        let value = location_header("https://bücher.example.com/straße").unwrap();
        assert_eq!(
            value,
            "https://xn--bcher-kva.example.com/stra%C3%9Fe"
        );
    }
}
