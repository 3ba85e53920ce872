//! Application error type and its HTTP representation.
//!
//! Every fallible operation in the crate returns [`AppError`]. Handlers return it
//! directly; Axum turns it into a JSON body of the form
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short link not found", "details": {} } }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Name of the unique constraint guarding `links.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "links_short_code_key";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing long URL, bad request body, or bad short code.
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The store rejected an insert because the short code is already taken.
    #[error("Short code '{code}' is already in use")]
    DuplicateCode { code: String },

    /// No free short code was found within the attempt budget.
    #[error("Could not allocate a unique short code after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },

    /// Any storage fault other than the expected duplicate-code race.
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::DuplicateCode { .. } => StatusCode::CONFLICT,
            AppError::ExhaustedRetries { .. }
            | AppError::Storage { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the client-facing payload.
    ///
    /// Storage details stay in the logs; the client only sees a generic message.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            AppError::InvalidInput { message, details } => ErrorInfo {
                code: "invalid_input",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::DuplicateCode { code } => ErrorInfo {
                code: "duplicate_code",
                message: "Short code is already in use".to_string(),
                details: json!({ "code": code }),
            },
            AppError::ExhaustedRetries { attempts } => ErrorInfo {
                code: "exhausted_retries",
                message: "Could not allocate a unique short code, please try again".to_string(),
                details: json!({ "attempts": attempts }),
            },
            AppError::Storage { .. } => ErrorInfo {
                code: "storage_error",
                message: "Couldn't save or load the link, please try again later".to_string(),
                details: json!({}),
            },
            AppError::Internal { message, details } => ErrorInfo {
                code: "internal_error",
                message: message.clone(),
                details: details.clone(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

/// Maps a SQLx error onto the application taxonomy.
///
/// A unique violation on [`SHORT_CODE_CONSTRAINT`] becomes [`AppError::DuplicateCode`]
/// so the allocator can retry; everything else is an opaque storage error.
pub fn map_sqlx_error(e: sqlx::Error, code: &str) -> AppError {
    if is_unique_violation_on_code(&e) {
        return AppError::DuplicateCode {
            code: code.to_string(),
        };
    }

    AppError::storage(e.to_string())
}

pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT))
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::storage(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid request", json!({ "fields": e.to_string() }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::bad_request(
            "That doesn't look like a valid URL for me to shorten",
            json!({ "reason": e.body_text() }),
        )
    }
}


impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::bad_request(
            "Short code is not valid",
            json!({ "reason": e.body_text() }),
        )
    }
}
