// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Map, Value};

use crate::database::DatabaseError;
use crate::services::ServiceError;

/// HTTP API error. Bodies always carry `error`; `message` is added when the
/// operation has a caller-facing summary.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError { message: Option<String>, error: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError { error, .. } => error,
        }
    }

    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if let ApiError::InternalServerError { message: Some(message), .. } = self {
            body.insert("message".into(), json!(message));
        }
        body.insert("error".into(), json!(self.error()));
        Value::Object(body)
    }
}

impl ApiError {
    pub fn bad_request(error: impl Into<String>) -> Self {
        ApiError::BadRequest(error.into())
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        ApiError::NotFound(error.into())
    }

    pub fn internal_server_error(error: impl Into<String>) -> Self {
        ApiError::InternalServerError { message: None, error: error.into() }
    }

    pub fn internal_with_message(message: impl Into<String>, error: impl Into<String>) -> Self {
        ApiError::InternalServerError {
            message: Some(message.into()),
            error: error.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(e @ DatabaseError::Constraint(_)) => ApiError::bad_request(e.to_string()),
            ServiceError::Store(e) => {
                tracing::error!("Salary query failed: {}", e);
                ApiError::internal_server_error(e.to_string())
            }
            ServiceError::FilterOptionsUnavailable(detail) => {
                tracing::error!("Filter options unavailable: {}", detail);
                ApiError::internal_with_message("Error fetching filter options", detail)
            }
            ServiceError::RecordNotFound(_) => ApiError::not_found(err.to_string()),
            ServiceError::InvalidRecord(_) => ApiError::bad_request(err.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
