use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
///
/// Link requests themselves never fail (the router degrades to a redirect);
/// these cover startup and the few request shapes the server refuses.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Platform error: {0}")]
    Canonical(#[from] canonical::CanonicalError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] metadata::MetadataError),
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::Config(_)
            | ServerError::Load(_)
            | ServerError::InvalidAddress(_)
            | ServerError::Io(_)
            | ServerError::Canonical(_)
            | ServerError::Metadata(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            ServerError::Config(_) | ServerError::Load(_) => "CONFIG_ERROR",
            ServerError::InvalidAddress(_) => "INVALID_ADDRESS",
            ServerError::Io(_) => "IO_ERROR",
            ServerError::Canonical(_) => "PLATFORM_ERROR",
            ServerError::Metadata(_) => "METADATA_ERROR",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}
