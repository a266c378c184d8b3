//! Fatal request errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::domain::DomainError;
use crate::infrastructure::template::TemplateError;

/// A failure that ends the request without a page
#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "Request failed");
            // Internal details stay in the log
            let reason = self.status.canonical_reason().unwrap_or("Error");
            return (self.status, reason).into_response();
        }

        (self.status, self.message).into_response()
    }
}

impl From<DomainError> for WebError {
    fn from(err: DomainError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<TemplateError> for WebError {
    fn from(err: TemplateError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for WebError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::internal(format!("Session error: {}", err))
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for WebError {}
