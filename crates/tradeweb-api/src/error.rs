//! Error types for tradeweb-api

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tradeweb_core::{CoreError, ErrorSeverity};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error.severity() {
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                log::error!("[{}] {}", error.code(), error)
            }
            _ => log::warn!("[{}] {}", error.code(), error),
        }
        match error {
            CoreError::FormNotFound { id } => ApiError::NotFound {
                resource: format!("form {}", id),
            },
            CoreError::Sink { .. } | CoreError::InternalError { .. } => ApiError::InternalError,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let hint = match self {
            ApiError::NotFound { .. } => "This form is no longer open. Reload the page to start a new one.",
            _ => "",
        };
        let body = format!(
            r#"<div class='bg-red-50 border border-red-200 rounded-lg p-4'><p class='font-medium text-red-800'>{}</p><p class='text-sm text-red-600 mt-1'>{}</p></div>"#,
            tradeweb_utils::escape_html(&self.to_string()),
            hint
        );
        (self.status(), Html(body)).into_response()
    }
}
