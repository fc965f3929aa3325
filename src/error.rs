//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Message returned to callers for any datastore failure. Details go to the log only.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid database url: {0}")]
    DatabaseUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("validation: {0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Body rejected before parsing: too large or not declared as JSON.
    #[error("payload: {message}")]
    Payload { status: StatusCode, message: String },
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Payload { status, .. } => *status,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Config(_) | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing message. Never includes datastore detail.
    pub fn public_message(&self) -> String {
        match self {
            AppError::NotFound(_) => self.to_string(),
            AppError::Validation(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Payload { message, .. } => message.clone(),
            AppError::MethodNotAllowed => "Method not allowed".to_string(),
            AppError::Config(_) | AppError::Db(_) => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Syntax and type errors in the body are 400; size and content-type
/// rejections keep axum's status (413, 415).
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                AppError::BadRequest(rejection.body_text())
            }
            other => AppError::Payload {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

/// Error envelope shared by every failure response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human readable error message
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Config(e) => tracing::error!(error = %e, "configuration failure"),
            AppError::Db(e) => tracing::error!(error = %e, "datastore failure"),
            other => tracing::debug!(status = status.as_u16(), error = %other, "request rejected"),
        }
        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
