use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::PREDICTOR_NAME;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("could not decode {format} payload: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("could not read request body: {0}")]
    Body(String),

    #[error("invalid '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("{0}")]
    PredictionFailed(String),

    #[error("could not encode response: {0}")]
    Encode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Error body shared by every predictor behind the evaluation API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub predictor_name: &'static str,
    pub error: Vec<BTreeMap<&'static str, String>>,
}

impl Error {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn error_key(&self) -> &'static str {
        match self {
            Error::UnsupportedContentType(_)
            | Error::Decode { .. }
            | Error::PayloadTooLarge(_)
            | Error::Body(_)
            | Error::Validation { .. } => "bad_prediction_request",
            Error::PredictionFailed(_) => "prediction_request_failed",
            Error::Encode(_) | Error::Io(_) | Error::Internal(_) => "server_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::UnsupportedContentType(_) => StatusCode::BAD_REQUEST,
            Error::Decode { .. } => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Body(_) => StatusCode::BAD_REQUEST,
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::PredictionFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Encode(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<BytesRejection> for Error {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Error::PayloadTooLarge(rejection.body_text())
        } else {
            Error::Body(rejection.body_text())
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("rejected request: {}", self);
        }

        let body = ErrorResponse {
            predictor_name: PREDICTOR_NAME,
            error: vec![BTreeMap::from([(self.error_key(), self.to_string())])],
        };
        (status, axum::Json(body)).into_response()
    }
}
