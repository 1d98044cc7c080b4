use crate::exchange::ExchangeError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

/// Error types for API handlers
///
/// Rendered as a plain-text body. Exchange errors carry Binance's own
/// `{code, msg}` payload or a URL-free transport message, never the signed
/// query string.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Exchange(#[from] ExchangeError),

    #[error("Malformed exchange response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Exchange(_) | ApiError::MalformedResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed: {}", self);
        }

        (status, self.to_string()).into_response()
    }
}
