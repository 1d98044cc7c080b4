use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the Binance REST client
///
/// Every variant is safe to show to API consumers: transport errors have
/// their URL stripped, so signed query strings never leak through here.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("Transport error: {0}")]
    Transport(reqwest::Error),

    #[error("Binance API error: {status} - {body}")]
    Api { status: StatusCode, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Parameter '{0}' is reserved for request signing")]
    ReservedParam(String),

    #[error("Client configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        ExchangeError::Transport(err.without_url())
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        ExchangeError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExchangeError>;
