pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

use crate::exchange::BinanceTestClient;
use std::sync::Arc;

pub use error::ApiError;
pub use models::{AccountInfo, AssetBalance, Candlestick};
pub use routes::router;

/// Shared handler state
///
/// Built once at startup and cloned per request; the client inside is
/// immutable, so there is nothing to tear down.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<BinanceTestClient>,
}

impl AppState {
    pub fn new(client: BinanceTestClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}
