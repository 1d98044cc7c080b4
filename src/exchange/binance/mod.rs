pub mod types;
pub mod rest;
pub mod auth;
pub mod error;

pub use types::*;
pub use auth::{QueryParams, SignedQuery};
pub use error::ExchangeError;
pub use rest::BinanceTestClient;
