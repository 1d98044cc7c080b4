pub mod api;
pub mod exchange;
pub mod utils;

// Re-export commonly used types
pub use api::{router, AppState};
pub use exchange::binance::{
    BinanceTestClient, Credentials, ExchangeError, OrderRequest, OrderSide, OrderType, QueryParams,
};
pub use utils::Config;
