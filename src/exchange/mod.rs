pub mod binance;

pub use binance::{BinanceTestClient, ExchangeError};
