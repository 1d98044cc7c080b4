use crate::api::error::ApiError;
use crate::exchange::binance::{AccountSnapshot, RawKline};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Assets reported by `/api/account`, in response order
pub const TRACKED_ASSETS: [&str; 3] = ["BTC", "USDT", "ETH"];

/// Binance kline intervals
pub const KLINE_INTERVALS: [&str; 16] = [
    "1s", "1m", "3m", "5m", "15m", "30m", "1h", "2h", "4h", "6h", "8h", "12h", "1d", "3d", "1w", "1M",
];

pub const MAX_KLINE_LIMIT: u16 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBalance {
    pub asset: String,
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account_type: String,
    pub btc_balance: AssetBalance,
    pub usdt_balance: AssetBalance,
    pub eth_balance: AssetBalance,
}

impl AccountInfo {
    /// Reshape a raw `/v3/account` payload
    ///
    /// Assets missing from the account default to a balance of `"0"`.
    pub fn from_account_json(raw: Value) -> Result<Self, ApiError> {
        let snapshot: AccountSnapshot = serde_json::from_value(raw)
            .map_err(|e| ApiError::MalformedResponse(format!("account: {}", e)))?;

        let [btc, usdt, eth] = TRACKED_ASSETS.map(|asset| AssetBalance {
            asset: asset.to_string(),
            balance: snapshot.free_balance(asset).unwrap_or("0").to_string(),
        });

        Ok(Self {
            account_type: snapshot.account_type,
            btc_balance: btc,
            usdt_balance: usdt,
            eth_balance: eth,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceQuery {
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceHistoryQuery {
    pub symbol: String,
    #[serde(default = "default_interval")]
    pub interval: String,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_interval() -> String {
    crate::exchange::binance::rest::DEFAULT_KLINE_INTERVAL.to_string()
}

fn default_limit() -> u16 {
    crate::exchange::binance::rest::DEFAULT_KLINE_LIMIT
}

/// A kline reshaped for the frontend
///
/// Prices and volumes become floats; times, trade count and the trailing
/// ignore field are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candlestick {
    pub open_time: Value,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub close_time: Value,
    pub quote_asset_volume: f64,
    pub number_of_trades: Value,
    pub taker_buy_base_asset_volume: f64,
    pub taker_buy_quote_asset_volume: f64,
    pub ignore: Value,
}

impl TryFrom<&RawKline> for Candlestick {
    type Error = ApiError;

    fn try_from(row: &RawKline) -> Result<Self, Self::Error> {
        Ok(Self {
            open_time: row[0].clone(),
            open: coerce_f64(&row[1], "open")?,
            high: coerce_f64(&row[2], "high")?,
            low: coerce_f64(&row[3], "low")?,
            close: coerce_f64(&row[4], "close")?,
            volume: coerce_f64(&row[5], "volume")?,
            close_time: row[6].clone(),
            quote_asset_volume: coerce_f64(&row[7], "quote_asset_volume")?,
            number_of_trades: row[8].clone(),
            taker_buy_base_asset_volume: coerce_f64(&row[9], "taker_buy_base_asset_volume")?,
            taker_buy_quote_asset_volume: coerce_f64(&row[10], "taker_buy_quote_asset_volume")?,
            ignore: row[11].clone(),
        })
    }
}

/// Binance sends decimals as strings; accept plain numbers too
fn coerce_f64(value: &Value, field: &str) -> Result<f64, ApiError> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };

    parsed.ok_or_else(|| ApiError::MalformedResponse(format!("kline field {} is not numeric: {}", field, value)))
}

/// Symbols are plain tickers such as `BTCUSDT`
pub fn validate_symbol(symbol: &str) -> Result<(), ApiError> {
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::BadRequest(format!("invalid symbol: {:?}", symbol)));
    }
    Ok(())
}

pub fn validate_history_query(query: &PriceHistoryQuery) -> Result<(), ApiError> {
    validate_symbol(&query.symbol)?;

    if !KLINE_INTERVALS.contains(&query.interval.as_str()) {
        return Err(ApiError::BadRequest(format!("invalid interval: {:?}", query.interval)));
    }
    if query.limit == 0 || query.limit > MAX_KLINE_LIMIT {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_KLINE_LIMIT
        )));
    }
    Ok(())
}
