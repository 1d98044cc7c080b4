use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// API key pair for signed endpoints
///
/// Deliberately not `Serialize`; `Debug` hides both values.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spot order types accepted by Binance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Market,
    StopLoss,
    StopLossLimit,
    TakeProfit,
    TakeProfitLimit,
    LimitMaker,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::Market => "MARKET",
            OrderType::StopLoss => "STOP_LOSS",
            OrderType::StopLossLimit => "STOP_LOSS_LIMIT",
            OrderType::TakeProfit => "TAKE_PROFIT",
            OrderType::TakeProfitLimit => "TAKE_PROFIT_LIMIT",
            OrderType::LimitMaker => "LIMIT_MAKER",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order as submitted by the frontend
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Decimal,
    #[serde(default)]
    pub test: bool,
}

/// `GET /v3/ticker/price` response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

/// One row of `GET /v3/klines`
///
/// Positional: open_time, open, high, low, close, volume, close_time,
/// quote_asset_volume, number_of_trades, taker_buy_base_volume,
/// taker_buy_quote_volume, ignore. A row of any other length fails to parse.
pub type RawKline = [Value; 12];

/// Subset of `GET /v3/account` used by the frontend
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSnapshot {
    #[serde(rename = "accountType")]
    pub account_type: String,

    pub balances: Vec<Balance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    pub asset: String,
    pub free: String,
}

impl AccountSnapshot {
    /// Free balance of `asset`, if the account lists it
    pub fn free_balance(&self, asset: &str) -> Option<&str> {
        self.balances
            .iter()
            .find(|b| b.asset == asset)
            .map(|b| b.free.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_order_request() {
        let json = r#"{
            "symbol": "BTCUSDT",
            "side": "BUY",
            "order_type": "MARKET",
            "quantity": 0.01,
            "test": true,
            "client_note": "dropped"
        }"#;

        let order: OrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.quantity, dec!(0.01));
        assert!(order.test);
    }

    #[test]
    fn test_order_request_test_flag_defaults_to_false() {
        let json = r#"{"symbol":"ETHUSDT","side":"SELL","order_type":"LIMIT_MAKER","quantity":"1.5"}"#;

        let order: OrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_type, OrderType::LimitMaker);
        assert!(!order.test);
    }

    #[test]
    fn test_unknown_order_type_rejected() {
        let json = r#"{"symbol":"BTCUSDT","side":"BUY","order_type":"YOLO","quantity":1}"#;
        assert!(serde_json::from_str::<OrderRequest>(json).is_err());

        let json = r#"{"symbol":"BTCUSDT","side":"buy","order_type":"MARKET","quantity":1}"#;
        assert!(serde_json::from_str::<OrderRequest>(json).is_err());
    }

    #[test]
    fn test_order_type_wire_names_match_serde() {
        for t in [
            OrderType::Limit,
            OrderType::Market,
            OrderType::StopLoss,
            OrderType::StopLossLimit,
            OrderType::TakeProfit,
            OrderType::TakeProfitLimit,
            OrderType::LimitMaker,
        ] {
            assert_eq!(serde_json::to_value(t).unwrap(), Value::String(t.to_string()));
        }
    }

    #[test]
    fn test_raw_kline_requires_twelve_fields() {
        let row = r#"[[1620000000000,"100.0","105.0","99.0","102.0","10.5",1620003599999,"1071.0",120,"5.2","535.0","ignore"]]"#;
        let rows: Vec<RawKline> = serde_json::from_str(row).unwrap();
        assert_eq!(rows[0][0], Value::from(1620000000000u64));
        assert_eq!(rows[0][11], Value::from("ignore"));

        let short = r#"[[1620000000000,"100.0"]]"#;
        assert!(serde_json::from_str::<Vec<RawKline>>(short).is_err());
    }

    #[test]
    fn test_account_snapshot_free_balance() {
        let json = r#"{
            "accountType": "SPOT",
            "balances": [{"asset": "ETH", "free": "2.5", "locked": "0.0"}]
        }"#;

        let snapshot: AccountSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.free_balance("ETH"), Some("2.5"));
        assert_eq!(snapshot.free_balance("BTC"), None);
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = Credentials::new("my-key", "my-secret");
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("my-key"));
        assert!(!printed.contains("my-secret"));
    }
}
