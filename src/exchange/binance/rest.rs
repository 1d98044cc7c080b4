use crate::exchange::binance::auth::{self, QueryParams, SignedQuery};
use crate::exchange::binance::error::{ExchangeError, Result};
use crate::exchange::binance::types::{Credentials, OrderRequest, RawKline, TickerPrice};
use crate::utils::config::ExchangeConfig;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

pub const ACCOUNT_ENDPOINT: &str = "/v3/account";
pub const TICKER_PRICE_ENDPOINT: &str = "/v3/ticker/price";
pub const KLINES_ENDPOINT: &str = "/v3/klines";
pub const PING_ENDPOINT: &str = "/v3/ping";
pub const ORDER_ENDPOINT: &str = "/v3/order";
pub const TEST_ORDER_ENDPOINT: &str = "/v3/order/test";

pub const DEFAULT_KLINE_INTERVAL: &str = "1h";
pub const DEFAULT_KLINE_LIMIT: u16 = 50;

/// Binance Spot testnet REST API client
///
/// Holds only immutable state, so a single instance can be shared behind an
/// `Arc` by concurrent callers. Every call issues exactly one request and
/// never retries.
pub struct BinanceTestClient {
    client: Client,
    credentials: Credentials,
    base_url: String,
}

impl BinanceTestClient {
    /// Create new REST client
    pub fn new(credentials: Credentials, config: &ExchangeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ExchangeError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credentials,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute an authenticated request
    ///
    /// Appends `timestamp` to a copy of `params`, signs the encoded string and
    /// sends that same string plus `signature` as the URL query, for GET and
    /// POST alike. The response body is returned as parsed, unvalidated JSON.
    pub async fn execute(&self, endpoint: &str, params: &QueryParams, method: Method) -> Result<Value> {
        let url = self.signed_url(endpoint, params, auth::get_timestamp())?;

        debug!("Executing signed {} {}", method, endpoint);

        let response = self
            .client
            .request(method, url)
            .header("X-MBX-APIKEY", &self.credentials.api_key)
            .send()
            .await?;

        Self::parse_response(endpoint, response).await
    }

    /// Full URL for a signed call at the given timestamp
    pub(crate) fn signed_url(&self, endpoint: &str, params: &QueryParams, timestamp: u64) -> Result<String> {
        let signed = SignedQuery::new(params, &self.credentials.api_secret, timestamp)?;
        Ok(format!("{}{}?{}", self.base_url, endpoint, signed.as_str()))
    }

    /// Execute an unauthenticated GET against a public endpoint
    async fn public_get<T: DeserializeOwned>(&self, endpoint: &str, params: &QueryParams) -> Result<T> {
        let url = if params.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, params.encode())
        };

        debug!("Executing public GET {}", endpoint);

        let response = self.client.get(&url).send().await?;
        let value = Self::parse_response(endpoint, response).await?;

        Ok(serde_json::from_value(value)?)
    }

    async fn parse_response(endpoint: &str, response: Response) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            error!("Request to {} failed: {} - {}", endpoint, status, body);
            return Err(ExchangeError::Api { status, body });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Get account information
    pub async fn get_account_info(&self) -> Result<Value> {
        self.execute(ACCOUNT_ENDPOINT, &QueryParams::new(), Method::GET).await
    }

    /// Latest price for a symbol
    pub async fn get_price(&self, symbol: &str) -> Result<TickerPrice> {
        let params = QueryParams::new().with("symbol", symbol.to_uppercase());
        self.public_get(TICKER_PRICE_ENDPOINT, &params).await
    }

    /// Candlesticks for a symbol, oldest first
    pub async fn get_candlesticks(&self, symbol: &str, interval: &str, limit: u16) -> Result<Vec<RawKline>> {
        let params = QueryParams::new()
            .with("symbol", symbol.to_uppercase())
            .with("interval", interval)
            .with("limit", limit);

        self.public_get(KLINES_ENDPOINT, &params).await
    }

    /// Submit an order to the test or live endpoint
    ///
    /// Only symbol, side, type and quantity are forwarded.
    pub async fn create_order(&self, order: &OrderRequest) -> Result<Value> {
        let endpoint = Self::order_endpoint(order.test);

        info!(
            "Submitting {} order: {} {} {} qty={}",
            if order.test { "test" } else { "LIVE" },
            order.symbol,
            order.side,
            order.order_type,
            order.quantity
        );

        self.execute(endpoint, &Self::order_params(order), Method::POST).await
    }

    pub fn order_endpoint(test: bool) -> &'static str {
        if test {
            TEST_ORDER_ENDPOINT
        } else {
            ORDER_ENDPOINT
        }
    }

    pub fn order_params(order: &OrderRequest) -> QueryParams {
        QueryParams::new()
            .with("symbol", &order.symbol)
            .with("side", order.side)
            .with("type", order.order_type)
            .with("quantity", order.quantity)
    }

    /// Test connectivity to Binance API
    pub async fn ping(&self) -> Result<()> {
        let _: Value = self.public_get(PING_ENDPOINT, &QueryParams::new()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::binance::types::{OrderSide, OrderType};
    use rust_decimal_macros::dec;

    fn test_client() -> BinanceTestClient {
        let config = ExchangeConfig {
            api_endpoint: "https://testnet.binance.vision/api/".to_string(),
            timeout_ms: 1000,
        };
        BinanceTestClient::new(Credentials::new("test_api_key", "test_secret_key"), &config).unwrap()
    }

    fn market_order(test: bool) -> OrderRequest {
        OrderRequest {
            symbol: "BTCUSDT".to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Market,
            quantity: dec!(0.01),
            test,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = test_client();

        assert_eq!(client.credentials.api_key, "test_api_key");
        assert_eq!(client.base_url(), "https://testnet.binance.vision/api");
    }

    #[test]
    fn test_order_endpoint_routing() {
        assert_eq!(BinanceTestClient::order_endpoint(true), "/v3/order/test");
        assert_eq!(BinanceTestClient::order_endpoint(false), "/v3/order");
    }

    #[test]
    fn test_order_params_mapping() {
        let params = BinanceTestClient::order_params(&market_order(true));

        assert_eq!(params.encode(), "symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.01");
        assert!(params.get("test").is_none());
        assert!(params.get("order_type").is_none());
    }

    #[test]
    fn test_signed_url_sends_what_was_signed() {
        let client = test_client();
        let order = market_order(true);
        let params = BinanceTestClient::order_params(&order);

        let url = client
            .signed_url(BinanceTestClient::order_endpoint(order.test), &params, 1620000000000)
            .unwrap();

        let canonical = "symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.01&timestamp=1620000000000";
        let signature = auth::generate_signature("test_secret_key", canonical);

        assert_eq!(
            url,
            format!(
                "https://testnet.binance.vision/api/v3/order/test?{}&signature={}",
                canonical, signature
            )
        );
    }

    #[test]
    fn test_signed_url_rejects_reserved_params() {
        let client = test_client();
        let params = QueryParams::new().with("signature", "forged");

        assert!(matches!(
            client.signed_url(ACCOUNT_ENDPOINT, &params, 1),
            Err(ExchangeError::ReservedParam(_))
        ));
    }
}
