use crate::exchange::binance::error::{ExchangeError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};
use url::form_urlencoded;

type HmacSha256 = Hmac<Sha256>;

/// Keys appended by the signer. Callers may not supply them.
const RESERVED_KEYS: [&str; 2] = ["timestamp", "signature"];

/// Generate HMAC-SHA256 signature for Binance API requests
///
/// Binance requires all authenticated endpoints to include:
/// 1. timestamp parameter
/// 2. signature parameter (HMAC-SHA256 of query string)
pub fn generate_signature(secret_key: &str, query_string: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .expect("HMAC can take key of any size");

    mac.update(query_string.as_bytes());

    hex::encode(mac.finalize().into_bytes())
}

/// Get current timestamp in milliseconds
pub fn get_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Ordered request parameters
///
/// Order of insertion is the order of serialization. Binance verifies the
/// signature against the exact bytes it receives, so no sorting happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, consuming and returning the builder
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `application/x-www-form-urlencoded` serialization in insertion order
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// A query string authenticated with the account secret
///
/// `canonical` is exactly what was signed, and `as_str` is exactly what gets
/// transmitted: the canonical string followed by `&signature=<hex>`.
#[derive(Debug, Clone)]
pub struct SignedQuery {
    canonical: String,
    signature: String,
    query: String,
}

impl SignedQuery {
    /// Sign a copy of `params` with `timestamp` appended
    pub fn new(params: &QueryParams, secret_key: &str, timestamp: u64) -> Result<Self> {
        if let Some(key) = params.keys().find(|k| RESERVED_KEYS.contains(k)) {
            return Err(ExchangeError::ReservedParam(key.to_string()));
        }

        let canonical = params.clone().with("timestamp", timestamp).encode();
        let signature = generate_signature(secret_key, &canonical);
        let query = format!("{}&signature={}", canonical, signature);

        Ok(Self {
            canonical,
            signature,
            query,
        })
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }
}
