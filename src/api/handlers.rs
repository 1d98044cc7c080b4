use crate::api::error::ApiError;
use crate::api::models::{
    validate_history_query, validate_symbol, AccountInfo, Candlestick, HealthResponse, PriceHistoryQuery,
    PriceQuery,
};
use crate::api::AppState;
use crate::exchange::binance::{OrderRequest, TickerPrice};
use axum::extract::{Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde_json::Value;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "OK".to_string(),
    })
}

pub async fn get_account(State(state): State<AppState>) -> Result<Json<AccountInfo>, ApiError> {
    let raw = state.client.get_account_info().await?;
    Ok(Json(AccountInfo::from_account_json(raw)?))
}

pub async fn get_price(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<TickerPrice>, ApiError> {
    validate_symbol(&query.symbol)?;

    let ticker = state.client.get_price(&query.symbol).await?;
    Ok(Json(ticker))
}

pub async fn get_price_history(
    State(state): State<AppState>,
    Query(query): Query<PriceHistoryQuery>,
) -> Result<Json<Vec<Candlestick>>, ApiError> {
    validate_history_query(&query)?;

    let rows = state
        .client
        .get_candlesticks(&query.symbol, &query.interval, query.limit)
        .await?;

    let candles = rows
        .iter()
        .map(Candlestick::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(candles))
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(order): Json<OrderRequest>,
) -> Result<Json<Value>, ApiError> {
    validate_symbol(&order.symbol)?;
    if order.quantity <= Decimal::ZERO {
        return Err(ApiError::BadRequest("quantity must be positive".to_string()));
    }

    let response = state.client.create_order(&order).await?;
    Ok(Json(response))
}
