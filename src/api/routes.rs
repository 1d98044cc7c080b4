use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::api::{handlers, AppState};

/// Build the frontend-facing router
///
/// - `GET  /api/health`
/// - `GET  /api/account`
/// - `GET  /api/price?symbol=`
/// - `GET  /api/price-history?symbol=&interval=&limit=`
/// - `POST /api/order`
pub fn router(state: AppState, cors_origins: Option<&[String]>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/account", get(handlers::get_account))
        .route("/api/price", get(handlers::get_price))
        .route("/api/price-history", get(handlers::get_price_history))
        .route("/api/order", post(handlers::create_order))
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Any origin unless an explicit list is configured
pub fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match origins {
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match o.parse::<HeaderValue>() {
                    Ok(h) => Some(h),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {}", o);
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(allowed))
        }
        None => layer.allow_origin(Any),
    }
}
