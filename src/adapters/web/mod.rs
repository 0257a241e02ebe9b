//! HTTP serving layer.
//!
//! JSON endpoints over the current trade snapshot plus a small HTML
//! dashboard. Every request reads one snapshot and computes from it; a
//! reload swaps the snapshot without blocking in-flight requests.

mod error;
mod handlers;
mod templates;

pub use error::{WebError, status_from_error};
pub use handlers::*;
pub use templates::*;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::domain::snapshot::TradeSnapshot;
use crate::ports::trade_port::TradePort;

pub struct AppState {
    pub snapshot: Arc<TradeSnapshot>,
    pub trade_port: Arc<dyn TradePort + Send + Sync>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/trend/{symbol}", get(handlers::trend_page))
        .route("/api/summary", get(handlers::summary))
        .route("/api/trend/{symbol}", get(handlers::trend))
        .route("/api/get_signs", get(handlers::symbols))
        .route("/api/symbols", get(handlers::symbols))
        .route("/api/best_symbol", get(handlers::best_symbol))
        .route("/api/most_used", get(handlers::most_used))
        .route("/api/buy_sell_trend", get(handlers::buy_sell_trend))
        .route("/api/busiest_day", get(handlers::busiest_day))
        .route("/api/busiest_days", get(handlers::busiest_days))
        .route("/api/reload", post(handlers::reload))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
