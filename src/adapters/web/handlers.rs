//! HTTP request handlers for the web adapter.

use askama::Template;
use axum::{
    Json,
    extract::{Path, State},
    response::Html,
};
use std::sync::Arc;

use crate::domain::aggregate::{self, BuySellBucket, DailyVolume, SymbolDailyVolume, SymbolSummary, TrendPoint};
use crate::domain::ranking::{self, BestSymbol, MostTraded};

use super::{AppState, WebError};

pub async fn summary(State(state): State<Arc<AppState>>) -> Json<Vec<SymbolSummary>> {
    Json(aggregate::symbol_summary(&state.snapshot.current()))
}

pub async fn trend(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<Vec<TrendPoint>>, WebError> {
    let points = aggregate::symbol_trend(&state.snapshot.current(), &symbol)?;
    Ok(Json(points))
}

pub async fn symbols(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(aggregate::distinct_symbols(&state.snapshot.current()))
}

pub async fn best_symbol(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BestSymbol>, WebError> {
    Ok(Json(ranking::best_symbol_by_value(&state.snapshot.current())?))
}

pub async fn most_used(State(state): State<Arc<AppState>>) -> Result<Json<MostTraded>, WebError> {
    Ok(Json(ranking::most_traded_symbol(&state.snapshot.current())?))
}

pub async fn buy_sell_trend(State(state): State<Arc<AppState>>) -> Json<Vec<BuySellBucket>> {
    Json(aggregate::buy_sell_trend(&state.snapshot.current()))
}

pub async fn busiest_day(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DailyVolume>, WebError> {
    Ok(Json(ranking::busiest_day(&state.snapshot.current())?))
}

pub async fn busiest_days(State(state): State<Arc<AppState>>) -> Json<Vec<SymbolDailyVolume>> {
    Json(ranking::busiest_day_per_symbol(&state.snapshot.current()))
}

#[derive(Debug, serde::Serialize)]
pub struct ReloadResponse {
    pub generation: u64,
    pub records: usize,
}

/// Re-read the trade store and swap the snapshot.
pub async fn reload(State(state): State<Arc<AppState>>) -> Result<Json<ReloadResponse>, WebError> {
    let port = Arc::clone(&state.trade_port);
    let snapshot = Arc::clone(&state.snapshot);
    let (generation, records) =
        tokio::task::spawn_blocking(move || snapshot.reload_with(|| port.load_trades()))
            .await
            .map_err(|e| WebError::internal(format!("reload task failed: {e}")))??;

    Ok(Json(ReloadResponse {
        generation,
        records,
    }))
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    let records = state.snapshot.current();
    let summary = aggregate::symbol_summary(&records);
    let template = super::templates::DashboardTemplate {
        trade_count: records.len(),
        summary: &summary,
        busiest: ranking::busiest_day(&records).ok(),
        most_traded: ranking::most_traded_symbol(&records).ok(),
        best: ranking::best_symbol_by_value(&records).ok(),
        buy_sell: super::templates::buy_sell_series(&aggregate::buy_sell_trend(&records)),
    };
    template
        .render()
        .map(Html)
        .map_err(|e| WebError::internal(e.to_string()))
}

pub async fn trend_page(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Html<String>, WebError> {
    let points = aggregate::symbol_trend(&state.snapshot.current(), &symbol)?;
    let template = super::templates::TrendTemplate {
        symbol: &symbol,
        points: &points,
    };
    template
        .render()
        .map(Html)
        .map_err(|e| WebError::internal(e.to_string()))
}

pub async fn not_found() -> WebError {
    WebError::not_found("no such route")
}
