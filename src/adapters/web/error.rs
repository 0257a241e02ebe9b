//! HTTP error responses for the web adapter.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::error::TradeStatsError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

pub fn status_from_error(err: &TradeStatsError) -> StatusCode {
    match err {
        TradeStatsError::SymbolNotFound { .. } | TradeStatsError::EmptyDataset { .. } => {
            StatusCode::NOT_FOUND
        }
        TradeStatsError::ConfigMissing { .. }
        | TradeStatsError::ConfigInvalid { .. }
        | TradeStatsError::ConfigParse { .. } => StatusCode::BAD_REQUEST,
        TradeStatsError::Ingest { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        TradeStatsError::Database { .. }
        | TradeStatsError::DatabaseQuery { .. }
        | TradeStatsError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<TradeStatsError> for WebError {
    fn from(err: TradeStatsError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}
