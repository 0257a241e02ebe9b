//! Core domain types and the trade aggregation engine.

pub mod trade;
pub mod normalize;
pub mod aggregate;
pub mod ranking;
pub mod snapshot;
pub mod error;
