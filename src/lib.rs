//! tradestats: descriptive statistics over a ledger of equity trades.
//!
//! Hexagonal architecture: the aggregation engine and its types live in
//! [`domain`], port traits in [`ports`], concrete implementations in
//! [`adapters`], and the command surface in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
