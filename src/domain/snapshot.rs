//! Shared, read-only trade set with swap-based reload.
//!
//! Readers load an `Arc` to the current state and keep it for the
//! duration of a query. A reload builds a fresh state and swaps the
//! pointer; readers already holding the old state are unaffected. The
//! generation number travels inside the swapped state, so a record set
//! and its generation are always observed together.

use super::error::TradeStatsError;
use super::normalize::normalize;
use super::trade::{RawTrade, TradeRecord};
use arc_swap::ArcSwap;
use std::sync::Arc;

pub type Records = Arc<[TradeRecord]>;

/// One published record set.
#[derive(Debug)]
pub struct SnapshotState {
    pub generation: u64,
    pub records: Records,
}

#[derive(Debug)]
pub struct TradeSnapshot {
    state: ArcSwap<SnapshotState>,
}

impl TradeSnapshot {
    pub fn new(records: Vec<TradeRecord>) -> Self {
        Self {
            state: ArcSwap::from_pointee(SnapshotState {
                generation: 0,
                records: records.into(),
            }),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Normalize raw trades and wrap them.
    pub fn from_raw(raw: &[RawTrade]) -> Self {
        Self::new(normalize(raw))
    }

    /// Records and generation as of this call.
    pub fn state(&self) -> Arc<SnapshotState> {
        self.state.load_full()
    }

    /// The record set as of this call.
    pub fn current(&self) -> Records {
        Arc::clone(&self.state.load().records)
    }

    /// Swap in a new record set. Returns the generation it was published as.
    pub fn replace(&self, records: Vec<TradeRecord>) -> u64 {
        let count = records.len();
        let records: Records = records.into();

        // Read-modify-swap; retry if another reload won the race.
        let generation = loop {
            let current = self.state.load();
            let next = Arc::new(SnapshotState {
                generation: current.generation + 1,
                records: Arc::clone(&records),
            });
            let generation = next.generation;
            let previous = self.state.compare_and_swap(&current, next);
            if Arc::ptr_eq(&previous, &current) {
                break generation;
            }
        };

        tracing::info!(generation, records = count, "trade snapshot replaced");
        generation
    }

    /// Load raw trades with `load` and publish them. On error the current
    /// state is left as it was. Returns the new generation and record count.
    pub fn reload_with<F>(&self, load: F) -> Result<(u64, usize), TradeStatsError>
    where
        F: FnOnce() -> Result<Vec<RawTrade>, TradeStatsError>,
    {
        let records = normalize(&load()?);
        let count = records.len();
        Ok((self.replace(records), count))
    }

    pub fn generation(&self) -> u64 {
        self.state.load().generation
    }

    pub fn len(&self) -> usize {
        self.state.load().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.load().records.is_empty()
    }
}

impl Default for TradeSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
