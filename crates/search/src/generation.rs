//! Stale-response guard for in-flight search requests.
//!
//! Each outgoing request takes a generation id; when a newer request
//! starts, responses carrying an older id are discarded by the caller.
//! Cancellation is cooperative — the old request still completes, its
//! result just goes unused.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RequestGeneration(AtomicU64);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; every earlier id becomes stale.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, id: u64) -> bool {
        self.0.load(Ordering::SeqCst) == id
    }
}
