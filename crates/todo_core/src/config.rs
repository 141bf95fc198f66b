//! Entity-store configuration.
//!
//! # Invariants
//! - `list_delay` defaults to 200 ms of simulated read latency.
//! - `id_length` is at least 1.

use crate::model::entity::DEFAULT_ID_LENGTH;
use std::time::Duration;

/// Default simulated latency applied to every collection read.
pub const DEFAULT_LIST_DELAY: Duration = Duration::from_millis(200);

/// Tunables for `EntityStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Delay before a collection read resolves.
    pub list_delay: Duration,
    /// Length of ids generated on create.
    pub id_length: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            list_delay: DEFAULT_LIST_DELAY,
            id_length: DEFAULT_ID_LENGTH,
        }
    }
}

impl StoreConfig {
    /// Config without simulated latency, for tools and tests.
    pub fn immediate() -> Self {
        Self::default().with_list_delay(Duration::ZERO)
    }

    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = delay;
        self
    }

    pub fn with_id_length(mut self, length: usize) -> Self {
        self.id_length = length.max(1);
        self
    }
}
