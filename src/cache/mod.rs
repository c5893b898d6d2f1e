//! Last-known-good snapshots of collections read from the store.
//!
//! When a read fails the dashboard keeps serving the previous snapshot instead
//! of an empty view. Each fetch takes a ticket up front; a fetch that finishes
//! after a newer one has already been recorded is discarded, so a slow
//! response can never roll the snapshot back.

use std::sync::Arc;

use tokio::sync::RwLock;

/// Ticket identifying one fetch, ordered by start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug)]
struct Slot<T> {
    issued: u64,
    recorded: Option<FetchTicket>,
    value: Option<Arc<T>>,
}

/// Holds the freshest successfully fetched value of `T`.
#[derive(Debug)]
pub struct LastGood<T> {
    slot: RwLock<Slot<T>>,
}

/// Result of reading through a [`LastGood`].
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub value: Arc<T>,
    /// True when the fetch failed and an older value is being served
    pub stale: bool,
}

impl<T> LastGood<T> {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(Slot {
                issued: 0,
                recorded: None,
                value: None,
            }),
        }
    }

    /// Start a fetch.
    pub async fn begin(&self) -> FetchTicket {
        let mut slot = self.slot.write().await;
        slot.issued += 1;
        FetchTicket(slot.issued)
    }

    /// Record the value fetched under `ticket`.
    ///
    /// Returns false, leaving the snapshot untouched, when a newer fetch has
    /// already been recorded.
    pub async fn record(&self, ticket: FetchTicket, value: Arc<T>) -> bool {
        let mut slot = self.slot.write().await;
        if slot.recorded.is_some_and(|newest| newest > ticket) {
            tracing::debug!(ticket = ticket.0, "Discarding superseded fetch result");
            return false;
        }
        slot.recorded = Some(ticket);
        slot.value = Some(value);
        true
    }

    pub async fn current(&self) -> Option<Arc<T>> {
        self.slot.read().await.value.clone()
    }

    /// Record a fetch outcome and return what should be served.
    ///
    /// On success the fresh value is served even when a newer fetch already
    /// replaced the shared snapshot. On failure the previous value is served
    /// as stale; without one the error is returned.
    pub async fn resolve<E>(
        &self,
        ticket: FetchTicket,
        fetched: Result<T, E>,
    ) -> Result<Snapshot<T>, E> {
        match fetched {
            Ok(value) => {
                let value = Arc::new(value);
                self.record(ticket, Arc::clone(&value)).await;
                Ok(Snapshot {
                    value,
                    stale: false,
                })
            }
            Err(e) => match self.current().await {
                Some(value) => Ok(Snapshot { value, stale: true }),
                None => Err(e),
            },
        }
    }
}

impl<T> Default for LastGood<T> {
    fn default() -> Self {
        Self::new()
    }
}
