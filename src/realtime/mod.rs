//! Per-table change notifications and the live roster built on top of them.
//!
//! The repository publishes a [`TableChange`] after every committed write.
//! Subscribers never receive row payloads, only the fact that a table changed,
//! and refetch what they need.

mod roster;

pub use roster::*;

use tokio::sync::broadcast;

/// Buffered notifications per subscriber before it starts lagging.
const CHANNEL_CAPACITY: usize = 256;

/// Tables that publish change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Team,
    Content,
    TimeEntries,
    Trips,
    Gear,
    Clients,
    Notes,
}

impl Table {
    /// Backend table name.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Team => "team",
            Table::Content => "content",
            Table::TimeEntries => "time_entries",
            Table::Trips => "trips",
            Table::Gear => "gear",
            Table::Clients => "client",
            Table::Notes => "notes",
        }
    }
}

/// What happened to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A committed write to one row of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableChange {
    pub table: Table,
    pub kind: ChangeKind,
    pub row_id: String,
    pub revision_id: i64,
}

/// Broadcast channel of table changes shared by the repository and its listeners.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<TableChange>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish a change to every current subscriber.
    pub fn publish(&self, change: TableChange) {
        tracing::debug!(
            table = change.table.name(),
            kind = ?change.kind,
            row_id = %change.row_id,
            revision_id = change.revision_id,
            "Publishing table change"
        );
        // No receivers just means nobody is listening yet.
        let _ = self.tx.send(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TableChange> {
        self.tx.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
