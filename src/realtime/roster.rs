//! Live roster: full snapshots of the `team` table pushed to subscribers.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use super::{ChangeFeed, Table};
use crate::errors::AppError;
use crate::models::TeamMember;

/// An immutable, complete roster snapshot.
pub type Roster = Arc<Vec<TeamMember>>;

/// Where roster snapshots are read from.
pub trait RosterSource: Send + Sync + 'static {
    fn fetch_roster(&self) -> impl Future<Output = Result<Vec<TeamMember>, AppError>> + Send;
}

/// Pushes the whole roster to each subscriber, once on subscribe and again
/// after every write to the `team` table.
pub struct RosterFeed<S> {
    source: Arc<S>,
    changes: ChangeFeed,
}

impl<S: RosterSource> RosterFeed<S> {
    pub fn new(source: Arc<S>, changes: ChangeFeed) -> Self {
        Self { source, changes }
    }

    /// Start delivering snapshots to `callback` until the returned
    /// [`Subscription`] is unsubscribed or dropped.
    ///
    /// Every subscriber gets its own initial fetch and its own stream. Each
    /// snapshot is a full replacement of the previous one.
    pub fn subscribe<F>(&self, mut callback: F) -> Subscription
    where
        F: FnMut(Roster) + Send + 'static,
    {
        let source = Arc::clone(&self.source);
        // Subscribe before the initial fetch so a write landing in between
        // still triggers a refetch.
        let mut changes = self.changes.subscribe();

        let task = tokio::spawn(async move {
            deliver(source.as_ref(), &mut callback).await;

            loop {
                match changes.recv().await {
                    Ok(change) if change.table == Table::Team => {
                        deliver(source.as_ref(), &mut callback).await;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Roster feed lagged behind, refetching");
                        deliver(source.as_ref(), &mut callback).await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Subscription {
            task: task.abort_handle(),
        }
    }
}

async fn deliver<S, F>(source: &S, callback: &mut F)
where
    S: RosterSource,
    F: FnMut(Roster),
{
    match source.fetch_roster().await {
        Ok(members) => {
            tracing::debug!(members = members.len(), "Delivering roster snapshot");
            callback(Arc::new(members));
        }
        Err(e) => {
            tracing::warn!("Roster fetch failed, keeping previous snapshot: {}", e);
        }
    }
}

/// Handle to a running roster subscription.
///
/// Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    task: AbortHandle,
}

impl Subscription {
    /// Stop delivery and release the change channel. Repeated calls are no-ops.
    pub fn unsubscribe(&self) {
        self.task.abort();
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Process-wide roster shared by all request handlers.
///
/// The feed callback is the only writer; readers get immutable snapshots.
pub struct RosterCache {
    rx: watch::Receiver<Option<Roster>>,
    subscription: Subscription,
}

impl RosterCache {
    pub fn spawn<S: RosterSource>(feed: &RosterFeed<S>) -> Self {
        let (tx, rx) = watch::channel(None);
        let subscription = feed.subscribe(move |roster| {
            tx.send_replace(Some(roster));
        });

        Self { rx, subscription }
    }

    /// Latest snapshot, empty until the first delivery.
    pub fn snapshot(&self) -> Roster {
        self.rx.borrow().clone().unwrap_or_default()
    }

    pub fn is_loaded(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait for the first snapshot to arrive.
    pub async fn wait_loaded(&self) -> Roster {
        let mut rx = self.watch();
        let loaded = rx.wait_for(Option::is_some).await.map(|r| (*r).clone());
        match loaded {
            Ok(roster) => roster.unwrap_or_default(),
            Err(_) => self.snapshot(),
        }
    }

    /// Receiver notified on every replacement.
    pub fn watch(&self) -> watch::Receiver<Option<Roster>> {
        self.rx.clone()
    }

    /// Whether snapshots are still being delivered.
    pub fn is_live(&self) -> bool {
        self.subscription.is_active()
    }

    /// Stop following the store. The last snapshot stays readable.
    pub fn close(&self) {
        self.subscription.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use tokio::sync::mpsc;
    use tokio::time::timeout;

    use super::*;
    use crate::fixtures::member;
    use crate::realtime::{ChangeKind, TableChange};

    /// Source that replays scripted responses, repeating the last one.
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<Vec<TeamMember>, AppError>>>,
        last: Mutex<Vec<TeamMember>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Vec<TeamMember>, AppError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                last: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl RosterSource for ScriptedSource {
        fn fetch_roster(&self) -> impl Future<Output = Result<Vec<TeamMember>, AppError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            let result = match next {
                Some(Ok(members)) => {
                    *self.last.lock().unwrap() = members.clone();
                    Ok(members)
                }
                Some(Err(e)) => Err(e),
                None => Ok(self.last.lock().unwrap().clone()),
            };
            async move { result }
        }
    }

    fn team_change(revision_id: i64) -> TableChange {
        TableChange {
            table: Table::Team,
            kind: ChangeKind::Update,
            row_id: "u1".to_string(),
            revision_id,
        }
    }

    async fn next(rx: &mut mpsc::UnboundedReceiver<Roster>) -> Roster {
        timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for snapshot")
            .expect("feed closed")
    }

    async fn wait_until(cache: &RosterCache, pred: impl Fn(&[TeamMember]) -> bool) {
        let mut rx = cache.watch();
        timeout(
            Duration::from_secs(2),
            rx.wait_for(|r| r.as_deref().is_some_and(|members| pred(members))),
        )
        .await
        .expect("timed out waiting for roster")
        .expect("roster feed closed");
    }

    #[tokio::test]
    async fn test_initial_snapshot_then_snapshot_per_team_change() {
        let source = ScriptedSource::new(vec![
            Ok(vec![member("u1", "Anna")]),
            Ok(vec![member("u1", "Anna"), member("u2", "Bo")]),
        ]);
        let changes = ChangeFeed::new();
        let feed = RosterFeed::new(Arc::clone(&source), changes.clone());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let _sub = feed.subscribe(move |roster| {
            let _ = tx.send(roster);
        });

        assert_eq!(next(&mut rx).await.len(), 1);

        // Other tables do not trigger a refetch.
        changes.publish(TableChange {
            table: Table::Trips,
            ..team_change(1)
        });
        changes.publish(team_change(2));

        assert_eq!(next(&mut rx).await.len(), 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_subscribers_are_independent() {
        let source = ScriptedSource::new(vec![Ok(vec![member("u1", "Anna")])]);
        let feed = RosterFeed::new(Arc::clone(&source), ChangeFeed::new());

        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let sub_a = feed.subscribe(move |r| {
            let _ = tx_a.send(r);
        });
        let sub_b = feed.subscribe(move |r| {
            let _ = tx_b.send(r);
        });

        assert_eq!(next(&mut rx_a).await[0].name, "Anna");
        assert_eq!(next(&mut rx_b).await[0].name, "Anna");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        // Dropping one subscriber leaves the other running.
        drop(sub_a);
        assert!(sub_b.is_active());
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery_and_is_idempotent() {
        let source = ScriptedSource::new(vec![Ok(vec![member("u1", "Anna")])]);
        let changes = ChangeFeed::new();
        let feed = RosterFeed::new(source, changes.clone());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let sub = feed.subscribe(move |r| {
            let _ = tx.send(r);
        });
        next(&mut rx).await;

        sub.unsubscribe();
        sub.unsubscribe();
        changes.publish(team_change(1));

        // The aborted task drops the callback, closing the channel without
        // delivering anything further.
        let after = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("channel should close");
        assert!(after.is_none());
        assert!(!sub.is_active());
    }

    #[tokio::test]
    async fn test_empty_push_followed_by_full_snapshot_ends_on_full() {
        let source = ScriptedSource::new(vec![
            Ok(vec![member("u1", "Anna")]),
            Ok(Vec::new()),
            Ok(vec![member("u1", "Anna"), member("u2", "Bo")]),
        ]);
        let changes = ChangeFeed::new();
        let feed = RosterFeed::new(source, changes.clone());
        let cache = RosterCache::spawn(&feed);

        assert_eq!(cache.wait_loaded().await.len(), 1);

        changes.publish(team_change(1));
        changes.publish(team_change(2));

        wait_until(&cache, |members| members.len() == 2).await;
        assert_eq!(cache.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_previous_snapshot() {
        let source = ScriptedSource::new(vec![
            Ok(vec![member("u1", "Anna")]),
            Err(AppError::Database("connection reset".to_string())),
            Ok(vec![member("u1", "Anna"), member("u2", "Bo")]),
        ]);
        let changes = ChangeFeed::new();
        let feed = RosterFeed::new(Arc::clone(&source), changes.clone());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let _sub = feed.subscribe(move |r| {
            let _ = tx.send(r);
        });
        assert_eq!(next(&mut rx).await.len(), 1);

        changes.publish(team_change(1));
        changes.publish(team_change(2));

        // The failed fetch delivers nothing; the next snapshot is the good one.
        assert_eq!(next(&mut rx).await.len(), 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_cache_is_empty_until_loaded() {
        let source = ScriptedSource::new(vec![Ok(vec![member("u1", "Anna")])]);
        let feed = RosterFeed::new(source, ChangeFeed::new());
        let cache = RosterCache::spawn(&feed);

        // Nothing has run yet on the current-thread test runtime.
        assert!(!cache.is_loaded());
        assert!(cache.snapshot().is_empty());

        cache.wait_loaded().await;
        assert!(cache.is_loaded());
    }

    #[tokio::test]
    async fn test_closed_cache_keeps_last_snapshot() {
        let source = ScriptedSource::new(vec![Ok(vec![member("u1", "Anna")])]);
        let feed = RosterFeed::new(source, ChangeFeed::new());
        let cache = RosterCache::spawn(&feed);
        cache.wait_loaded().await;
        assert!(cache.is_live());

        cache.close();
        timeout(Duration::from_secs(2), async {
            while cache.is_live() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("feed task should stop");
        assert_eq!(cache.snapshot().len(), 1);
    }
}
