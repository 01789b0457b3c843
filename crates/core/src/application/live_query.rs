// Live Query Hub - push refreshed result sets to list subscribers

use crate::domain::Application;
use std::collections::HashMap;
use tokio::sync::{watch, Mutex, MutexGuard};
use tracing::debug;

/// Subscription to one owner's application list.
///
/// Backed by a watch channel: a slow reader only ever sees the latest list,
/// intermediate refreshes are coalesced.
pub struct ApplicationSubscription {
    rx: watch::Receiver<Vec<Application>>,
}

impl ApplicationSubscription {
    /// Subscription that stays empty forever (unauthenticated callers)
    pub fn empty() -> Self {
        let (_tx, rx) = watch::channel(Vec::new());
        Self { rx }
    }

    /// Latest list seen by this subscription
    pub fn current(&self) -> Vec<Application> {
        self.rx.borrow().clone()
    }

    /// Whether a refresh arrived that `changed` has not returned yet
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next refresh.
    ///
    /// Returns `None` once the hub has dropped the owner's channel.
    pub async fn changed(&mut self) -> Option<Vec<Application>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

/// Per-owner publish/subscribe registry.
///
/// Channels are created on first subscribe and pruned on publish once every
/// subscriber is gone.
#[derive(Default)]
pub struct LiveQueryHub {
    channels: Mutex<HashMap<String, watch::Sender<Vec<Application>>>>,
    snapshots: Mutex<()>,
}

impl LiveQueryHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize "read the store, then publish or subscribe".
    ///
    /// Hold the guard across the store read and the following `publish` or
    /// `subscribe`, so a snapshot read earlier can never overwrite one read
    /// later.
    pub async fn snapshot_guard(&self) -> MutexGuard<'_, ()> {
        self.snapshots.lock().await
    }

    /// Register interest in `owner`'s list.
    ///
    /// `initial` seeds a new channel; an existing channel already holds the
    /// latest published list and keeps it.
    pub async fn subscribe(
        &self,
        owner: &str,
        initial: Vec<Application>,
    ) -> ApplicationSubscription {
        let mut channels = self.channels.lock().await;

        if let Some(tx) = channels.get(owner) {
            if !tx.is_closed() {
                return ApplicationSubscription { rx: tx.subscribe() };
            }
        }

        let (tx, rx) = watch::channel(initial);
        channels.insert(owner.to_string(), tx);
        debug!(owner = %owner, "Live query channel opened");
        ApplicationSubscription { rx }
    }

    /// Whether anyone is still listening for `owner`
    pub async fn has_subscribers(&self, owner: &str) -> bool {
        self.subscriber_count(owner).await > 0
    }

    pub async fn subscriber_count(&self, owner: &str) -> usize {
        self.channels
            .lock()
            .await
            .get(owner)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    /// Number of owners with an open channel
    pub async fn channel_count(&self) -> usize {
        self.channels.lock().await.len()
    }

    /// Drop `owner`'s channel if nobody listens any more
    pub async fn prune(&self, owner: &str) {
        let mut channels = self.channels.lock().await;
        if channels.get(owner).is_some_and(|tx| tx.receiver_count() == 0) {
            channels.remove(owner);
            debug!(owner = %owner, "Live query channel pruned");
        }
    }

    /// Deliver a refreshed list to every subscriber of `owner`
    pub async fn publish(&self, owner: &str, applications: Vec<Application>) {
        let mut channels = self.channels.lock().await;

        let Some(tx) = channels.get(owner) else {
            return;
        };

        if tx.receiver_count() == 0 {
            channels.remove(owner);
            debug!(owner = %owner, "Live query channel pruned");
            return;
        }

        tx.send_replace(applications);
    }
}
