//! Change notifications for subscribed views.

use tokio::sync::broadcast;

/// Which part of the application state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreEvent {
    SessionChanged,
    ProjectsChanged,
    ApplicationsChanged,
    EventsChanged,
    BadgesAwarded,
    RegistrationsChanged,
    FeedChanged,
}

/// Fan-out of [`StoreEvent`]s to any number of subscribers.
///
/// Events are published after a mutation has been committed. Slow
/// subscribers lose the oldest events once `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<StoreEvent>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: StoreEvent) {
        // No subscribers is the normal state for headless use.
        let receivers = self.tx.send(event).unwrap_or(0);
        tracing::trace!(?event, receivers, "published store event");
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(nexus_shared::constants::DEFAULT_NOTIFY_CAPACITY)
    }
}
