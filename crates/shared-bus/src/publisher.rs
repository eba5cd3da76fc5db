//! # Event Publisher
//!
//! The engine side of the bus. Publishing never blocks and never fails: with
//! no subscribers an event is simply dropped.

use crate::events::{EventFilter, LedgerEvent};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::trace;

/// Sink for committed ledger events.
///
/// Called from inside a committed operation, so implementations must not
/// suspend or take the ledger lock.
pub trait EventPublisher: Send + Sync {
    /// Hands `event` to every current subscriber. Returns how many received it.
    fn publish(&self, event: LedgerEvent) -> usize;
}

/// Broadcast bus shared by the engine and its observers.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<LedgerEvent>,
    published: AtomicU64,
    capacity: usize,
}

impl InMemoryEventBus {
    /// Bus buffering [`DEFAULT_CHANNEL_CAPACITY`] events per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus buffering `capacity` events per subscriber.
    ///
    /// # Panics
    /// If `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Opens a subscription. Only events published afterwards are delivered.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        trace!(topics = ?filter.topics, parties = filter.parties.len(), "Subscribed");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Per-subscriber buffer size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events published since creation, delivered or not.
    #[must_use]
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: LedgerEvent) -> usize {
        self.published.fetch_add(1, Ordering::Relaxed);
        let topic = event.topic();
        // send only fails when nobody is listening.
        let delivered = self.sender.send(event).unwrap_or(0);
        trace!(?topic, delivered, "Event published");
        delivered
    }
}

/// Publisher that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpPublisher;

impl EventPublisher for NoOpPublisher {
    fn publish(&self, _event: LedgerEvent) -> usize {
        0
    }
}

impl<P: EventPublisher + ?Sized> EventPublisher for Arc<P> {
    fn publish(&self, event: LedgerEvent) -> usize {
        (**self).publish(event)
    }
}
