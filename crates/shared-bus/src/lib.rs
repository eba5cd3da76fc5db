//! # Shared Bus - Event Bus for Ledger Observers
//!
//! The engine publishes one or more `LedgerEvent`s after every committed
//! mutation. Observers (dashboards, indexers, the runtime's event logger)
//! subscribe with an `EventFilter` and never touch ledger tables directly.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │    Engine    │                    │   Observer   │
//! │              │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! ## Ordering
//!
//! Events are published while the engine still holds its write lock, so every
//! subscriber sees them in commit order. A subscriber that falls more than
//! `capacity` events behind skips the overflow and keeps going.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, LedgerEvent};
pub use publisher::{EventPublisher, InMemoryEventBus, NoOpPublisher};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
