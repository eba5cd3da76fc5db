//! # Ledger Events
//!
//! Defines every event that flows through the shared bus. Each committed
//! mutation publishes its domain event followed by an `ActivityRecorded`
//! event for the audit entry it produced.

use serde::{Deserialize, Serialize};
use shared_types::{
    ActivityId, ActivityType, Address, BatchId, Timestamp, TransferId, UserStatus, U256,
};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    // =========================================================================
    // ACTOR DIRECTORY
    // =========================================================================
    /// An address asked to join with a role. Its user starts out Pending.
    UserRoleRequested {
        /// The requesting address.
        user: Address,
        /// The requested role label.
        role: String,
    },

    /// A user's status was set, either by a status change or by a direct
    /// admin registration.
    UserStatusChanged {
        /// The affected address.
        user: Address,
        /// The status now in force.
        status: UserStatus,
    },

    // =========================================================================
    // BATCH REGISTRY
    // =========================================================================
    /// A batch was created and its whole supply credited to the creator.
    TokenCreated {
        /// The new batch id.
        token_id: BatchId,
        /// The creating address.
        creator: Address,
        /// Batch name.
        name: String,
        /// Total supply in base units.
        #[serde(with = "shared_types::quantity")]
        total_supply: U256,
    },

    // =========================================================================
    // TRANSFER WORKFLOW
    // =========================================================================
    /// A transfer was requested and is awaiting the recipient.
    TransferRequested {
        /// The new transfer id.
        transfer_id: TransferId,
        /// Sender.
        from: Address,
        /// Recipient.
        to: Address,
        /// Batch being moved.
        token_id: BatchId,
        /// Amount in base units.
        #[serde(with = "shared_types::quantity")]
        amount: U256,
    },

    /// A transfer was accepted and its balance moved.
    TransferAccepted {
        /// The transfer id.
        transfer_id: TransferId,
        /// Sender.
        from: Address,
        /// Recipient.
        to: Address,
    },

    /// A transfer was rejected; no balance moved.
    TransferRejected {
        /// The transfer id.
        transfer_id: TransferId,
        /// Sender.
        from: Address,
        /// Recipient.
        to: Address,
    },

    // =========================================================================
    // ACTIVITY LOG
    // =========================================================================
    /// An audit entry was appended.
    ActivityRecorded {
        /// The new activity id.
        activity_id: ActivityId,
        /// Kind of activity.
        activity_type: ActivityType,
        /// Address that performed the action.
        actor: Address,
        /// Time of recording.
        timestamp: Timestamp,
    },
}

impl LedgerEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::UserRoleRequested { .. } | Self::UserStatusChanged { .. } => {
                EventTopic::Directory
            }
            Self::TokenCreated { .. } => EventTopic::Registry,
            Self::TransferRequested { .. }
            | Self::TransferAccepted { .. }
            | Self::TransferRejected { .. } => EventTopic::Transfers,
            Self::ActivityRecorded { .. } => EventTopic::Activity,
        }
    }

    /// Returns true if `address` is a party to this event.
    #[must_use]
    pub fn involves(&self, address: &Address) -> bool {
        match self {
            Self::UserRoleRequested { user, .. } | Self::UserStatusChanged { user, .. } => {
                user == address
            }
            Self::TokenCreated { creator, .. } => creator == address,
            Self::TransferRequested { from, to, .. }
            | Self::TransferAccepted { from, to, .. }
            | Self::TransferRejected { from, to, .. } => from == address || to == address,
            Self::ActivityRecorded { actor, .. } => actor == address,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// User registration and status events.
    Directory,
    /// Batch creation events.
    Registry,
    /// Transfer lifecycle events.
    Transfers,
    /// Audit log appends.
    Activity,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Parties to include. Empty means any party.
    pub parties: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            parties: Vec::new(),
        }
    }

    /// Create a filter for events involving any of the given addresses.
    #[must_use]
    pub fn parties(parties: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            parties,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let party_match =
            self.parties.is_empty() || self.parties.iter().any(|p| event.involves(p));

        topic_match && party_match
    }
}
