//! Core domain entities for the Activity Log.

use serde::{Deserialize, Serialize};

pub use shared_types::{
    ActivityId, ActivityType, Address, BatchId, LedgerError, LedgerResult, Timestamp,
};

/// One audit entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Log-assigned id, starting at 1.
    pub id: ActivityId,
    /// What happened.
    pub activity_type: ActivityType,
    /// Who did it.
    pub actor: Address,
    /// When it was recorded.
    pub timestamp: Timestamp,
    /// Id of the user, batch or transfer it concerns. 0 when none.
    pub related_id: u64,
    /// Human-readable summary.
    pub description: String,
    /// Opaque payload, hex-encoded when serialized.
    #[serde(with = "hex::serde")]
    pub data: Vec<u8>,
}

/// A custody annotation on a batch, e.g. "Harvested" at a farm.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEvent {
    /// Short label for what happened to the batch.
    pub event_type: String,
    /// Where it happened. May be empty.
    #[serde(default)]
    pub location: String,
    /// Opaque payload stored as the activity's data.
    #[serde(default)]
    pub metadata: String,
}

impl BatchEvent {
    /// Creates an event with no metadata.
    pub fn new(event_type: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            location: location.into(),
            metadata: String::new(),
        }
    }

    /// Attaches a metadata payload.
    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = metadata.into();
        self
    }

    /// Checks the event is recordable.
    ///
    /// # Errors
    /// - `InvalidInput` if `event_type` is blank
    pub fn validate(&self) -> LedgerResult<()> {
        if self.event_type.trim().is_empty() {
            return Err(LedgerError::InvalidInput {
                field: "event_type",
                reason: "must not be blank",
            });
        }
        Ok(())
    }

    /// The activity description: `"{event_type} @ {location}"`, or just the
    /// event type when there is no location.
    pub fn description(&self) -> String {
        let event_type = self.event_type.trim();
        let location = self.location.trim();
        if location.is_empty() {
            event_type.to_string()
        } else {
            format!("{} @ {}", event_type, location)
        }
    }
}
