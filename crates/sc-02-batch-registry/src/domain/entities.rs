//! Core domain entities for the Batch Registry.

use serde::{Deserialize, Serialize};

// Re-export from shared-types for convenience
pub use shared_types::{Address, BatchId, LedgerError, LedgerResult, Timestamp, U256};

/// An immutable production batch.
///
/// Nothing on a batch changes after creation. Quantity moves through the
/// balance table, never through this record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Registry-assigned id, starting at 1.
    pub id: BatchId,
    /// Address that created the batch and received its whole supply.
    pub creator: Address,
    /// Product name, e.g. "Coffee Lot 1".
    pub name: String,
    /// Quantity in base units (grams with the default 3 decimals).
    #[serde(with = "shared_types::quantity")]
    pub total_supply: U256,
    /// Opaque descriptive payload, commonly JSON.
    pub features: String,
    /// Batch this one was derived from. `None` for a root batch.
    pub parent_id: Option<BatchId>,
    /// Creation time.
    pub date_created: Timestamp,
}

impl Batch {
    /// A batch counts as valid for display when it has quantity and a name.
    pub fn is_valid(&self) -> bool {
        !self.total_supply.is_zero() && !self.name.trim().is_empty()
    }

    /// Returns true if this batch has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Parameters for creating a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBatch {
    /// Product name.
    pub name: String,
    /// Full quantity, credited to the creator.
    #[serde(with = "shared_types::quantity")]
    pub total_supply: U256,
    /// Opaque descriptive payload.
    #[serde(default)]
    pub features: String,
    /// Optional provenance parent.
    #[serde(default)]
    pub parent_id: Option<BatchId>,
}

impl NewBatch {
    /// Creates a root batch request with no features.
    pub fn new(name: impl Into<String>, total_supply: U256) -> Self {
        Self {
            name: name.into(),
            total_supply,
            features: String::new(),
            parent_id: None,
        }
    }

    /// Sets the features payload.
    pub fn with_features(mut self, features: impl Into<String>) -> Self {
        self.features = features.into();
        self
    }

    /// Links the batch to a parent.
    pub fn with_parent(mut self, parent_id: BatchId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}
