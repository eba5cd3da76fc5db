//! Core domain entities for the Transfer Workflow.

use serde::{Deserialize, Serialize};

pub use shared_types::{
    Address, BatchId, LedgerError, LedgerResult, Timestamp, TransferId, TransferStatus, U256,
};

/// A request to move `amount` of a batch from `from` to `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Workflow-assigned id, starting at 1.
    pub id: TransferId,
    /// Sender.
    pub from: Address,
    /// Recipient. The only address that may resolve the transfer.
    pub to: Address,
    /// Batch being moved.
    pub token_id: BatchId,
    /// Request time.
    pub date_created: Timestamp,
    /// Quantity in base units. Always positive.
    #[serde(with = "shared_types::quantity")]
    pub amount: U256,
    /// Current state.
    pub status: TransferStatus,
}

impl Transfer {
    /// Returns true while the recipient can still act on it.
    pub fn is_pending(&self) -> bool {
        self.status == TransferStatus::Pending
    }

    /// Returns true if `address` is the sender or the recipient.
    pub fn involves(&self, address: &Address) -> bool {
        self.from == *address || self.to == *address
    }
}
