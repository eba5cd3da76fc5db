//! # Inbound Port - TransferWorkflowApi
//!
//! ## Authorization
//!
//! | Method | Authorized Caller |
//! |--------|-------------------|
//! | `request_transfer` | Registered, Approved sender |
//! | `accept_transfer` | The transfer's recipient |
//! | `reject_transfer` | The transfer's recipient |
//! | reads | Anyone |

use crate::domain::{Address, BatchId, LedgerResult, Transfer, TransferId, U256};

/// Primary API for the Transfer Workflow subsystem.
pub trait TransferWorkflowApi: Send + Sync {
    /// Opens a Pending transfer of `amount` units of `batch_id` to `to`.
    ///
    /// # Errors
    /// - `NotRegistered` / `NotApproved`: sender may not write
    /// - `InvalidRecipient`: `to == from`
    /// - `NotFound`: unknown batch
    /// - `InvalidQuantity`: zero amount
    /// - `InsufficientBalance`: sender holds less than `amount`
    fn request_transfer(
        &self,
        from: Address,
        to: Address,
        batch_id: BatchId,
        amount: U256,
    ) -> LedgerResult<TransferId>;

    /// Accepts a Pending transfer addressed to `caller`.
    ///
    /// # Errors
    /// - `NotFound`, `Unauthorized`, `InvalidState`
    /// - `InsufficientBalance`: sender's balance has since dropped
    fn accept_transfer(&self, caller: Address, transfer_id: TransferId) -> LedgerResult<()>;

    /// Rejects a Pending transfer addressed to `caller`.
    ///
    /// # Errors
    /// - `NotFound`, `Unauthorized`, `InvalidState`
    fn reject_transfer(&self, caller: Address, transfer_id: TransferId) -> LedgerResult<()>;

    /// Gets a transfer by id.
    fn get_transfer(&self, id: TransferId) -> LedgerResult<Transfer>;

    /// Pending transfers awaiting `recipient`.
    fn get_pending_transfers(&self, recipient: &Address) -> Vec<Transfer>;

    /// Pending transfers sent by `sender`.
    fn get_outgoing_pending(&self, sender: &Address) -> Vec<Transfer>;

    /// Every transfer `address` sent or received.
    fn get_user_transfers(&self, address: &Address) -> Vec<Transfer>;

    /// Number of transfers ever requested.
    fn total_transfers(&self) -> u64;
}
