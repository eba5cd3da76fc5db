//! # Inbound Port - BatchRegistryApi
//!
//! Driving port for creating batches and reading balances and provenance.
//!
//! ## Authorization
//!
//! | Method | Authorized Caller |
//! |--------|-------------------|
//! | `create_batch` | Registered, Approved users |
//! | reads | Anyone |

use crate::domain::{Address, Batch, BatchId, LedgerResult, NewBatch, U256};

/// Primary API for the Batch Registry subsystem.
pub trait BatchRegistryApi: Send + Sync {
    /// Creates a batch owned entirely by `creator`.
    ///
    /// # Errors
    /// - `NotRegistered` / `NotApproved`: creator may not write
    /// - `InvalidQuantity`: zero supply (unless empty batches are allowed)
    /// - `ParentNotFound`: dangling parent reference
    fn create_batch(&self, creator: Address, request: NewBatch) -> LedgerResult<BatchId>;

    /// Gets a batch by id.
    fn get_batch(&self, id: BatchId) -> LedgerResult<Batch>;

    /// `owner`'s balance in batch `id`. Zero when none.
    fn get_balance(&self, id: BatchId, owner: &Address) -> U256;

    /// Batches created by `creator`.
    fn list_batches_by_creator(&self, creator: &Address) -> Vec<Batch>;

    /// Batches in which `owner` holds a positive balance.
    fn list_batches_held_by(&self, owner: &Address) -> Vec<Batch>;

    /// Batches `owner` created or holds, each once, ascending id.
    fn list_batches_owned_by(&self, owner: &Address) -> Vec<Batch>;

    /// Number of batches ever created.
    fn total_batches(&self) -> u64;

    /// Number of batches with a positive supply and a non-blank name.
    fn count_valid_batches(&self) -> u64;

    /// Parent chain from `id` to its root, starting with `id`.
    fn provenance(&self, id: BatchId) -> LedgerResult<Vec<Batch>>;

    /// Batches derived directly from `id`.
    fn children_of(&self, id: BatchId) -> Vec<Batch>;

    /// Positive holders of `id` with their balances.
    fn holders_of(&self, id: BatchId) -> Vec<(Address, U256)>;
}
