//! # Batch Registry - Arena and Indices
//!
//! ## Data Structures
//!
//! - `batches`: append-only arena, batch `id` lives at index `id - 1`
//! - `by_creator`: creator → batch ids, ascending
//! - `children`: parent id → derived batch ids, ascending
//! - `balances`: the shared `BalanceTable`
//!
//! Permission checks live with the caller. By the time `create()` runs the
//! creator has already been confirmed as an approved user.

use super::balances::BalanceTable;
use super::entities::{Address, Batch, BatchId, LedgerError, LedgerResult, NewBatch, Timestamp};
use std::collections::{BTreeSet, HashMap};

/// Storage for every batch and the balances held in them.
#[derive(Debug, Clone, Default)]
pub struct BatchRegistry {
    batches: Vec<Batch>,
    by_creator: HashMap<Address, Vec<BatchId>>,
    children: HashMap<BatchId, Vec<BatchId>>,
    balances: BalanceTable,
}

impl BatchRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a batch and credits its whole supply to `creator`.
    ///
    /// With `allow_empty` unset, a zero supply or a blank name is refused.
    ///
    /// # Errors
    /// - `InvalidQuantity` for a zero supply
    /// - `InvalidInput` for a blank name
    /// - `ParentNotFound` if `parent_id` names no existing batch
    pub fn create(
        &mut self,
        creator: Address,
        request: NewBatch,
        now: Timestamp,
        allow_empty: bool,
    ) -> LedgerResult<BatchId> {
        if !allow_empty {
            if request.total_supply.is_zero() {
                return Err(LedgerError::InvalidQuantity {
                    reason: "total supply must be positive",
                });
            }
            if request.name.trim().is_empty() {
                return Err(LedgerError::InvalidInput {
                    field: "name",
                    reason: "must not be blank",
                });
            }
        }
        if let Some(parent_id) = request.parent_id {
            if !self.contains(parent_id) {
                return Err(LedgerError::ParentNotFound { parent_id });
            }
        }

        let id = self.batches.len() as BatchId + 1;
        // A fresh batch has no holders yet, so the credit cannot overflow.
        self.balances.credit(id, creator, request.total_supply)?;

        if let Some(parent_id) = request.parent_id {
            self.children.entry(parent_id).or_default().push(id);
        }
        self.by_creator.entry(creator).or_default().push(id);
        self.batches.push(Batch {
            id,
            creator,
            name: request.name,
            total_supply: request.total_supply,
            features: request.features,
            parent_id: request.parent_id,
            date_created: now,
        });
        Ok(id)
    }

    /// Returns true if `id` names an existing batch.
    pub fn contains(&self, id: BatchId) -> bool {
        self.get(id).is_some()
    }

    /// Gets a batch by id.
    pub fn get(&self, id: BatchId) -> Option<&Batch> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.batches.get(index)
    }

    /// Gets a batch or fails with `NotFound`.
    pub fn require(&self, id: BatchId) -> LedgerResult<&Batch> {
        self.get(id).ok_or(LedgerError::batch_not_found(id))
    }

    /// Iterates over all batches in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Batch> {
        self.batches.iter()
    }

    /// Number of batches ever created.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Returns true if no batch exists.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Number of batches meeting [`Batch::is_valid`].
    pub fn count_valid(&self) -> usize {
        self.batches.iter().filter(|b| b.is_valid()).count()
    }

    /// Read access to balances.
    pub fn balances(&self) -> &BalanceTable {
        &self.balances
    }

    /// Write access to balances for the transfer workflow.
    pub fn balances_mut(&mut self) -> &mut BalanceTable {
        &mut self.balances
    }

    /// Batch ids created by `creator`, ascending.
    pub fn created_by(&self, creator: &Address) -> Vec<BatchId> {
        self.by_creator.get(creator).cloned().unwrap_or_default()
    }

    /// Batch ids in which `owner` holds a positive balance, ascending.
    pub fn held_by(&self, owner: &Address) -> Vec<BatchId> {
        self.balances.batches_held_by(owner)
    }

    /// Union of created and held batch ids, each once, ascending.
    pub fn owned_by(&self, owner: &Address) -> Vec<BatchId> {
        let mut ids: BTreeSet<BatchId> = self.created_by(owner).into_iter().collect();
        ids.extend(self.held_by(owner));
        ids.into_iter().collect()
    }

    /// Batch ids derived directly from `id`, ascending.
    pub fn children_of(&self, id: BatchId) -> Vec<BatchId> {
        self.children.get(&id).cloned().unwrap_or_default()
    }

    /// The parent chain from `id` up to its root, starting with `id`.
    ///
    /// # Errors
    /// - `NotFound` if `id` names no batch
    pub fn provenance(&self, id: BatchId) -> LedgerResult<Vec<BatchId>> {
        let batch = self.require(id)?;
        let mut chain = vec![batch.id];
        let mut cursor = batch.parent_id;
        // Parents always predate children, so the walk is bounded by `id`.
        while let Some(parent_id) = cursor {
            chain.push(parent_id);
            cursor = self.get(parent_id).and_then(|b| b.parent_id);
        }
        Ok(chain)
    }
}
