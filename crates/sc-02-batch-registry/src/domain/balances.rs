//! # Balance Table
//!
//! Per-batch, per-owner quantities plus the two holder indices that make
//! "what does X hold" and "who holds batch N" O(1) lookups.
//!
//! Only positive balances are stored. A balance that drops to zero is removed
//! from the map and from both indices.

use super::entities::{Address, BatchId, LedgerError, LedgerResult, U256};
use std::collections::{BTreeSet, HashMap};

/// Balance storage for every batch.
#[derive(Debug, Clone, Default)]
pub struct BalanceTable {
    /// (batch, owner) → positive balance.
    balances: HashMap<(BatchId, Address), U256>,

    /// Owner → batches with a positive balance.
    held_by: HashMap<Address, BTreeSet<BatchId>>,

    /// Batch → owners with a positive balance.
    holders: HashMap<BatchId, BTreeSet<Address>>,
}

impl BalanceTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `owner`'s balance in `batch_id`. Zero if none.
    pub fn balance_of(&self, batch_id: BatchId, owner: &Address) -> U256 {
        self.balances
            .get(&(batch_id, *owner))
            .copied()
            .unwrap_or_default()
    }

    /// Batches in which `owner` holds a positive balance, ascending.
    pub fn batches_held_by(&self, owner: &Address) -> Vec<BatchId> {
        self.held_by
            .get(owner)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns true if `owner` holds a positive balance in `batch_id`.
    pub fn holds(&self, batch_id: BatchId, owner: &Address) -> bool {
        self.balances.contains_key(&(batch_id, *owner))
    }

    /// Positive holders of `batch_id` with their balances, ordered by address.
    pub fn holders_of(&self, batch_id: BatchId) -> Vec<(Address, U256)> {
        self.holders
            .get(&batch_id)
            .map(|owners| {
                owners
                    .iter()
                    .map(|owner| (*owner, self.balance_of(batch_id, owner)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sum of every balance in `batch_id`.
    pub fn total_held(&self, batch_id: BatchId) -> U256 {
        self.holders_of(batch_id)
            .into_iter()
            .fold(U256::zero(), |acc, (_, amount)| acc.saturating_add(amount))
    }

    /// Adds `amount` to `owner`'s balance.
    ///
    /// # Errors
    /// - `InvalidQuantity` if the result would overflow
    pub fn credit(&mut self, batch_id: BatchId, owner: Address, amount: U256) -> LedgerResult<()> {
        let updated = self
            .balance_of(batch_id, &owner)
            .checked_add(amount)
            .ok_or(LedgerError::InvalidQuantity {
                reason: "balance overflow",
            })?;
        self.set(batch_id, owner, updated);
        Ok(())
    }

    /// Moves `amount` from `from` to `to` within one batch.
    ///
    /// Both sides are checked before either is written, so a failure leaves
    /// the table untouched.
    ///
    /// # Errors
    /// - `InsufficientBalance` if `from` holds less than `amount`
    /// - `InvalidQuantity` if crediting `to` would overflow
    pub fn move_balance(
        &mut self,
        batch_id: BatchId,
        from: Address,
        to: Address,
        amount: U256,
    ) -> LedgerResult<()> {
        let available = self.balance_of(batch_id, &from);
        let debited = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                batch_id,
                holder: from,
                required: amount,
                available,
            })?;

        if from == to {
            return Ok(());
        }

        let credited = self
            .balance_of(batch_id, &to)
            .checked_add(amount)
            .ok_or(LedgerError::InvalidQuantity {
                reason: "balance overflow",
            })?;

        self.set(batch_id, from, debited);
        self.set(batch_id, to, credited);
        Ok(())
    }

    /// Writes a balance and keeps both indices in step.
    fn set(&mut self, batch_id: BatchId, owner: Address, amount: U256) {
        if amount.is_zero() {
            self.balances.remove(&(batch_id, owner));
            if let Some(ids) = self.held_by.get_mut(&owner) {
                ids.remove(&batch_id);
                if ids.is_empty() {
                    self.held_by.remove(&owner);
                }
            }
            if let Some(owners) = self.holders.get_mut(&batch_id) {
                owners.remove(&owner);
                if owners.is_empty() {
                    self.holders.remove(&batch_id);
                }
            }
        } else {
            self.balances.insert((batch_id, owner), amount);
            self.held_by.entry(owner).or_default().insert(batch_id);
            self.holders.entry(batch_id).or_default().insert(owner);
        }
    }
}
