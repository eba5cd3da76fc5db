//! # Transfer Book
//!
//! Arena of every transfer ever requested, plus the indices the read API
//! needs:
//!
//! - `by_party`: address → transfer ids where it is sender or recipient
//! - `pending_in`: recipient → Pending transfer ids
//! - `pending_out`: sender → Pending transfer ids
//!
//! Balances are not stored here. `request()` reads them and `accept()` moves
//! them through the Batch Registry's `BalanceTable`.

use super::entities::{
    Address, BatchId, LedgerError, LedgerResult, Timestamp, Transfer, TransferId, TransferStatus,
    U256,
};
use sc_02_batch_registry::BatchRegistry;
use std::collections::{BTreeSet, HashMap};

/// The transfer state machine and its storage.
#[derive(Debug, Clone, Default)]
pub struct TransferBook {
    transfers: Vec<Transfer>,
    by_party: HashMap<Address, Vec<TransferId>>,
    pending_in: HashMap<Address, BTreeSet<TransferId>>,
    pending_out: HashMap<Address, BTreeSet<TransferId>>,
}

impl TransferBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a Pending transfer. Nothing is debited yet.
    ///
    /// The caller has already confirmed `from` as an approved user.
    ///
    /// # Errors
    /// - `InvalidRecipient` if `to == from`
    /// - `NotFound` if the batch does not exist
    /// - `InvalidQuantity` if `amount` is zero
    /// - `InsufficientBalance` if `from` holds less than `amount`
    pub fn request(
        &mut self,
        registry: &BatchRegistry,
        from: Address,
        to: Address,
        batch_id: BatchId,
        amount: U256,
        now: Timestamp,
    ) -> LedgerResult<TransferId> {
        if to == from {
            return Err(LedgerError::InvalidRecipient { address: to });
        }
        registry.require(batch_id)?;
        if amount.is_zero() {
            return Err(LedgerError::InvalidQuantity {
                reason: "transfer amount must be positive",
            });
        }
        let available = registry.balances().balance_of(batch_id, &from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                batch_id,
                holder: from,
                required: amount,
                available,
            });
        }

        let id = self.transfers.len() as TransferId + 1;
        self.transfers.push(Transfer {
            id,
            from,
            to,
            token_id: batch_id,
            date_created: now,
            amount,
            status: TransferStatus::Pending,
        });
        self.by_party.entry(from).or_default().push(id);
        self.by_party.entry(to).or_default().push(id);
        self.pending_out.entry(from).or_default().insert(id);
        self.pending_in.entry(to).or_default().insert(id);
        Ok(id)
    }

    /// Accepts a Pending transfer and moves its balance.
    ///
    /// # Errors
    /// - `NotFound`, `Unauthorized`, `InvalidState` as for any resolution
    /// - `InsufficientBalance` if the sender no longer holds `amount`; the
    ///   transfer stays Pending
    pub fn accept(
        &mut self,
        registry: &mut BatchRegistry,
        caller: &Address,
        id: TransferId,
    ) -> LedgerResult<&Transfer> {
        let index = self.resolvable(caller, id)?;
        let transfer = &self.transfers[index];
        registry.balances_mut().move_balance(
            transfer.token_id,
            transfer.from,
            transfer.to,
            transfer.amount,
        )?;
        Ok(self.settle(index, TransferStatus::Accepted))
    }

    /// Rejects a Pending transfer. No balance moves.
    ///
    /// # Errors
    /// - `NotFound`, `Unauthorized`, `InvalidState` as for any resolution
    pub fn reject(&mut self, caller: &Address, id: TransferId) -> LedgerResult<&Transfer> {
        let index = self.resolvable(caller, id)?;
        Ok(self.settle(index, TransferStatus::Rejected))
    }

    /// Gets a transfer by id.
    pub fn get(&self, id: TransferId) -> Option<&Transfer> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.transfers.get(index)
    }

    /// Iterates over all transfers in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Transfer> {
        self.transfers.iter()
    }

    /// Number of transfers ever requested.
    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    /// Returns true if no transfer exists.
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Pending transfers awaiting `recipient`, ascending id.
    pub fn pending_for(&self, recipient: &Address) -> Vec<&Transfer> {
        self.collect(self.pending_in.get(recipient).into_iter().flatten())
    }

    /// Pending transfers sent by `sender`, ascending id.
    pub fn outgoing_pending(&self, sender: &Address) -> Vec<&Transfer> {
        self.collect(self.pending_out.get(sender).into_iter().flatten())
    }

    /// Every transfer `address` sent or received, any status, ascending id.
    pub fn involving(&self, address: &Address) -> Vec<&Transfer> {
        self.collect(self.by_party.get(address).into_iter().flatten())
    }

    /// Shared checks for accept and reject. Returns the arena index.
    fn resolvable(&self, caller: &Address, id: TransferId) -> LedgerResult<usize> {
        let transfer = self.get(id).ok_or(LedgerError::transfer_not_found(id))?;
        if transfer.to != *caller {
            return Err(LedgerError::Unauthorized {
                caller: *caller,
                action: "resolve a transfer addressed to another user",
            });
        }
        if !transfer.is_pending() {
            return Err(LedgerError::InvalidState {
                transfer_id: id,
                status: transfer.status,
            });
        }
        Ok((id - 1) as usize)
    }

    /// Moves a Pending transfer into a terminal status and drops it from the
    /// pending indices.
    fn settle(&mut self, index: usize, status: TransferStatus) -> &Transfer {
        let transfer = &mut self.transfers[index];
        transfer.status = status;
        let (id, from, to) = (transfer.id, transfer.from, transfer.to);

        remove_pending(&mut self.pending_out, &from, id);
        remove_pending(&mut self.pending_in, &to, id);
        &self.transfers[index]
    }

    fn collect<'a>(&'a self, ids: impl Iterator<Item = &'a TransferId>) -> Vec<&'a Transfer> {
        ids.filter_map(|id| self.get(*id)).collect()
    }
}

fn remove_pending(index: &mut HashMap<Address, BTreeSet<TransferId>>, key: &Address, id: TransferId) {
    if let Some(ids) = index.get_mut(key) {
        ids.remove(&id);
        if ids.is_empty() {
            index.remove(key);
        }
    }
}
