//! Serializable copy of every ledger table.

use crate::config::TokenMetadata;
use sc_01_actor_directory::User;
use sc_02_batch_registry::Batch;
use sc_03_transfer_workflow::Transfer;
use sc_04_activity_log::Activity;
use serde::{Deserialize, Serialize};
use shared_types::{Address, BatchId, U256};

/// One positive balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub batch_id: BatchId,
    pub owner: Address,
    #[serde(with = "shared_types::quantity")]
    pub amount: U256,
}

/// Everything a read-only collaborator needs to render the ledger.
///
/// Tables are in id order. Balances are grouped by batch, then by owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub token: TokenMetadata,
    pub admin: Address,
    pub users: Vec<User>,
    pub batches: Vec<Batch>,
    pub balances: Vec<BalanceEntry>,
    pub transfers: Vec<Transfer>,
    pub activities: Vec<Activity>,
}

impl LedgerSnapshot {
    /// Sum of balances recorded for `batch_id`.
    pub fn held_in(&self, batch_id: BatchId) -> U256 {
        self.balances
            .iter()
            .filter(|entry| entry.batch_id == batch_id)
            .fold(U256::zero(), |acc, entry| acc.saturating_add(entry.amount))
    }
}
