//! Shared fixtures for the ledger integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use ledger_runtime::{
    ActivityLogApi, ActorDirectoryApi, BatchRegistryApi, LedgerConfig, ManualTimeSource,
    SupplyChainLedger, TransferWorkflowApi,
};
use shared_bus::InMemoryEventBus;
use shared_types::{Address, UserStatus, U256};

pub type TestLedger = SupplyChainLedger<Arc<ManualTimeSource>, Arc<InMemoryEventBus>>;

pub const ADMIN: Address = Address::repeat(0xAD);
pub const X: Address = Address::repeat(0x01);
pub const Y: Address = Address::repeat(0x02);
pub const Z: Address = Address::repeat(0x03);

/// Start of the manual clock.
pub const T0: u64 = 1_700_000_000;

pub fn units(n: u64) -> U256 {
    U256::from(n)
}

/// Fresh ledger on a manual clock, plus the clock.
pub fn ledger() -> (TestLedger, Arc<ManualTimeSource>) {
    ledger_with(LedgerConfig::with_admin(ADMIN))
}

pub fn ledger_with(config: LedgerConfig) -> (TestLedger, Arc<ManualTimeSource>) {
    let clock = Arc::new(ManualTimeSource::new(T0));
    let ledger = SupplyChainLedger::new(config, Arc::clone(&clock), Arc::new(InMemoryEventBus::new()))
        .expect("valid config");
    (ledger, clock)
}

/// Registers `address` as an Approved user through the admin path.
pub fn approve(ledger: &TestLedger, address: Address, role: &str) {
    ledger
        .register_by_admin(ADMIN, address, role, UserStatus::Approved)
        .expect("admin registration");
}

/// Row counts of every table: (users, batches, transfers, activities).
pub fn table_sizes(ledger: &TestLedger) -> (u64, u64, u64, u64) {
    (
        ledger.total_users(),
        ledger.total_batches(),
        ledger.total_transfers(),
        ledger.total_activities(),
    )
}

/// Sum of every holder's balance in `batch_id`.
pub fn held(ledger: &TestLedger, batch_id: u64) -> U256 {
    ledger
        .holders_of(batch_id)
        .into_iter()
        .fold(U256::zero(), |acc, (_, amount)| acc + amount)
}
