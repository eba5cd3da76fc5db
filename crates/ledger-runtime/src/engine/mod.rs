//! # Supply-Chain Ledger Engine
//!
//! Owns the four subsystem tables and serializes every mutation through one
//! write lock.
//!
//! ## Commit Flow
//!
//! ```text
//! caller ──→ acquire write lock
//!              │
//!              ├─ Actor Directory gate (registered? approved? admin?)
//!              ├─ subsystem validation  ──✗──→ Err(LedgerError), nothing written
//!              ├─ subsystem mutation
//!              ├─ Activity Log append
//!              └─ publish domain event, then ActivityRecorded
//!            release write lock
//! ```
//!
//! Publishing happens under the lock, so subscribers see events in exactly
//! the order the activity ids were assigned.
//!
//! The subsystem APIs are implemented in sibling modules:
//!
//! - `directory.rs` - `ActorDirectoryApi`
//! - `registry.rs` - `BatchRegistryApi`
//! - `transfers.rs` - `TransferWorkflowApi`
//! - `activity.rs` - `ActivityLogApi`

mod activity;
mod directory;
mod registry;
mod transfers;

use crate::config::{ConfigError, LedgerConfig, TokenMetadata};
use crate::snapshot::{BalanceEntry, LedgerSnapshot};
use parking_lot::{RwLock, RwLockReadGuard};
use sc_01_actor_directory::ActorDirectory;
use sc_02_batch_registry::BatchRegistry;
use sc_03_transfer_workflow::TransferBook;
use sc_04_activity_log::{ActivityLog, SystemTimeSource, TimeSource};
use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus, LedgerEvent, Subscription};
use shared_types::{ActivityId, ActivityType, Address, LedgerError, Timestamp};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Every table the engine owns.
#[derive(Debug, Clone)]
pub struct LedgerState {
    pub directory: ActorDirectory,
    pub registry: BatchRegistry,
    pub transfers: TransferBook,
    pub activity: ActivityLog,
}

impl LedgerState {
    fn new(admin: Address) -> Self {
        Self {
            directory: ActorDirectory::new(admin),
            registry: BatchRegistry::new(),
            transfers: TransferBook::new(),
            activity: ActivityLog::new(),
        }
    }
}

/// One activity plus the domain event that accompanies it.
struct Commit {
    activity_type: ActivityType,
    actor: Address,
    related_id: u64,
    description: String,
    data: Vec<u8>,
    event: Option<LedgerEvent>,
}

/// The ledger and workflow engine.
///
/// `Send + Sync`; share it behind an `Arc`.
pub struct SupplyChainLedger<T = SystemTimeSource, P = Arc<InMemoryEventBus>>
where
    T: TimeSource,
    P: EventPublisher,
{
    config: LedgerConfig,
    state: RwLock<LedgerState>,
    clock: T,
    publisher: P,
}

impl SupplyChainLedger {
    /// Builds a ledger on the system clock with a fresh in-memory bus.
    pub fn with_defaults(config: LedgerConfig) -> Result<Self, ConfigError> {
        Self::new(config, SystemTimeSource, Arc::new(InMemoryEventBus::new()))
    }
}

impl<T: TimeSource> SupplyChainLedger<T, Arc<InMemoryEventBus>> {
    /// Subscribe to events matching a filter.
    ///
    /// Only events committed after this call are delivered.
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.publisher.subscribe(filter)
    }
}

impl<T: TimeSource, P: EventPublisher> SupplyChainLedger<T, P> {
    /// Builds an empty ledger.
    ///
    /// # Errors
    /// Fails if `config` does not validate.
    pub fn new(config: LedgerConfig, clock: T, publisher: P) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            admin = %config.admin,
            token = %config.token.symbol,
            decimals = config.token.decimals,
            allow_empty_batches = config.allow_empty_batches,
            "Supply-chain ledger created"
        );
        Ok(Self {
            state: RwLock::new(LedgerState::new(config.admin)),
            config,
            clock,
            publisher,
        })
    }

    /// The configuration the ledger was built with.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Token name, symbol and decimals.
    pub fn token_metadata(&self) -> TokenMetadata {
        self.config.token.clone()
    }

    /// The publisher events are sent to.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Read access to every table at once.
    ///
    /// Holding the guard blocks writers; keep it short.
    pub fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read()
    }

    /// Serializable copy of every table.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let state = self.state.read();
        let mut balances = Vec::new();
        for batch in state.registry.iter() {
            for (owner, amount) in state.registry.balances().holders_of(batch.id) {
                balances.push(BalanceEntry {
                    batch_id: batch.id,
                    owner,
                    amount,
                });
            }
        }

        LedgerSnapshot {
            token: self.config.token.clone(),
            admin: self.config.admin,
            users: state.directory.iter().cloned().collect(),
            batches: state.registry.iter().cloned().collect(),
            balances,
            transfers: state.transfers.iter().cloned().collect(),
            activities: state.activity.iter().cloned().collect(),
        }
    }

    /// Timestamp for the mutation about to commit. Read under the write lock
    /// and clamped by the log, so an entity's date always equals the
    /// timestamp of the activity that created it.
    fn now(&self, state: &LedgerState) -> Timestamp {
        state.activity.next_timestamp(self.clock.now())
    }

    /// Appends the activity and publishes its events. Must be called with the
    /// write lock held, after the mutation succeeded.
    fn commit(&self, state: &mut LedgerState, commit: Commit, now: Timestamp) -> ActivityId {
        let activity = state.activity.record(
            commit.activity_type,
            commit.actor,
            commit.related_id,
            commit.description,
            commit.data,
            now,
        );
        let recorded = LedgerEvent::ActivityRecorded {
            activity_id: activity.id,
            activity_type: activity.activity_type,
            actor: activity.actor,
            timestamp: activity.timestamp,
        };
        let activity_id = activity.id;

        debug!(
            activity_id,
            activity_type = %commit.activity_type,
            related_id = commit.related_id,
            "Activity recorded"
        );

        if let Some(event) = commit.event {
            self.publisher.publish(event);
        }
        self.publisher.publish(recorded);
        activity_id
    }
}

/// Logs a refused operation and hands the error back.
fn rejected(operation: &'static str, caller: &Address, err: LedgerError) -> LedgerError {
    warn!(
        operation,
        caller = %caller,
        code = err.code(),
        error = %err,
        "Operation rejected"
    );
    err
}
