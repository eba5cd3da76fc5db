//! # Supply-Chain Ledger Runtime
//!
//! Composes the four ledger subsystems into one engine and exposes the
//! pieces the `ledger-node` binary (and integration tests) need.
//!
//! ## Subsystems
//!
//! 1. Actor Directory (sc-01) - who may write
//! 2. Batch Registry (sc-02) - batches, provenance and balances
//! 3. Transfer Workflow (sc-03) - request / accept / reject
//! 4. Activity Log (sc-04) - append-only audit trail
//!
//! ## Operation Flow
//!
//! ```text
//!  caller ──→ SupplyChainLedger ──→ Actor Directory gate
//!                   │                      │
//!                   │              Batch Registry / Transfer Workflow
//!                   │                      │
//!                   │               Activity Log append
//!                   ↓
//!             Event Bus ──→ EventLoggerHandler, other subscribers
//! ```
//!
//! ## Modules
//!
//! - `config` - `LedgerConfig` and token metadata
//! - `engine` - `SupplyChainLedger`, the serialized state machine
//! - `handlers` - bus consumers
//! - `script` - JSON-lines replay protocol
//! - `snapshot` - serializable view of every table

pub mod config;
pub mod engine;
pub mod handlers;
pub mod script;
pub mod snapshot;

pub use config::{ConfigError, LedgerConfig, TokenMetadata};
pub use engine::{LedgerState, SupplyChainLedger};
pub use handlers::EventLoggerHandler;
pub use script::{replay, Command, LedgerApi, ReplaySummary, ScriptError, ScriptOutcome};
pub use snapshot::{BalanceEntry, LedgerSnapshot};

// Subsystem APIs, so callers need only this crate.
pub use sc_01_actor_directory::{ActorDirectoryApi, User};
pub use sc_02_batch_registry::{Batch, BatchRegistryApi, NewBatch};
pub use sc_03_transfer_workflow::{Transfer, TransferWorkflowApi};
pub use sc_04_activity_log::{
    Activity, ActivityLogApi, BatchEvent, ManualTimeSource, SystemTimeSource, TimeSource,
};
