//! # Batch Registry Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Stores immutable production batches and the per-batch, per-owner balance
//! table that the Transfer Workflow moves quantity through.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Sum of owner balances equals `total_supply` | `domain/balances.rs` - `move_balance()` checks before writing |
//! | INVARIANT-2 | Parents exist before children (provenance is a forest) | `domain/registry.rs` - `create()` parent lookup |
//! | INVARIANT-3 | Batch ids are monotonic and never reused | `domain/registry.rs` - append-only arena |
//! | INVARIANT-4 | Holder indices list exactly the positive balances | `domain/balances.rs` - `set()` |
//!
//! ## Provenance
//!
//! ```text
//! Batch #1 "Coffee Cherries" (root)
//!   ├── Batch #2 "Parchment Coffee"   parent = Some(1)
//!   │     └── Batch #4 "Roasted Lot"  parent = Some(2)
//!   └── Batch #3 "Pulp Compost"       parent = Some(1)
//!
//! provenance(4) = [4, 2, 1]
//! ```
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - BatchRegistryApi trait                     │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/entities.rs  - Batch, NewBatch                          │
//! │  domain/balances.rs  - BalanceTable (+ holder indices)          │
//! │  domain/registry.rs  - BatchRegistry (arena + creator index)    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ports;

pub use domain::*;
pub use ports::*;
