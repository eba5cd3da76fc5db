//! # Activity Log Subsystem
//!
//! **Subsystem ID:** 4
//!
//! ## Purpose
//!
//! Append-only record of every state-changing ledger operation. The log is
//! written in commit order, so replaying it in id order reproduces the
//! history of the ledger.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Ids strictly increase with no gaps | `domain/log.rs` - append-only arena |
//! | INVARIANT-2 | Timestamps never decrease in id order | `domain/log.rs` - `record()` clamps to the last timestamp |
//! | INVARIANT-3 | Entries are never edited or removed | `domain/log.rs` - no mutating API besides `record()` |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - ActivityLogApi trait                       │
//! │  ports/outbound.rs - TimeSource (system + manual clocks)        │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/entities.rs - Activity, BatchEvent                      │
//! │  domain/log.rs      - ActivityLog (arena + actor/type indices)  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ports;

pub use domain::*;
pub use ports::*;
