//! # Actor Directory Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Registers addresses as users with a role and an approval status. Every
//! mutating ledger operation asks the directory first whether its caller may
//! write.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | At most one user per address | `domain/directory.rs` - `by_address` check before insert |
//! | INVARIANT-2 | User ids are assigned once, never reused | `domain/directory.rs` - append-only arena |
//! | INVARIANT-3 | Only the configured admin registers directly or changes status | `domain/directory.rs` - `ensure_admin()` |
//!
//! ## Two-Tier Registration
//!
//! ```text
//! request_role(addr)              ──→ [PENDING]
//! register_by_admin(addr, status) ──→ [status as given]
//!
//! change_status(addr, any)        ──→ [any]   (admin override, no transition graph)
//! ```
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - ActorDirectoryApi trait                    │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/entities.rs  - User                                     │
//! │  domain/directory.rs - ActorDirectory (arena + address index)   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ports;

pub use domain::*;
pub use ports::*;
