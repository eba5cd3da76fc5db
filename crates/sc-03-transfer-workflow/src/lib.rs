//! # Transfer Workflow Subsystem
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! Moves batch quantity between owners in two phases. The sender requests,
//! the recipient accepts or rejects. Balance moves only on acceptance.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Only the recipient resolves a transfer | `domain/book.rs` - `resolvable()` |
//! | INVARIANT-2 | Accepted and Rejected are terminal | `domain/book.rs` - `resolvable()` |
//! | INVARIANT-3 | Acceptance never overdraws the sender | `domain/book.rs` - `accept()` re-reads the balance |
//! | INVARIANT-4 | Pending indices hold exactly the Pending transfers | `domain/book.rs` - `settle()` |
//!
//! ## State Machine
//!
//! ```text
//! request_transfer ──→ [PENDING] ──accept──→ [ACCEPTED]   (debit from, credit to)
//!                          │
//!                          └──────reject──→ [REJECTED]   (no balance movement)
//! ```
//!
//! The sender's balance is not reserved at request time. Two Pending
//! transfers may together exceed it; whichever is accepted first wins and
//! the other fails with `InsufficientBalance` while staying Pending.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - TransferWorkflowApi trait                  │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/entities.rs - Transfer                                  │
//! │  domain/book.rs     - TransferBook (arena + pending indices)    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ports;

pub use domain::*;
pub use ports::*;
