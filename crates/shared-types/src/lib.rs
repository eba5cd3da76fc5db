//! # Shared Types Crate
//!
//! Identity, quantity and status types used by every ledger subsystem, and the
//! `LedgerError` taxonomy returned across the engine boundary.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Types that cross a subsystem boundary (or the
//!   event bus) are defined here and nowhere else.
//! - **Integer Quantities**: Every quantity is a `U256`. Display scaling
//!   (e.g. grams shown as kilograms) belongs to the caller.
//! - **Tagged Statuses**: User and transfer statuses are enums, never raw
//!   integers.
//! - **Decimal on the Wire**: Quantities serialize as decimal strings through
//!   [`quantity`].

pub mod entities;
pub mod errors;
pub mod quantity;

pub use entities::*;
pub use errors::*;
