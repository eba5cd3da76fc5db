//! # Domain Layer - Batch Registry
//!
//! - `entities`: Batch record and creation request
//! - `balances`: per-batch, per-owner quantities
//! - `registry`: BatchRegistry arena with creator and child indices

pub mod balances;
pub mod entities;
pub mod registry;

pub use balances::*;
pub use entities::*;
pub use registry::*;
