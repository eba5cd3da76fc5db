//! # Event Handlers
//!
//! Tasks that consume the ledger's event bus.

pub mod event_logger;

pub use event_logger::*;
