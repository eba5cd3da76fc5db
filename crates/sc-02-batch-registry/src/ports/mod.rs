//! Ports layer for the Batch Registry.
//!
//! - Inbound (Driving) port: `BatchRegistryApi`

pub mod inbound;

pub use inbound::*;
