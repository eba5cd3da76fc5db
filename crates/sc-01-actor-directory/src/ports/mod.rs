//! Ports layer for the Actor Directory.
//!
//! - Inbound (Driving) port: `ActorDirectoryApi`

pub mod inbound;

pub use inbound::*;
