//! Ports layer for the Activity Log.
//!
//! - Inbound (Driving) port: `ActivityLogApi`
//! - Outbound (Driven) port: `TimeSource`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
