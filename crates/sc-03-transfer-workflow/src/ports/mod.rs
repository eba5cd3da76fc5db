//! Ports layer for the Transfer Workflow.
//!
//! - Inbound (Driving) port: `TransferWorkflowApi`

pub mod inbound;

pub use inbound::*;
