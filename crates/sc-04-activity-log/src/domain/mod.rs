//! # Domain Layer - Activity Log

pub mod entities;
pub mod log;

pub use entities::*;
pub use log::*;
