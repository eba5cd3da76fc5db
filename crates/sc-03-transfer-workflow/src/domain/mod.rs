//! # Domain Layer - Transfer Workflow

pub mod book;
pub mod entities;

pub use book::*;
pub use entities::*;
