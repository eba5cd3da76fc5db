//! # Domain Layer - Actor Directory
//!
//! - `entities`: User record
//! - `directory`: ActorDirectory with the address index

pub mod directory;
pub mod entities;

pub use directory::*;
pub use entities::*;
