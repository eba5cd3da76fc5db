//! Core domain entities for the Actor Directory.

use serde::{Deserialize, Serialize};

// Re-export from shared-types for convenience
pub use shared_types::{Address, LedgerError, LedgerResult, UserId, UserStatus};

/// A registered actor.
///
/// Never deleted. Only `status` changes after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Directory-assigned id, starting at 1.
    pub id: UserId,
    /// External identity key (unique).
    pub address: Address,
    /// Free-text role label, e.g. "Producer" or "Transporter".
    pub role: String,
    /// Approval status.
    pub status: UserStatus,
}

impl User {
    /// Creates a user record.
    pub fn new(id: UserId, address: Address, role: impl Into<String>, status: UserStatus) -> Self {
        Self {
            id,
            address,
            role: role.into(),
            status,
        }
    }

    /// Returns true if this user may write to the ledger.
    pub fn is_approved(&self) -> bool {
        self.status.is_approved()
    }
}
