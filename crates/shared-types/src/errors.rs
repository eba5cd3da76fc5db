//! # Error Types
//!
//! The single error taxonomy returned by every ledger operation.
//!
//! Every mutating operation validates all of its preconditions before the
//! first write, so any `LedgerError` implies that no table changed and no
//! activity was recorded.

use crate::entities::{ActivityId, Address, BatchId, TransferId, TransferStatus, UserStatus, U256};
use std::fmt;
use thiserror::Error;

/// Reference to an entity that a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    /// A user, keyed by address.
    User(Address),
    /// A batch, keyed by id.
    Batch(BatchId),
    /// A transfer, keyed by id.
    Transfer(TransferId),
    /// An activity, keyed by id.
    Activity(ActivityId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(address) => write!(f, "user {}", address),
            Self::Batch(id) => write!(f, "batch #{}", id),
            Self::Transfer(id) => write!(f, "transfer #{}", id),
            Self::Activity(id) => write!(f, "activity #{}", id),
        }
    }
}

/// Errors returned by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Caller lacks the required role or relationship.
    #[error("Unauthorized: {caller} may not {action}")]
    Unauthorized {
        caller: Address,
        action: &'static str,
    },

    /// Referenced id or address does not exist.
    #[error("Not found: {0}")]
    NotFound(EntityRef),

    /// Operation not valid for the transfer's current state.
    #[error("Invalid state: transfer #{transfer_id} is already {status}")]
    InvalidState {
        transfer_id: TransferId,
        status: TransferStatus,
    },

    /// Self-service registration for an address that already has a user.
    #[error("Role already requested for {address}")]
    AlreadyRequested { address: Address },

    /// Admin registration for an address that already has a user.
    #[error("Address {address} is already registered")]
    AlreadyRegistered { address: Address },

    /// Write attempted by an address with no user record.
    #[error("Address {address} is not registered")]
    NotRegistered { address: Address },

    /// Write attempted by a user that is not approved.
    #[error("User {address} is not approved (status: {status})")]
    NotApproved { address: Address, status: UserStatus },

    /// Holder's balance is below the requested amount.
    #[error(
        "Insufficient balance in batch #{batch_id} for {holder}: required {required}, available {available}"
    )]
    InsufficientBalance {
        batch_id: BatchId,
        holder: Address,
        required: U256,
        available: U256,
    },

    /// Zero or overflowing quantity.
    #[error("Invalid quantity: {reason}")]
    InvalidQuantity { reason: &'static str },

    /// Parent batch referenced at creation does not exist.
    #[error("Parent batch #{parent_id} not found")]
    ParentNotFound { parent_id: BatchId },

    /// Transfer recipient is not acceptable (e.g. the sender itself).
    #[error("Invalid recipient {address}")]
    InvalidRecipient { address: Address },

    /// Malformed descriptive input.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
}

impl LedgerError {
    /// Stable machine-readable code for collaborators that translate errors
    /// into user-facing messages.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::AlreadyRequested { .. } => "ALREADY_REQUESTED",
            Self::AlreadyRegistered { .. } => "ALREADY_REGISTERED",
            Self::NotRegistered { .. } => "NOT_REGISTERED",
            Self::NotApproved { .. } => "NOT_APPROVED",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::InvalidQuantity { .. } => "INVALID_QUANTITY",
            Self::ParentNotFound { .. } => "PARENT_NOT_FOUND",
            Self::InvalidRecipient { .. } => "INVALID_RECIPIENT",
            Self::InvalidInput { .. } => "INVALID_INPUT",
        }
    }

    /// Shorthand for a missing user.
    pub fn user_not_found(address: Address) -> Self {
        Self::NotFound(EntityRef::User(address))
    }

    /// Shorthand for a missing batch.
    pub fn batch_not_found(id: BatchId) -> Self {
        Self::NotFound(EntityRef::Batch(id))
    }

    /// Shorthand for a missing transfer.
    pub fn transfer_not_found(id: TransferId) -> Self {
        Self::NotFound(EntityRef::Transfer(id))
    }

    /// Shorthand for a missing activity.
    pub fn activity_not_found(id: ActivityId) -> Self {
        Self::NotFound(EntityRef::Activity(id))
    }
}

/// Result alias used throughout the ledger crates.
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::InsufficientBalance {
            batch_id: 1,
            holder: Address::repeat(0xAA),
            required: U256::from(400u64),
            available: U256::from(250u64),
        };
        let msg = err.to_string();
        assert!(msg.contains("batch #1"));
        assert!(msg.contains("400"));
        assert!(msg.contains("250"));
    }

    #[test]
    fn test_not_found_display_names_entity() {
        assert_eq!(
            LedgerError::transfer_not_found(7).to_string(),
            "Not found: transfer #7"
        );
        assert!(LedgerError::user_not_found(Address::repeat(1))
            .to_string()
            .contains("user 0x0101"));
    }

    #[test]
    fn test_invalid_state_names_status() {
        let err = LedgerError::InvalidState {
            transfer_id: 3,
            status: TransferStatus::Accepted,
        };
        assert!(err.to_string().contains("already Accepted"));
        assert_eq!(err.code(), "INVALID_STATE");
    }

    #[test]
    fn test_codes_are_distinct() {
        let addr = Address::repeat(1);
        let errors = [
            LedgerError::Unauthorized { caller: addr, action: "x" },
            LedgerError::batch_not_found(1),
            LedgerError::InvalidState { transfer_id: 1, status: TransferStatus::Rejected },
            LedgerError::AlreadyRequested { address: addr },
            LedgerError::AlreadyRegistered { address: addr },
            LedgerError::NotRegistered { address: addr },
            LedgerError::NotApproved { address: addr, status: UserStatus::Pending },
            LedgerError::InsufficientBalance {
                batch_id: 1,
                holder: addr,
                required: U256::one(),
                available: U256::zero(),
            },
            LedgerError::InvalidQuantity { reason: "zero" },
            LedgerError::ParentNotFound { parent_id: 9 },
            LedgerError::InvalidRecipient { address: addr },
            LedgerError::InvalidInput { field: "name", reason: "empty" },
        ];
        let mut codes: Vec<_> = errors.iter().map(LedgerError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
