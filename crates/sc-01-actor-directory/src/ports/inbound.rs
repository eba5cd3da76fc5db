//! # Inbound Port - ActorDirectoryApi
//!
//! Driving port for registering and administering ledger actors.
//!
//! ## Authorization
//!
//! | Method | Authorized Caller |
//! |--------|-------------------|
//! | `request_role` | Any address (becomes Pending) |
//! | `register_by_admin` | Configured admin only |
//! | `change_status` | Configured admin only |
//! | reads | Anyone |

use crate::domain::{Address, LedgerResult, User, UserId, UserStatus};

/// Primary API for the Actor Directory subsystem.
///
/// Implemented by the ledger engine, which also records the matching
/// activity and publishes the bus event for every successful write.
pub trait ActorDirectoryApi: Send + Sync {
    /// Self-service registration of `caller` with `role`.
    ///
    /// # Errors
    /// - `AlreadyRequested`: caller already has a user record
    /// - `InvalidInput`: blank role
    fn request_role(&self, caller: Address, role: &str) -> LedgerResult<UserId>;

    /// Admin registration of `address` directly into `status`.
    ///
    /// # Errors
    /// - `Unauthorized`: caller is not the admin
    /// - `AlreadyRegistered`: address already has a user record
    fn register_by_admin(
        &self,
        caller: Address,
        address: Address,
        role: &str,
        status: UserStatus,
    ) -> LedgerResult<UserId>;

    /// Admin override of a user's status.
    ///
    /// # Errors
    /// - `Unauthorized`: caller is not the admin
    /// - `NotFound`: address is not registered
    fn change_status(
        &self,
        caller: Address,
        address: Address,
        new_status: UserStatus,
    ) -> LedgerResult<()>;

    /// Returns true if `address` has a user record.
    fn is_registered(&self, address: &Address) -> bool;

    /// Returns true if `address` is the configured admin.
    fn is_admin(&self, address: &Address) -> bool;

    /// Gets a user by address.
    fn get_user(&self, address: &Address) -> LedgerResult<User>;

    /// Gets a user by id.
    fn get_user_by_id(&self, id: UserId) -> Option<User>;

    /// Looks up the id assigned to `address`.
    fn user_id_of(&self, address: &Address) -> Option<UserId>;

    /// All users in id order.
    fn list_users(&self) -> Vec<User>;

    /// Number of registered users.
    fn total_users(&self) -> u64;
}
