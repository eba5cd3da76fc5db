//! # Actor Directory - Arena and Address Index
//!
//! ## Data Structures
//!
//! - `users`: append-only arena, user `id` lives at index `id - 1`
//! - `by_address`: O(1) address → user id lookup
//!
//! ## Invariants Enforced
//!
//! - INVARIANT-1: One user per address (checked before every insert)
//! - INVARIANT-2: Ids never reused (arena only grows)
//! - INVARIANT-3: Admin-only paths go through `ensure_admin()`

use super::entities::{Address, LedgerError, LedgerResult, User, UserId, UserStatus};
use std::collections::HashMap;

/// Registry of actors allowed (or waiting) to write to the ledger.
///
/// Every mutating method validates all preconditions before it writes, so an
/// `Err` always leaves the directory untouched.
#[derive(Debug, Clone)]
pub struct ActorDirectory {
    /// The single privileged identity. Fixed at construction.
    admin: Address,

    /// All users, indexed by `id - 1`.
    users: Vec<User>,

    /// Address → user id.
    by_address: HashMap<Address, UserId>,
}

impl ActorDirectory {
    /// Creates an empty directory administered by `admin`.
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            users: Vec::new(),
            by_address: HashMap::new(),
        }
    }

    /// Returns the admin address.
    pub fn admin(&self) -> Address {
        self.admin
    }

    /// Returns true if `address` is the admin.
    pub fn is_admin(&self, address: &Address) -> bool {
        *address == self.admin
    }

    /// Returns the number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns true if no user is registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns true if `address` has a user record.
    pub fn is_registered(&self, address: &Address) -> bool {
        self.by_address.contains_key(address)
    }

    /// Looks up the user id for `address`.
    pub fn user_id_of(&self, address: &Address) -> Option<UserId> {
        self.by_address.get(address).copied()
    }

    /// Gets a user by address.
    pub fn get(&self, address: &Address) -> Option<&User> {
        self.user_id_of(address).and_then(|id| self.get_by_id(id))
    }

    /// Gets a user by id.
    pub fn get_by_id(&self, id: UserId) -> Option<&User> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.users.get(index)
    }

    /// Iterates over all users in id order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    /// Fails with `Unauthorized` unless `caller` is the admin.
    pub fn ensure_admin(&self, caller: &Address, action: &'static str) -> LedgerResult<()> {
        if self.is_admin(caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                caller: *caller,
                action,
            })
        }
    }

    /// Returns the user for `address` if it is registered and approved.
    ///
    /// # Errors
    /// - `NotRegistered` if the address has no user
    /// - `NotApproved` if the user's status is anything but Approved
    pub fn require_approved(&self, address: &Address) -> LedgerResult<&User> {
        let user = self
            .get(address)
            .ok_or(LedgerError::NotRegistered { address: *address })?;
        if !user.is_approved() {
            return Err(LedgerError::NotApproved {
                address: *address,
                status: user.status,
            });
        }
        Ok(user)
    }

    /// Self-service registration. The new user starts out Pending.
    ///
    /// Returns the stored user, role already trimmed.
    ///
    /// # Errors
    /// - `AlreadyRequested` if the address already has a user
    /// - `InvalidInput` if the role is blank
    pub fn request_role(&mut self, address: Address, role: &str) -> LedgerResult<&User> {
        if self.is_registered(&address) {
            return Err(LedgerError::AlreadyRequested { address });
        }
        let role = validate_role(role)?;
        Ok(self.insert(address, role, UserStatus::Pending))
    }

    /// Privileged registration directly into `status`.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the admin
    /// - `AlreadyRegistered` if the address already has a user
    /// - `InvalidInput` if the role is blank
    pub fn register_by_admin(
        &mut self,
        caller: &Address,
        address: Address,
        role: &str,
        status: UserStatus,
    ) -> LedgerResult<&User> {
        self.ensure_admin(caller, "register users")?;
        if self.is_registered(&address) {
            return Err(LedgerError::AlreadyRegistered { address });
        }
        let role = validate_role(role)?;
        Ok(self.insert(address, role, status))
    }

    /// Overwrites a user's status. Any status may follow any other.
    ///
    /// Returns the user id and the status it replaced.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the admin
    /// - `NotFound` if the address is unregistered
    pub fn change_status(
        &mut self,
        caller: &Address,
        address: &Address,
        new_status: UserStatus,
    ) -> LedgerResult<(UserId, UserStatus)> {
        self.ensure_admin(caller, "change user status")?;
        let user = self
            .user_id_of(address)
            .and_then(|id| self.users.get_mut((id - 1) as usize))
            .ok_or(LedgerError::user_not_found(*address))?;
        let previous = user.status;
        user.status = new_status;
        Ok((user.id, previous))
    }

    /// Internal insert without validation (assumes all checks passed).
    fn insert(&mut self, address: Address, role: String, status: UserStatus) -> &User {
        let id = self.users.len() as UserId + 1;
        self.by_address.insert(address, id);
        self.users.push(User::new(id, address, role, status));
        &self.users[self.users.len() - 1]
    }
}

fn validate_role(role: &str) -> LedgerResult<String> {
    let role = role.trim();
    if role.is_empty() {
        return Err(LedgerError::InvalidInput {
            field: "role",
            reason: "must not be blank",
        });
    }
    Ok(role.to_string())
}
