//! `ActorDirectoryApi` for the engine.

use super::{rejected, Commit, SupplyChainLedger};
use sc_01_actor_directory::{ActorDirectoryApi, User};
use sc_04_activity_log::TimeSource;
use shared_bus::{EventPublisher, LedgerEvent};
use shared_types::{ActivityType, Address, LedgerError, LedgerResult, UserId, UserStatus};
use tracing::{info, instrument};

impl<T: TimeSource, P: EventPublisher> ActorDirectoryApi for SupplyChainLedger<T, P> {
    #[instrument(skip(self), fields(caller = %caller))]
    fn request_role(&self, caller: Address, role: &str) -> LedgerResult<UserId> {
        let mut state = self.state.write();
        let now = self.now(&state);

        let (id, role) = state
            .directory
            .request_role(caller, role)
            .map(|user| (user.id, user.role.clone()))
            .map_err(|e| rejected("request_role", &caller, e))?;

        self.commit(
            &mut state,
            Commit {
                activity_type: ActivityType::UserRoleRequested,
                actor: caller,
                related_id: id,
                description: format!("Requested role {}", role),
                data: Vec::new(),
                event: Some(LedgerEvent::UserRoleRequested { user: caller, role }),
            },
            now,
        );
        info!(user_id = id, "Role requested, awaiting approval");
        Ok(id)
    }

    #[instrument(skip(self), fields(caller = %caller, address = %address))]
    fn register_by_admin(
        &self,
        caller: Address,
        address: Address,
        role: &str,
        status: UserStatus,
    ) -> LedgerResult<UserId> {
        let mut state = self.state.write();
        let now = self.now(&state);

        let (id, role) = state
            .directory
            .register_by_admin(&caller, address, role, status)
            .map(|user| (user.id, user.role.clone()))
            .map_err(|e| rejected("register_by_admin", &caller, e))?;

        self.commit(
            &mut state,
            Commit {
                activity_type: ActivityType::UserRegisteredByAdmin,
                actor: caller,
                related_id: id,
                description: format!("Registered {} as {} ({})", address, role, status),
                data: Vec::new(),
                event: Some(LedgerEvent::UserStatusChanged {
                    user: address,
                    status,
                }),
            },
            now,
        );
        info!(user_id = id, %status, "User registered by admin");
        Ok(id)
    }

    #[instrument(skip(self), fields(caller = %caller, address = %address))]
    fn change_status(
        &self,
        caller: Address,
        address: Address,
        new_status: UserStatus,
    ) -> LedgerResult<()> {
        let mut state = self.state.write();
        let now = self.now(&state);

        let (id, previous) = state
            .directory
            .change_status(&caller, &address, new_status)
            .map_err(|e| rejected("change_status", &caller, e))?;

        self.commit(
            &mut state,
            Commit {
                activity_type: ActivityType::UserStatusChanged,
                actor: caller,
                related_id: id,
                description: format!("Status of {} changed from {} to {}", address, previous, new_status),
                data: Vec::new(),
                event: Some(LedgerEvent::UserStatusChanged {
                    user: address,
                    status: new_status,
                }),
            },
            now,
        );
        info!(user_id = id, %previous, status = %new_status, "User status changed");
        Ok(())
    }

    fn is_registered(&self, address: &Address) -> bool {
        self.state.read().directory.is_registered(address)
    }

    fn is_admin(&self, address: &Address) -> bool {
        self.state.read().directory.is_admin(address)
    }

    fn get_user(&self, address: &Address) -> LedgerResult<User> {
        self.state
            .read()
            .directory
            .get(address)
            .cloned()
            .ok_or(LedgerError::user_not_found(*address))
    }

    fn get_user_by_id(&self, id: UserId) -> Option<User> {
        self.state.read().directory.get_by_id(id).cloned()
    }

    fn user_id_of(&self, address: &Address) -> Option<UserId> {
        self.state.read().directory.user_id_of(address)
    }

    fn list_users(&self) -> Vec<User> {
        self.state.read().directory.iter().cloned().collect()
    }

    fn total_users(&self) -> u64 {
        self.state.read().directory.len() as u64
    }
}
