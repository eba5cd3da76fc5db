//! `BatchRegistryApi` for the engine.

use super::{rejected, Commit, SupplyChainLedger};
use sc_02_batch_registry::{Batch, BatchRegistry, BatchRegistryApi, NewBatch};
use sc_04_activity_log::TimeSource;
use shared_bus::{EventPublisher, LedgerEvent};
use shared_types::{ActivityType, Address, BatchId, LedgerResult, U256};
use tracing::{info, instrument};

impl<T: TimeSource, P: EventPublisher> BatchRegistryApi for SupplyChainLedger<T, P> {
    #[instrument(skip(self, request), fields(creator = %creator, name = %request.name))]
    fn create_batch(&self, creator: Address, request: NewBatch) -> LedgerResult<BatchId> {
        let mut state = self.state.write();
        let now = self.now(&state);

        state
            .directory
            .require_approved(&creator)
            .map_err(|e| rejected("create_batch", &creator, e))?;

        let name = request.name.clone();
        let total_supply = request.total_supply;
        let data = request.features.clone().into_bytes();
        let parent_id = request.parent_id;
        let id = state
            .registry
            .create(creator, request, now, self.config.allow_empty_batches)
            .map_err(|e| rejected("create_batch", &creator, e))?;

        let description = match parent_id {
            Some(parent) => format!(
                "Created batch {} with supply {} from batch #{}",
                name, total_supply, parent
            ),
            None => format!("Created batch {} with supply {}", name, total_supply),
        };
        self.commit(
            &mut state,
            Commit {
                activity_type: ActivityType::TokenCreated,
                actor: creator,
                related_id: id,
                description,
                data,
                event: Some(LedgerEvent::TokenCreated {
                    token_id: id,
                    creator,
                    name,
                    total_supply,
                }),
            },
            now,
        );
        info!(batch_id = id, %total_supply, ?parent_id, "Batch created");
        Ok(id)
    }

    fn get_batch(&self, id: BatchId) -> LedgerResult<Batch> {
        self.state.read().registry.require(id).cloned()
    }

    fn get_balance(&self, id: BatchId, owner: &Address) -> U256 {
        self.state.read().registry.balances().balance_of(id, owner)
    }

    fn list_batches_by_creator(&self, creator: &Address) -> Vec<Batch> {
        let state = self.state.read();
        resolve(&state.registry, state.registry.created_by(creator))
    }

    fn list_batches_held_by(&self, owner: &Address) -> Vec<Batch> {
        let state = self.state.read();
        resolve(&state.registry, state.registry.held_by(owner))
    }

    fn list_batches_owned_by(&self, owner: &Address) -> Vec<Batch> {
        let state = self.state.read();
        resolve(&state.registry, state.registry.owned_by(owner))
    }

    fn total_batches(&self) -> u64 {
        self.state.read().registry.len() as u64
    }

    fn count_valid_batches(&self) -> u64 {
        self.state.read().registry.count_valid() as u64
    }

    fn provenance(&self, id: BatchId) -> LedgerResult<Vec<Batch>> {
        let state = self.state.read();
        let chain = state.registry.provenance(id)?;
        Ok(resolve(&state.registry, chain))
    }

    fn children_of(&self, id: BatchId) -> Vec<Batch> {
        let state = self.state.read();
        resolve(&state.registry, state.registry.children_of(id))
    }

    fn holders_of(&self, id: BatchId) -> Vec<(Address, U256)> {
        self.state.read().registry.balances().holders_of(id)
    }
}

fn resolve(registry: &BatchRegistry, ids: Vec<BatchId>) -> Vec<Batch> {
    ids.into_iter()
        .filter_map(|id| registry.get(id).cloned())
        .collect()
}
