//! `ActivityLogApi` for the engine.

use super::{rejected, Commit, SupplyChainLedger};
use sc_04_activity_log::{Activity, ActivityLogApi, BatchEvent, TimeSource};
use shared_bus::EventPublisher;
use shared_types::{ActivityId, ActivityType, Address, BatchId, LedgerError, LedgerResult};
use tracing::{info, instrument};

impl<T: TimeSource, P: EventPublisher> ActivityLogApi for SupplyChainLedger<T, P> {
    #[instrument(skip(self, event), fields(caller = %caller, event_type = %event.event_type))]
    fn record_batch_event(
        &self,
        caller: Address,
        batch_id: BatchId,
        event: BatchEvent,
    ) -> LedgerResult<ActivityId> {
        let mut state = self.state.write();
        let now = self.now(&state);

        state
            .directory
            .require_approved(&caller)
            .map_err(|e| rejected("record_batch_event", &caller, e))?;
        let batch = state
            .registry
            .require(batch_id)
            .map_err(|e| rejected("record_batch_event", &caller, e))?;
        let custodian =
            batch.creator == caller || state.registry.balances().holds(batch_id, &caller);
        if !custodian {
            return Err(rejected(
                "record_batch_event",
                &caller,
                LedgerError::Unauthorized {
                    caller,
                    action: "annotate a batch it neither created nor holds",
                },
            ));
        }
        event
            .validate()
            .map_err(|e| rejected("record_batch_event", &caller, e))?;

        let activity_id = self.commit(
            &mut state,
            Commit {
                activity_type: ActivityType::BatchEvent,
                actor: caller,
                related_id: batch_id,
                description: event.description(),
                data: event.metadata.into_bytes(),
                event: None,
            },
            now,
        );
        info!(activity_id, batch_id, "Batch event recorded");
        Ok(activity_id)
    }

    fn get_activity(&self, id: ActivityId) -> LedgerResult<Activity> {
        self.state
            .read()
            .activity
            .get(id)
            .cloned()
            .ok_or(LedgerError::activity_not_found(id))
    }

    fn get_all_activities(&self) -> Vec<Activity> {
        self.state.read().activity.iter().cloned().collect()
    }

    fn get_activities_by_actor(&self, actor: &Address) -> Vec<Activity> {
        let state = self.state.read();
        state.activity.by_actor(actor).into_iter().cloned().collect()
    }

    fn get_activities_by_type(&self, activity_type: ActivityType) -> Vec<Activity> {
        let state = self.state.read();
        state.activity.by_type(activity_type).into_iter().cloned().collect()
    }

    fn get_activities_by_related(
        &self,
        activity_type: ActivityType,
        related_id: u64,
    ) -> Vec<Activity> {
        let state = self.state.read();
        state
            .activity
            .by_related(activity_type, related_id)
            .into_iter()
            .cloned()
            .collect()
    }

    fn total_activities(&self) -> u64 {
        self.state.read().activity.len() as u64
    }
}
