//! # Inbound Port - ActivityLogApi
//!
//! Reads are open to everyone. The only write exposed here is the custody
//! annotation; every other entry is appended by the operation it records.

use crate::domain::{Activity, ActivityId, ActivityType, Address, BatchEvent, BatchId, LedgerResult};

/// Primary API for the Activity Log subsystem.
pub trait ActivityLogApi: Send + Sync {
    /// Annotates a batch with a custody event.
    ///
    /// # Errors
    /// - `NotRegistered` / `NotApproved`: caller may not write
    /// - `NotFound`: unknown batch
    /// - `Unauthorized`: caller neither created nor holds the batch
    /// - `InvalidInput`: blank event type
    fn record_batch_event(
        &self,
        caller: Address,
        batch_id: BatchId,
        event: BatchEvent,
    ) -> LedgerResult<ActivityId>;

    /// Gets an entry by id.
    fn get_activity(&self, id: ActivityId) -> LedgerResult<Activity>;

    /// Every entry in id order.
    fn get_all_activities(&self) -> Vec<Activity>;

    /// Entries performed by `actor`.
    fn get_activities_by_actor(&self, actor: &Address) -> Vec<Activity>;

    /// Entries of one type.
    fn get_activities_by_type(&self, activity_type: ActivityType) -> Vec<Activity>;

    /// Entries of one type about one entity.
    fn get_activities_by_related(
        &self,
        activity_type: ActivityType,
        related_id: u64,
    ) -> Vec<Activity>;

    /// Number of entries.
    fn total_activities(&self) -> u64;
}
