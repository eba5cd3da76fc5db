//! # Activity Log - Arena and Indices
//!
//! ## Data Structures
//!
//! - `entries`: append-only arena, activity `id` lives at index `id - 1`
//! - `by_actor`: actor → activity ids
//! - `by_type`: activity type → activity ids
//! - `by_related`: (type, related id) → activity ids
//!
//! Every index is appended in id order, so lookups return ascending ids
//! without sorting.

use super::entities::{Activity, ActivityId, ActivityType, Address, Timestamp};
use std::collections::HashMap;

/// The append-only audit log.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<Activity>,
    by_actor: HashMap<Address, Vec<ActivityId>>,
    by_type: HashMap<ActivityType, Vec<ActivityId>>,
    by_related: HashMap<(ActivityType, u64), Vec<ActivityId>>,
    /// Highest timestamp recorded so far.
    last_timestamp: Timestamp,
}

impl ActivityLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// The timestamp the next entry would receive for a clock reading of `now`.
    pub fn next_timestamp(&self, now: Timestamp) -> Timestamp {
        now.max(self.last_timestamp)
    }

    /// Appends an entry. Never fails.
    ///
    /// `now` is clamped up to the previous entry's timestamp if the clock
    /// has stepped backwards.
    pub fn record(
        &mut self,
        activity_type: ActivityType,
        actor: Address,
        related_id: u64,
        description: impl Into<String>,
        data: Vec<u8>,
        now: Timestamp,
    ) -> &Activity {
        let id = self.entries.len() as ActivityId + 1;
        let timestamp = self.next_timestamp(now);
        self.last_timestamp = timestamp;

        self.by_actor.entry(actor).or_default().push(id);
        self.by_type.entry(activity_type).or_default().push(id);
        self.by_related
            .entry((activity_type, related_id))
            .or_default()
            .push(id);
        self.entries.push(Activity {
            id,
            activity_type,
            actor,
            timestamp,
            related_id,
            description: description.into(),
            data,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Gets an entry by id.
    pub fn get(&self, id: ActivityId) -> Option<&Activity> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.entries.get(index)
    }

    /// All entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.entries.iter()
    }

    /// Entries performed by `actor`, ascending id.
    pub fn by_actor(&self, actor: &Address) -> Vec<&Activity> {
        self.lookup(self.by_actor.get(actor))
    }

    /// Entries of `activity_type`, ascending id.
    pub fn by_type(&self, activity_type: ActivityType) -> Vec<&Activity> {
        self.lookup(self.by_type.get(&activity_type))
    }

    /// Entries of `activity_type` about `related_id`, ascending id.
    pub fn by_related(&self, activity_type: ActivityType, related_id: u64) -> Vec<&Activity> {
        self.lookup(self.by_related.get(&(activity_type, related_id)))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, ids: Option<&Vec<ActivityId>>) -> Vec<&Activity> {
        ids.into_iter()
            .flatten()
            .filter_map(|id| self.get(*id))
            .collect()
    }
}
