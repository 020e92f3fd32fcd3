//! Storage port for territory and hold records.
//!
//! The check-then-write race between concurrent claims is closed by
//! [`TerritoryStore::conditional_insert`], which runs the admission check and
//! the write as one atomic step.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::model::{ActiveSet, Hold, Record, Territory};

#[async_trait]
pub trait TerritoryStore: Send + Sync {
    /// Active locks and holds not yet expired at `now`.
    async fn list_active(&self, now: DateTime<Utc>) -> Result<ActiveSet>;

    /// Insert or replace a record by id.
    async fn insert(&self, record: Record) -> Result<()>;

    /// Remove a record. Returns `None` when nothing had that id.
    async fn remove_by_id(&self, id: &str) -> Result<Option<Record>>;

    /// Remove a lock. A hold with that id is left in place.
    async fn remove_lock(&self, id: &str) -> Result<Option<Territory>>;

    /// Remove a hold. A lock with that id is left in place.
    async fn remove_hold(&self, id: &str) -> Result<Option<Hold>>;

    /// Atomically prune holds expired at `now`, run `admit` over the active
    /// set and, if it passes, evict the hold ids it returned and insert
    /// `record`. Returns the evicted holds. Nothing is written when `admit`
    /// fails.
    async fn conditional_insert(
        &self,
        record: Record,
        now: DateTime<Utc>,
        admit: &(dyn for<'a> Fn(&'a ActiveSet) -> Result<Vec<String>> + Send + Sync),
    ) -> Result<Vec<Hold>>;

    /// Drop holds expired at `now`, returning them.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<Vec<Hold>>;
}

/// Process-local store. Records do not survive a restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<ActiveSet>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut state = ActiveSet::default();
        for record in records {
            upsert(&mut state, record);
        }
        Self {
            state: RwLock::new(state),
        }
    }
}

fn upsert(state: &mut ActiveSet, record: Record) {
    match record {
        Record::Lock(territory) => {
            match state.locks.iter_mut().find(|t| t.id == territory.id) {
                Some(existing) => *existing = territory,
                None => state.locks.push(territory),
            }
        }
        Record::Hold(hold) => match state.holds.iter_mut().find(|h| h.id == hold.id) {
            Some(existing) => *existing = hold,
            None => state.holds.push(hold),
        },
    }
}

fn remove(state: &mut ActiveSet, id: &str) -> Option<Record> {
    if let Some(idx) = state.locks.iter().position(|t| t.id == id) {
        return Some(Record::Lock(state.locks.remove(idx)));
    }
    state
        .holds
        .iter()
        .position(|h| h.id == id)
        .map(|idx| Record::Hold(state.holds.remove(idx)))
}

fn prune(state: &mut ActiveSet, now: DateTime<Utc>) -> Vec<Hold> {
    let (expired, live): (Vec<Hold>, Vec<Hold>) = std::mem::take(&mut state.holds)
        .into_iter()
        .partition(|h| h.is_expired(now));
    state.holds = live;
    expired
}

#[async_trait]
impl TerritoryStore for InMemoryStore {
    async fn list_active(&self, now: DateTime<Utc>) -> Result<ActiveSet> {
        let state = self.state.read().await;
        Ok(ActiveSet {
            locks: state.locks.clone(),
            holds: state
                .holds
                .iter()
                .filter(|h| !h.is_expired(now))
                .cloned()
                .collect(),
        })
    }

    async fn insert(&self, record: Record) -> Result<()> {
        let mut state = self.state.write().await;
        upsert(&mut state, record);
        Ok(())
    }

    async fn remove_by_id(&self, id: &str) -> Result<Option<Record>> {
        let mut state = self.state.write().await;
        Ok(remove(&mut state, id))
    }

    async fn remove_lock(&self, id: &str) -> Result<Option<Territory>> {
        let mut state = self.state.write().await;
        Ok(state
            .locks
            .iter()
            .position(|t| t.id == id)
            .map(|idx| state.locks.remove(idx)))
    }

    async fn remove_hold(&self, id: &str) -> Result<Option<Hold>> {
        let mut state = self.state.write().await;
        Ok(state
            .holds
            .iter()
            .position(|h| h.id == id)
            .map(|idx| state.holds.remove(idx)))
    }

    async fn conditional_insert(
        &self,
        record: Record,
        now: DateTime<Utc>,
        admit: &(dyn for<'a> Fn(&'a ActiveSet) -> Result<Vec<String>> + Send + Sync),
    ) -> Result<Vec<Hold>> {
        let mut state = self.state.write().await;
        prune(&mut state, now);

        let evict = admit(&state)?;

        let mut evicted = Vec::with_capacity(evict.len());
        for id in &evict {
            if let Some(Record::Hold(hold)) = remove(&mut state, id) {
                evicted.push(hold);
            }
        }
        upsert(&mut state, record);

        Ok(evicted)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<Vec<Hold>> {
        let mut state = self.state.write().await;
        Ok(prune(&mut state, now))
    }
}
