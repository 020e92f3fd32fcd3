//! Hold expiry timers.
//!
//! One tokio task per hold sleeps until `expires_at` and then removes the
//! hold from the store. Timers are an optimisation: every read path already
//! filters expired holds, so a lost timer (restart, crash) only delays the
//! physical removal. [`HoldExpiry::resume`] rebuilds timers from the store.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::Result;
use crate::model::Hold;
use crate::store::TerritoryStore;

pub struct HoldExpiry {
    store: Arc<dyn TerritoryStore>,
    clock: Arc<dyn Clock>,
    timers: Arc<Mutex<HashMap<String, AbortHandle>>>,
}

impl HoldExpiry {
    pub fn new(store: Arc<dyn TerritoryStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Start (or restart) the timer for `hold`. Must run inside a tokio runtime.
    pub fn schedule(&self, hold: &Hold) {
        let remaining = (hold.expires_at - self.clock.now())
            .to_std()
            .unwrap_or_default();

        let store = Arc::clone(&self.store);
        let timers = Arc::clone(&self.timers);
        let hold_id = hold.id.clone();

        // Held across spawn so a zero-length timer cannot finish before it is registered.
        let mut pending = self.timers.lock();
        let task = tokio::spawn(async move {
            tokio::time::sleep(remaining).await;

            match store.remove_hold(&hold_id).await {
                Ok(Some(_)) => info!(hold_id = %hold_id, "Hold expired automatically"),
                Ok(None) => debug!(hold_id = %hold_id, "Expired hold already removed"),
                Err(e) => warn!(hold_id = %hold_id, error = %e, "Failed to remove expired hold"),
            }
            timers.lock().remove(&hold_id);
        });

        if let Some(previous) = pending.insert(hold.id.clone(), task.abort_handle()) {
            previous.abort();
        }
        debug!(hold_id = %hold.id, expires_at = %hold.expires_at, "Hold expiry scheduled");
    }

    /// Stop the timer for a hold that left the store some other way.
    pub fn cancel(&self, hold_id: &str) -> bool {
        match self.timers.lock().remove(hold_id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> usize {
        self.timers.lock().len()
    }

    /// Purge holds that expired while no timer was running and schedule the
    /// rest. Returns the number of timers scheduled.
    pub async fn resume(&self) -> Result<usize> {
        let now = self.clock.now();

        let purged = self.store.purge_expired(now).await?;
        for hold in &purged {
            info!(hold_id = %hold.id, expires_at = %hold.expires_at, "Hold expired while offline");
        }

        let active = self.store.list_active(now).await?;
        for hold in &active.holds {
            self.schedule(hold);
        }

        Ok(active.holds.len())
    }
}
