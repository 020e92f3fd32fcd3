//! Lock, hold, release and listing operations.

use chrono::{DateTime, Duration, Utc};
use geofence::Circle;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::conflict::{check_conflict, find_conflict, ClaimKind, Conflict};
use crate::error::{LockError, Result};
use crate::expiry::HoldExpiry;
use crate::model::{ActiveSet, ClaimRequest, ClaimStatus, Hold, Record, Territory};
use crate::notify::LockNotifier;
use crate::store::TerritoryStore;

/// Default hold lifetime
pub const DEFAULT_HOLD_HOURS: i64 = 48;

/// Default ceiling used for the cosmetic `availableCount`
pub const DEFAULT_TOTAL_CAPACITY: usize = 8;

#[derive(Debug, Clone)]
pub struct LockConfig {
    pub hold_duration: Duration,
    pub total_capacity: usize,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            hold_duration: Duration::hours(DEFAULT_HOLD_HOURS),
            total_capacity: DEFAULT_TOTAL_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerritoryListing {
    pub locked: Vec<Territory>,
    pub held: Vec<Hold>,
    pub available_count: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseTarget {
    Territory(String),
    Hold(String),
}

impl ReleaseTarget {
    /// Exactly one id must be given; blank ids count as absent.
    pub fn from_ids(territory_id: Option<String>, hold_id: Option<String>) -> Result<Self> {
        let territory_id = territory_id.filter(|s| !s.trim().is_empty());
        let hold_id = hold_id.filter(|s| !s.trim().is_empty());

        match (territory_id, hold_id) {
            (Some(id), None) => Ok(ReleaseTarget::Territory(id)),
            (None, Some(id)) => Ok(ReleaseTarget::Hold(id)),
            _ => Err(LockError::InvalidRequest),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ReleaseTarget::Territory(id) | ReleaseTarget::Hold(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// The record that was removed, with status `RELEASED`.
    Released(Record),
    /// Nothing active had that id; releasing is idempotent.
    NotFound,
}

pub struct TerritoryManager {
    store: Arc<dyn TerritoryStore>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn LockNotifier>,
    expiry: HoldExpiry,
    config: LockConfig,
}

impl TerritoryManager {
    pub fn new(
        store: Arc<dyn TerritoryStore>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn LockNotifier>,
        config: LockConfig,
    ) -> Self {
        let expiry = HoldExpiry::new(Arc::clone(&store), Arc::clone(&clock));
        Self {
            store,
            clock,
            notifier,
            expiry,
            config,
        }
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// First active lock or hold the candidate would overlap, if any.
    pub async fn check_conflict(&self, candidate: &Circle) -> Result<Option<Conflict>> {
        let active = self.store.list_active(self.clock.now()).await?;
        Ok(check_conflict(&active, candidate))
    }

    /// Lock a territory permanently. A hold at the same site is superseded.
    pub async fn lock_territory(&self, request: ClaimRequest) -> Result<Territory> {
        let claim = request.validate()?;
        let now = self.clock.now();

        let territory = Territory {
            id: new_id("territory"),
            center: claim.circle.center,
            radius: claim.circle.radius_miles,
            owner: claim.owner,
            created_at: now,
            status: ClaimStatus::Active,
        };
        let candidate = territory.circle();

        let admit = move |active: &ActiveSet| -> Result<Vec<String>> {
            let superseded: Vec<String> = active
                .holds
                .iter()
                .filter(|h| h.center.is_same_site(&candidate.center))
                .map(|h| h.id.clone())
                .collect();

            match find_conflict(active, &candidate, |h| superseded.contains(&h.id)) {
                Some(conflict) => Err(LockError::Conflict(Box::new(conflict))),
                None => Ok(superseded),
            }
        };

        let evicted = match self
            .store
            .conditional_insert(Record::Lock(territory.clone()), now, &admit)
            .await
        {
            Ok(evicted) => evicted,
            Err(e) => {
                log_rejection("lock", &territory.owner.practice, &e);
                return Err(e);
            }
        };

        for hold in &evicted {
            self.expiry.cancel(&hold.id);
            info!(
                hold_id = %hold.id,
                territory_id = %territory.id,
                "Hold superseded by lock"
            );
        }

        info!(
            territory_id = %territory.id,
            practice = %territory.owner.practice,
            rep = %territory.owner.rep,
            lat = territory.center.lat,
            lng = territory.center.lng,
            radius_miles = territory.radius,
            "Territory locked"
        );

        self.dispatch_confirmation(territory.clone());
        Ok(territory)
    }

    /// Place a hold for the configured duration.
    pub async fn hold_territory(&self, request: ClaimRequest) -> Result<Hold> {
        let claim = request.validate()?;
        let now = self.clock.now();

        let hold = Hold {
            id: new_id("hold"),
            center: claim.circle.center,
            radius: claim.circle.radius_miles,
            owner: claim.owner,
            created_at: now,
            expires_at: now + self.config.hold_duration,
            status: ClaimStatus::Active,
        };
        let candidate = hold.circle();

        let admit = move |active: &ActiveSet| -> Result<Vec<String>> {
            match check_conflict(active, &candidate) {
                None => Ok(Vec::new()),
                Some(conflict) if conflict.kind == ClaimKind::Locked => {
                    Err(LockError::Conflict(Box::new(conflict)))
                }
                Some(conflict) => {
                    let expires_at = active
                        .holds
                        .iter()
                        .find(|h| h.id == conflict.id)
                        .map(|h| h.expires_at)
                        .unwrap_or(now);
                    Err(LockError::AlreadyHeld {
                        hold_id: conflict.id.clone(),
                        expires_at,
                        conflict: Box::new(conflict),
                    })
                }
            }
        };

        if let Err(e) = self
            .store
            .conditional_insert(Record::Hold(hold.clone()), now, &admit)
            .await
        {
            log_rejection("hold", &hold.owner.practice, &e);
            return Err(e);
        }

        self.expiry.schedule(&hold);

        info!(
            hold_id = %hold.id,
            practice = %hold.owner.practice,
            rep = %hold.owner.rep,
            expires_at = %hold.expires_at,
            "Territory held"
        );
        Ok(hold)
    }

    /// Release a lock or end a hold. Unknown or already-expired ids are a
    /// successful no-op, and so is an id of the other kind: a lock id given
    /// as a hold id releases nothing.
    pub async fn release_territory(
        &self,
        target: ReleaseTarget,
        reason: Option<&str>,
    ) -> Result<ReleaseOutcome> {
        let now = self.clock.now();

        let mut record = match &target {
            ReleaseTarget::Territory(id) => match self.store.remove_lock(id).await? {
                Some(territory) => Record::Lock(territory),
                None => {
                    debug!(territory_id = %id, "No active lock to release");
                    return Ok(ReleaseOutcome::NotFound);
                }
            },
            ReleaseTarget::Hold(id) => {
                let removed = self.store.remove_hold(id).await?;
                self.expiry.cancel(id);
                match removed {
                    Some(hold) if hold.is_expired(now) => {
                        debug!(hold_id = %hold.id, "Release of an already expired hold");
                        return Ok(ReleaseOutcome::NotFound);
                    }
                    Some(hold) => Record::Hold(hold),
                    None => {
                        debug!(hold_id = %id, "No active hold to release");
                        return Ok(ReleaseOutcome::NotFound);
                    }
                }
            }
        };

        record.set_status(ClaimStatus::Released);
        match &record {
            Record::Lock(t) => info!(territory_id = %t.id, reason = ?reason, "Territory lock released"),
            Record::Hold(h) => info!(hold_id = %h.id, reason = ?reason, "Territory hold released"),
        }

        Ok(ReleaseOutcome::Released(record))
    }

    pub async fn list_territories(&self) -> Result<TerritoryListing> {
        let now = self.clock.now();
        let active = self.store.list_active(now).await?;

        let available_count = self
            .config
            .total_capacity
            .saturating_sub(active.locks.len())
            .max(1);

        Ok(TerritoryListing {
            locked: active.locks,
            held: active.holds,
            available_count,
            timestamp: now,
        })
    }

    /// Rebuild hold expiry timers from the store, e.g. after a restart.
    pub async fn resume_expirations(&self) -> Result<usize> {
        self.expiry.resume().await
    }

    pub fn pending_expirations(&self) -> usize {
        self.expiry.pending()
    }

    fn dispatch_confirmation(&self, territory: Territory) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.lock_confirmed(&territory).await {
                warn!(
                    territory_id = %territory.id,
                    error = %e,
                    "Lock confirmation failed"
                );
            }
        });
    }
}

fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

fn log_rejection(action: &str, practice: &str, error: &LockError) {
    match error {
        LockError::Conflict(conflict) => info!(
            action,
            practice,
            conflict_with = %conflict.practice,
            conflict_type = ?conflict.kind,
            distance_km = conflict.distance,
            min_required_km = conflict.min_required,
            "Territory request rejected: conflict"
        ),
        LockError::AlreadyHeld { hold_id, expires_at, .. } => info!(
            action,
            practice,
            hold_id = %hold_id,
            expires_at = %expires_at,
            "Territory request rejected: already held"
        ),
        other => warn!(action, practice, error = %other, "Territory request failed"),
    }
}
