//! Territory Lock Library
//!
//! Exclusive circular sales territories on a map, with temporary holds that
//! expire on their own and rejection of any claim that geographically
//! overlaps an existing lock or hold.
//!
//! # Lifecycle
//!
//! ```text
//! [none] --lock--> ACTIVE(lock) --release(territoryId)--> RELEASED
//! [none] --hold--> ACTIVE(hold) --release(holdId) | expiry | lock at same site--> removed
//! ```
//!
//! Storage, time and outbound notifications are injected through the
//! [`TerritoryStore`], [`Clock`] and [`LockNotifier`] ports.

pub mod clock;
pub mod conflict;
pub mod error;
pub mod expiry;
pub mod manager;
pub mod model;
pub mod notify;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use conflict::{check_conflict, ClaimKind, Conflict};
pub use error::{LockError, Result, ValidationError};
pub use expiry::HoldExpiry;
pub use manager::{
    LockConfig, ReleaseOutcome, ReleaseTarget, TerritoryListing, TerritoryManager,
    DEFAULT_HOLD_HOURS, DEFAULT_TOTAL_CAPACITY,
};
pub use model::{
    ActiveSet, Claim, ClaimRequest, ClaimStatus, Hold, OwnerMeta, AreaRequest, Record, Territory,
};
pub use notify::{LockNotifier, LogNotifier};
pub use store::{InMemoryStore, TerritoryStore};

pub use geofence;
