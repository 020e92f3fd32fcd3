use chrono::{DateTime, Utc};
use geofence::GeoError;
use thiserror::Error;

use crate::conflict::Conflict;

/// Client-fixable input problems.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Malformed request: {0}")]
    Malformed(#[from] GeoError),
}

#[derive(Error, Debug)]
pub enum LockError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Territory conflict detected with {} ({:?})", .0.practice, .0.kind)]
    Conflict(Box<Conflict>),
    #[error("Territory already on hold until {expires_at}")]
    AlreadyHeld {
        hold_id: String,
        expires_at: DateTime<Utc>,
        conflict: Box<Conflict>,
    },
    #[error("Must specify exactly one of territoryId or holdId")]
    InvalidRequest,
    #[error("Storage failure: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, LockError>;
