//! Territory and hold records, and the raw claim requests they are built from.

use chrono::{DateTime, Utc};
use geofence::{Circle, GeoPoint};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Descriptive owner metadata. Only presence of `practice` and `rep` is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerMeta {
    pub practice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_address: Option<String>,
    pub rep: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rep_email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    Active,
    Released,
    Expired,
}

/// Permanent exclusive territory. Never expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Territory {
    pub id: String,
    #[serde(flatten)]
    pub center: GeoPoint,
    /// Miles
    pub radius: f64,
    #[serde(flatten)]
    pub owner: OwnerMeta,
    pub created_at: DateTime<Utc>,
    pub status: ClaimStatus,
}

impl Territory {
    pub fn circle(&self) -> Circle {
        Circle {
            center: self.center,
            radius_miles: self.radius,
        }
    }
}

/// Temporary reservation, removed at `expires_at` at the latest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hold {
    pub id: String,
    #[serde(flatten)]
    pub center: GeoPoint,
    /// Miles
    pub radius: f64,
    #[serde(flatten)]
    pub owner: OwnerMeta,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: ClaimStatus,
}

impl Hold {
    pub fn circle(&self) -> Circle {
        Circle {
            center: self.center,
            radius_miles: self.radius,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Lock(Territory),
    Hold(Hold),
}

impl Record {
    pub fn id(&self) -> &str {
        match self {
            Record::Lock(t) => &t.id,
            Record::Hold(h) => &h.id,
        }
    }

    pub fn set_status(&mut self, status: ClaimStatus) {
        match self {
            Record::Lock(t) => t.status = status,
            Record::Hold(h) => h.status = status,
        }
    }
}

/// Active locks and unexpired holds, each in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveSet {
    pub locks: Vec<Territory>,
    pub holds: Vec<Hold>,
}

/// Lock or hold request as received from a client; every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<f64>,
    pub practice: Option<String>,
    pub practice_address: Option<String>,
    pub rep: Option<String>,
    pub rep_email: Option<String>,
}

/// A claim that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    pub circle: Circle,
    pub owner: OwnerMeta,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl ClaimRequest {
    pub fn validate(self) -> Result<Claim, ValidationError> {
        let practice = present(self.practice);
        let rep = present(self.rep);

        let mut missing = Vec::new();
        if self.lat.is_none() {
            missing.push("lat");
        }
        if self.lng.is_none() {
            missing.push("lng");
        }
        if self.radius.is_none() {
            missing.push("radius");
        }
        if practice.is_none() {
            missing.push("practice");
        }
        if rep.is_none() {
            missing.push("rep");
        }

        match (self.lat, self.lng, self.radius, practice, rep) {
            (Some(lat), Some(lng), Some(radius), Some(practice), Some(rep)) => {
                let circle = Circle::new(GeoPoint::new(lat, lng)?, radius)?;
                Ok(Claim {
                    circle,
                    owner: OwnerMeta {
                        practice,
                        practice_address: present(self.practice_address),
                        rep,
                        rep_email: present(self.rep_email),
                    },
                })
            }
            _ => Err(ValidationError::MissingFields(missing)),
        }
    }
}

/// Geometry-only request used to check an area for conflicts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<f64>,
}

impl AreaRequest {
    pub fn validate(self) -> Result<Circle, ValidationError> {
        match (self.lat, self.lng, self.radius) {
            (Some(lat), Some(lng), Some(radius)) => Ok(Circle::new(GeoPoint::new(lat, lng)?, radius)?),
            (lat, lng, radius) => {
                let missing = [("lat", lat), ("lng", lng), ("radius", radius)]
                    .into_iter()
                    .filter(|(_, v)| v.is_none())
                    .map(|(name, _)| name)
                    .collect();
                Err(ValidationError::MissingFields(missing))
            }
        }
    }
}
