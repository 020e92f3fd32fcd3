//! Conflict detection between a candidate circle and the active set.
//!
//! Locks are scanned before holds, and the first overlapping record wins.
//! The result is not necessarily the nearest or the largest conflict.

use geofence::Circle;
use serde::{Deserialize, Serialize};

use crate::model::{ActiveSet, Hold, OwnerMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimKind {
    Locked,
    Held,
}

/// Descriptor of the record a candidate collides with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ClaimKind,
    pub id: String,
    pub practice: String,
    pub rep: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rep_email: Option<String>,
    /// Center-to-center distance, km
    pub distance: f64,
    /// Combined radii, km
    pub min_required: f64,
}

pub fn check_conflict(active: &ActiveSet, candidate: &Circle) -> Option<Conflict> {
    find_conflict(active, candidate, |_| false)
}

/// Like [`check_conflict`], ignoring holds for which `skip_hold` is true.
pub fn find_conflict<F>(active: &ActiveSet, candidate: &Circle, skip_hold: F) -> Option<Conflict>
where
    F: Fn(&Hold) -> bool,
{
    let locks = active
        .locks
        .iter()
        .map(|t| (ClaimKind::Locked, t.id.as_str(), t.circle(), &t.owner));
    let holds = active
        .holds
        .iter()
        .filter(|hold| !skip_hold(*hold))
        .map(|h| (ClaimKind::Held, h.id.as_str(), h.circle(), &h.owner));

    locks.chain(holds).find_map(|(kind, id, existing, owner)| {
        let separation = candidate.separation(&existing);
        separation
            .overlaps()
            .then(|| describe(kind, id, owner, separation.distance_km, separation.min_required_km))
    })
}

fn describe(kind: ClaimKind, id: &str, owner: &OwnerMeta, distance: f64, min_required: f64) -> Conflict {
    Conflict {
        kind,
        id: id.to_string(),
        practice: owner.practice.clone(),
        rep: owner.rep.clone(),
        rep_email: owner.rep_email.clone(),
        distance,
        min_required,
    }
}
