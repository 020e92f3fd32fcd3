//! Invisalign provider likelihood for a dental practice
//!
//! Scores a practice from its name, address and phone number when no
//! directory answer is available. Four capped factors add up to at most
//! 100 points:
//!
//! ```text
//! name            25   strong term 25, weak term 15, plain dental 5
//! location        25   urban address 15, medical district 10
//! specialization  30   orthodontic 30, cosmetic 20, smile 15, group 10
//! practice size   20   large practice 15, professional branding 10, 10-digit phone 5
//! ```
//!
//! A practice scoring [`PROVIDER_THRESHOLD`] or more counts as a likely
//! provider.

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MAX_SCORE: u32 = 100;
pub const PROVIDER_THRESHOLD: u32 = 40;
pub const HIGH_CONFIDENCE_SCORE: u32 = 70;
pub const MEDIUM_CONFIDENCE_SCORE: u32 = 50;

pub const NAME_MAX: u32 = 25;
pub const NAME_STRONG_POINTS: u32 = 25;
pub const NAME_WEAK_POINTS: u32 = 15;
pub const NAME_DENTAL_POINTS: u32 = 5;

pub const LOCATION_MAX: u32 = 25;
pub const URBAN_POINTS: u32 = 15;
pub const MEDICAL_DISTRICT_POINTS: u32 = 10;

pub const SPECIALIZATION_MAX: u32 = 30;
pub const ORTHODONTIC_POINTS: u32 = 30;
pub const COSMETIC_POINTS: u32 = 20;
pub const SMILE_FOCUS_POINTS: u32 = 15;
pub const GROUP_PRACTICE_POINTS: u32 = 10;

pub const PRACTICE_SIZE_MAX: u32 = 20;
pub const LARGE_PRACTICE_POINTS: u32 = 15;
pub const BRANDING_POINTS: u32 = 10;
pub const ESTABLISHED_CONTACT_POINTS: u32 = 5;

const STRONG_NAME_TERMS: &[&str] = &["invisalign", "orthodontic", "orthodontist"];
const WEAK_NAME_TERMS: &[&str] = &["smile", "cosmetic", "straighten", "align"];
const DENTAL_NAME_TERMS: &[&str] = &["dental", "dentist", "dds", "dmd"];

const URBAN_TERMS: &[&str] = &["suite", "avenue", "boulevard", "plaza", "center"];
const MEDICAL_TERMS: &[&str] = &["medical", "dental", "professional", "healthcare"];

const ORTHODONTIC_TERMS: &[&str] = &["orthodontic", "orthodontist"];
const COSMETIC_TERMS: &[&str] = &["cosmetic"];
const SMILE_TERMS: &[&str] = &["smile", "aesthetic"];
const GROUP_TERMS: &[&str] = &["associates", "group"];

const LARGE_PRACTICE_TERMS: &[&str] = &["center", "institute", "clinic"];
const BRANDING_TERMS: &[&str] = &["professional", "premier", "advanced"];

/// Practice details as submitted by the map.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practice {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn for_score(total: u32) -> Self {
        if total >= HIGH_CONFIDENCE_SCORE {
            Confidence::High
        } else if total >= MEDIUM_CONFIDENCE_SCORE {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Points earned per factor, each within its cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFactors {
    pub name_indicators: u32,
    pub location_factors: u32,
    pub specialization: u32,
    pub practice_size: u32,
}

impl ScoreFactors {
    pub fn total(&self) -> u32 {
        self.name_indicators + self.location_factors + self.specialization + self.practice_size
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    pub total_score: u32,
    pub max_possible_score: u32,
    pub threshold: u32,
    pub factors: ScoreFactors,
    /// Labels of every indicator that matched, in factor order
    pub signals: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderScore {
    pub is_provider: bool,
    pub confidence: Confidence,
    pub details: ScoreDetails,
}

/// Lowercase, punctuation dropped, whitespace collapsed.
fn normalize(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn mentions(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}

/// Adds `points` and records `label` when `text` mentions any of `terms`.
fn award(
    text: &str,
    terms: &[&str],
    points: u32,
    label: &'static str,
    signals: &mut Vec<&'static str>,
) -> u32 {
    if mentions(text, terms) {
        signals.push(label);
        points
    } else {
        0
    }
}

pub fn score_name(name: &str, signals: &mut Vec<&'static str>) -> u32 {
    let name = normalize(name);
    let (points, label) = if mentions(&name, STRONG_NAME_TERMS) {
        (NAME_STRONG_POINTS, "strong_name_indicator")
    } else if mentions(&name, WEAK_NAME_TERMS) {
        (NAME_WEAK_POINTS, "weak_name_indicator")
    } else if mentions(&name, DENTAL_NAME_TERMS) {
        (NAME_DENTAL_POINTS, "dental_name")
    } else {
        return 0;
    };
    signals.push(label);
    points.min(NAME_MAX)
}

pub fn score_location(address: Option<&str>, signals: &mut Vec<&'static str>) -> u32 {
    let Some(address) = address.map(normalize).filter(|a| !a.is_empty()) else {
        return 0;
    };
    let points = award(&address, URBAN_TERMS, URBAN_POINTS, "urban_location", signals)
        + award(
            &address,
            MEDICAL_TERMS,
            MEDICAL_DISTRICT_POINTS,
            "medical_district",
            signals,
        );
    points.min(LOCATION_MAX)
}

pub fn score_specialization(name: &str, signals: &mut Vec<&'static str>) -> u32 {
    let name = normalize(name);
    let points = award(
        &name,
        ORTHODONTIC_TERMS,
        ORTHODONTIC_POINTS,
        "orthodontic_specialist",
        signals,
    ) + award(&name, COSMETIC_TERMS, COSMETIC_POINTS, "cosmetic_specialist", signals)
        + award(&name, SMILE_TERMS, SMILE_FOCUS_POINTS, "smile_focused", signals)
        + award(&name, GROUP_TERMS, GROUP_PRACTICE_POINTS, "group_practice", signals);
    points.min(SPECIALIZATION_MAX)
}

pub fn score_practice_size(
    name: &str,
    phone: Option<&str>,
    signals: &mut Vec<&'static str>,
) -> u32 {
    let name = normalize(name);
    let mut points = award(
        &name,
        LARGE_PRACTICE_TERMS,
        LARGE_PRACTICE_POINTS,
        "large_practice",
        signals,
    ) + award(&name, BRANDING_TERMS, BRANDING_POINTS, "professional_branding", signals);

    let digits = phone.map_or(0, |p| p.chars().filter(char::is_ascii_digit).count());
    if digits == 10 {
        points += ESTABLISHED_CONTACT_POINTS;
        signals.push("established_contact");
    }
    points.min(PRACTICE_SIZE_MAX)
}

pub fn score_provider(practice: &Practice) -> ProviderScore {
    let mut signals = Vec::new();
    let factors = ScoreFactors {
        name_indicators: score_name(&practice.name, &mut signals),
        location_factors: score_location(practice.address.as_deref(), &mut signals),
        specialization: score_specialization(&practice.name, &mut signals),
        practice_size: score_practice_size(&practice.name, practice.phone.as_deref(), &mut signals),
    };
    let total_score = factors.total();

    debug!(practice = %practice.name, total_score, "Provider likelihood scored");

    ProviderScore {
        is_provider: total_score >= PROVIDER_THRESHOLD,
        confidence: Confidence::for_score(total_score),
        details: ScoreDetails {
            total_score,
            max_possible_score: MAX_SCORE,
            threshold: PROVIDER_THRESHOLD,
            factors,
            signals,
        },
    }
}
