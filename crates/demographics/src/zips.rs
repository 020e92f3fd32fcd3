//! ZIP codes within a radius
//!
//! Uses the ZipCodeAPI radius search when a key is configured. Without a key,
//! or when the lookup fails, falls back to a fixed table of well-known metro
//! ZIP codes picked by bounding box. Callers see which path produced the list
//! through [`ZipSource`].

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::Result;
use geofence::Circle;

pub const ZIPCODE_API_URL: &str = "https://www.zipcodeapi.com/rest";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Approximate miles of radius covered by each table entry
const MILES_PER_FALLBACK_ZIP: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZipSource {
    /// Radius search answered by ZipCodeAPI
    ZipApi,
    /// Hard-coded metro table; not a true radius search
    MetroApproximation,
}

struct Metro {
    name: &'static str,
    lat: (f64, f64),
    lng: (f64, f64),
    zips: &'static [&'static str],
}

const ATLANTA_ZIPS: &[&str] = &[
    "30309", "30326", "30305", "30324", "30327", "30342", "30329", "30319", "30328", "30350",
];

const METROS: &[Metro] = &[
    Metro {
        name: "miami",
        lat: (25.5, 26.0),
        lng: (-80.5, -80.0),
        zips: &[
            "33101", "33131", "33132", "33134", "33137", "33139", "33141", "33154", "33166",
            "33176",
        ],
    },
    Metro {
        name: "chicago",
        lat: (41.5, 42.0),
        lng: (-88.0, -87.0),
        zips: &[
            "60601", "60602", "60603", "60604", "60605", "60606", "60607", "60610", "60611",
            "60614",
        ],
    },
    Metro {
        name: "dallas",
        lat: (32.5, 33.0),
        lng: (-97.0, -96.5),
        zips: &[
            "75201", "75202", "75203", "75204", "75205", "75206", "75207", "75208", "75209",
            "75210",
        ],
    },
    Metro {
        name: "losangeles",
        lat: (33.5, 34.5),
        lng: (-118.5, -117.5),
        zips: &[
            "90210", "90211", "90212", "90028", "90038", "90046", "90048", "90069", "90077",
        ],
    },
];

/// Picks ZIP codes from the metro table. Points outside every box use
/// Atlanta. The count grows with the radius, one ZIP per two miles rounded
/// up, capped at the table size.
pub fn metro_fallback(area: &Circle) -> Vec<String> {
    let center = area.center;
    let (name, zips) = METROS
        .iter()
        .find(|m| {
            center.lat >= m.lat.0
                && center.lat <= m.lat.1
                && center.lng >= m.lng.0
                && center.lng <= m.lng.1
        })
        .map(|m| (m.name, m.zips))
        .unwrap_or(("atlanta", ATLANTA_ZIPS));

    let count = ((area.radius_miles / MILES_PER_FALLBACK_ZIP).ceil() as usize)
        .max(1)
        .min(zips.len());
    debug!(metro = name, count, "Using metro ZIP approximation");

    zips.iter().take(count).map(|z| z.to_string()).collect()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZipEntry {
    Code(String),
    Detailed { zip_code: String },
}

impl ZipEntry {
    fn into_code(self) -> String {
        match self {
            ZipEntry::Code(code) | ZipEntry::Detailed { zip_code: code } => code,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RadiusResponse {
    #[serde(default)]
    zip_codes: Vec<ZipEntry>,
}

pub fn parse_radius_response(body: &str) -> Result<Vec<String>> {
    let response: RadiusResponse = serde_json::from_str(body)
        .map_err(|e| crate::DemographicsError::Malformed(e.to_string()))?;
    Ok(response
        .zip_codes
        .into_iter()
        .map(ZipEntry::into_code)
        .collect())
}

#[derive(Debug, Clone)]
pub struct ZipLocator {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ZipLocator {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_base_url(ZIPCODE_API_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// ZIP codes covering the area, and where they came from
    pub async fn locate(&self, area: &Circle) -> (Vec<String>, ZipSource) {
        if let Some(key) = &self.api_key {
            match self.radius_search(key, area).await {
                Ok(zips) if !zips.is_empty() => return (zips, ZipSource::ZipApi),
                Ok(_) => warn!("ZipCodeAPI returned no ZIP codes, using metro approximation"),
                Err(e) => warn!(error = %e, "ZipCodeAPI lookup failed, using metro approximation"),
            }
        }
        (metro_fallback(area), ZipSource::MetroApproximation)
    }

    async fn radius_search(&self, key: &str, area: &Circle) -> Result<Vec<String>> {
        let url = format!(
            "{}/{}/radius.json/{}/{}/{}/mile",
            self.base_url, key, area.center.lat, area.center.lng, area.radius_miles
        );
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;
        parse_radius_response(&body)
    }
}
