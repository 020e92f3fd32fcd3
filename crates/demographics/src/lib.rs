//! Market Area Demographics
//!
//! Resolves the ZIP codes inside a circular market area, pulls ACS 5-year
//! figures for each one from the Census Bureau and folds them into a single
//! population-weighted summary.
//!
//! # Pipeline
//!
//! ```text
//! Circle --ZipLocator--> [zip] --CensusClient (concurrent)--> [ZipDemographics] --aggregate--> DemographicSummary
//! ```
//!
//! Missing data is reported, never invented: every report carries where its
//! ZIP list came from and which ZIP codes produced no census data.
//!
//! [`provider`] scores how likely a practice inside the area is to offer
//! Invisalign.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use geofence::Circle;

pub mod aggregate;
pub mod census;
pub mod provider;
pub mod zips;

pub use aggregate::{aggregate, income_multiplier};
pub use census::{CensusClient, DEFAULT_CENSUS_URL};
pub use provider::{score_provider, Confidence, Practice, ProviderScore};
pub use zips::{metro_fallback, ZipLocator, ZipSource};

#[derive(Error, Debug)]
pub enum DemographicsError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
    #[error("Census API returned status {status} for ZIP {zip}")]
    Status { zip: String, status: u16 },
    #[error("No census data for ZIP {0}")]
    NoData(String),
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("No demographic data available for this area")]
    Unavailable,
}

/// Both upstream APIs carry their key in the URL, so it is stripped here.
impl From<reqwest::Error> for DemographicsError {
    fn from(e: reqwest::Error) -> Self {
        DemographicsError::Http(e.without_url())
    }
}

pub type Result<T> = std::result::Result<T, DemographicsError>;

/// ACS figures for one ZIP Code Tabulation Area. Age buckets combine males
/// and females.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZipDemographics {
    pub zip_code: String,
    pub total_population: u64,
    pub median_income: u64,
    pub median_home_value: u64,
    pub bachelors: u64,
    pub masters: u64,
    pub professional: u64,
    pub doctorate: u64,
    pub age_25_29: u64,
    pub age_30_34: u64,
    pub age_35_39: u64,
    pub age_40_44: u64,
    pub age_45_49: u64,
    pub age_50_54: u64,
}

impl ZipDemographics {
    /// Bachelor's degree or higher
    pub fn college_educated(&self) -> u64 {
        self.bachelors + self.masters + self.professional + self.doctorate
    }

    /// Ages 25-44
    pub fn prime_age(&self) -> u64 {
        self.age_25_29 + self.age_30_34 + self.age_35_39 + self.age_40_44
    }

    /// Ages 45-54
    pub fn secondary_age(&self) -> u64 {
        self.age_45_49 + self.age_50_54
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicSummary {
    pub total_population: u64,
    pub qualified_audience: u64,
    pub qualified_percent: f64,
    pub median_income: u64,
    pub median_home_value: u64,
    pub college_educated: u64,
    pub prime_age: u64,
    pub secondary_age: u64,
    pub area_sq_miles: f64,
    pub population_density: f64,
    pub zip_codes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataQuality {
    /// Every ZIP in the area returned census data
    Complete,
    /// Some ZIP codes returned nothing; the summary covers the rest
    Partial,
    Unavailable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicsReport {
    pub demographics: DemographicSummary,
    /// Number of ZIP codes that contributed data
    pub zip_codes: usize,
    pub zip_source: ZipSource,
    pub data_quality: DataQuality,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unavailable_zips: Vec<String>,
}

/// Builds a report from per-ZIP fetch results. Fails with
/// [`DemographicsError::Unavailable`] when no ZIP produced data.
pub fn build_report(
    area: &Circle,
    zip_source: ZipSource,
    results: Vec<(String, Result<ZipDemographics>)>,
) -> Result<DemographicsReport> {
    let mut records = Vec::with_capacity(results.len());
    let mut unavailable_zips = Vec::new();

    for (zip, result) in results {
        match result {
            Ok(record) if record.total_population > 0 => records.push(record),
            Ok(_) => unavailable_zips.push(zip),
            Err(e) => {
                warn!(zip = %zip, error = %e, "Census lookup failed");
                unavailable_zips.push(zip);
            }
        }
    }

    if records.is_empty() {
        return Err(DemographicsError::Unavailable);
    }

    let data_quality = if unavailable_zips.is_empty() {
        DataQuality::Complete
    } else {
        DataQuality::Partial
    };

    Ok(DemographicsReport {
        demographics: aggregate(&records, area),
        zip_codes: records.len(),
        zip_source,
        data_quality,
        unavailable_zips,
    })
}

#[derive(Debug, Clone)]
pub struct DemographicsService {
    locator: ZipLocator,
    census: CensusClient,
}

impl DemographicsService {
    pub fn new(locator: ZipLocator, census: CensusClient) -> Self {
        Self { locator, census }
    }

    /// Survey the population inside `area`. ZIP lookups run concurrently.
    pub async fn survey(&self, area: &Circle) -> Result<DemographicsReport> {
        let (zips, source) = self.locator.locate(area).await;

        let lookups = zips.iter().map(|zip| async move {
            let result = self.census.fetch_zip(zip).await;
            (zip.clone(), result)
        });
        let results = join_all(lookups).await;

        let report = build_report(area, source, results)?;
        info!(
            zips = report.zip_codes,
            population = report.demographics.total_population,
            quality = ?report.data_quality,
            "Demographics surveyed"
        );
        Ok(report)
    }
}
