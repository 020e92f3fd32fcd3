//! US Census Bureau ACS 5-year client
//!
//! One request per ZIP Code Tabulation Area. The API answers with a table:
//! the first row is the header, the second holds the values in the order
//! of [`ACS_VARIABLES`].

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::{DemographicsError, Result, ZipDemographics};

pub const DEFAULT_CENSUS_URL: &str = "https://api.census.gov/data/2021/acs/acs5";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const ACS_VARIABLES: [&str; 19] = [
    "B01003_001E", // Total population
    "B19013_001E", // Median household income
    "B25077_001E", // Median home value
    "B15003_022E", // Bachelor's degree
    "B15003_023E", // Master's degree
    "B15003_024E", // Professional degree
    "B15003_025E", // Doctorate degree
    "B01001_007E", // Males 25-29
    "B01001_008E", // Males 30-34
    "B01001_009E", // Males 35-39
    "B01001_010E", // Males 40-44
    "B01001_011E", // Males 45-49
    "B01001_012E", // Males 50-54
    "B01001_031E", // Females 25-29
    "B01001_032E", // Females 30-34
    "B01001_033E", // Females 35-39
    "B01001_034E", // Females 40-44
    "B01001_035E", // Females 45-49
    "B01001_036E", // Females 50-54
];

#[derive(Debug, Clone)]
pub struct CensusClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CensusClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
        })
    }

    pub async fn fetch_zip(&self, zip: &str) -> Result<ZipDemographics> {
        let mut query = vec![
            ("get", ACS_VARIABLES.join(",")),
            ("for", format!("zip code tabulation area:{}", zip)),
        ];
        if let Some(key) = &self.api_key {
            query.push(("key", key.clone()));
        }

        let response = self.http.get(&self.base_url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DemographicsError::Status {
                zip: zip.to_string(),
                status: status.as_u16(),
            });
        }

        let rows: Vec<Vec<Value>> = response.json().await?;
        debug!(zip, rows = rows.len(), "Census response received");
        parse_acs_rows(zip, &rows)
    }
}

/// Census cells are strings, occasionally numbers or null. Missing values
/// and the negative annotation sentinels (e.g. -666666666) read as zero.
fn cell(row: &[Value], idx: usize) -> u64 {
    let parsed = match row.get(idx) {
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(Value::Number(n)) => n.as_i64(),
        _ => None,
    };
    parsed.filter(|v| *v > 0).map(|v| v as u64).unwrap_or(0)
}

pub fn parse_acs_rows(zip: &str, rows: &[Vec<Value>]) -> Result<ZipDemographics> {
    let values = rows
        .get(1)
        .ok_or_else(|| DemographicsError::NoData(zip.to_string()))?;

    if values.len() < ACS_VARIABLES.len() {
        return Err(DemographicsError::Malformed(format!(
            "ZIP {} row has {} columns, expected {}",
            zip,
            values.len(),
            ACS_VARIABLES.len()
        )));
    }

    let v = |idx| cell(values, idx);

    Ok(ZipDemographics {
        zip_code: zip.to_string(),
        total_population: v(0),
        median_income: v(1),
        median_home_value: v(2),
        bachelors: v(3),
        masters: v(4),
        professional: v(5),
        doctorate: v(6),
        age_25_29: v(7) + v(13),
        age_30_34: v(8) + v(14),
        age_35_39: v(9) + v(15),
        age_40_44: v(10) + v(16),
        age_45_49: v(11) + v(17),
        age_50_54: v(12) + v(18),
    })
}
