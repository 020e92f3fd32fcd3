//! Population-weighted aggregation of per-ZIP census records
//!
//! ```text
//! medianIncome      = Σ(income_z · pop_z) / Σ pop_z
//! incomeMultiplier  = clamp(medianIncome / 60000, 0.4, 1.0)
//! qualifiedAudience = ⌊prime · 0.70 · m⌋ + ⌊secondary · 0.55 · m⌋
//! ```

use geofence::Circle;

use crate::{DemographicSummary, ZipDemographics};

/// Income at which the multiplier saturates
pub const INCOME_REFERENCE: f64 = 60_000.0;
pub const MIN_INCOME_MULTIPLIER: f64 = 0.4;
pub const MAX_INCOME_MULTIPLIER: f64 = 1.0;

/// Share of ages 25-44 above the income threshold
pub const PRIMARY_QUALIFIED_RATE: f64 = 0.70;
/// Share of ages 45-54 above the income threshold
pub const SECONDARY_QUALIFIED_RATE: f64 = 0.55;

#[derive(Debug, Default)]
struct Totals {
    population: u64,
    weighted_income: u64,
    weighted_home_value: u64,
    college_educated: u64,
    prime_age: u64,
    secondary_age: u64,
}

pub fn income_multiplier(median_income: u64) -> f64 {
    (median_income as f64 / INCOME_REFERENCE).clamp(MIN_INCOME_MULTIPLIER, MAX_INCOME_MULTIPLIER)
}

pub fn aggregate(records: &[ZipDemographics], area: &Circle) -> DemographicSummary {
    let totals = records.iter().fold(Totals::default(), |mut acc, zip| {
        acc.population += zip.total_population;
        acc.weighted_income += zip.median_income * zip.total_population;
        acc.weighted_home_value += zip.median_home_value * zip.total_population;
        acc.college_educated += zip.college_educated();
        acc.prime_age += zip.prime_age();
        acc.secondary_age += zip.secondary_age();
        acc
    });

    let (median_income, median_home_value) = match totals.population {
        0 => (0, 0),
        pop => (totals.weighted_income / pop, totals.weighted_home_value / pop),
    };

    let multiplier = income_multiplier(median_income);
    let primary = (totals.prime_age as f64 * PRIMARY_QUALIFIED_RATE * multiplier).floor() as u64;
    let secondary =
        (totals.secondary_age as f64 * SECONDARY_QUALIFIED_RATE * multiplier).floor() as u64;
    let qualified_audience = primary + secondary;

    let area_sq_miles = area.area_sq_miles();

    DemographicSummary {
        total_population: totals.population,
        qualified_audience,
        median_income,
        median_home_value,
        college_educated: totals.college_educated,
        prime_age: totals.prime_age,
        secondary_age: totals.secondary_age,
        qualified_percent: if totals.population > 0 {
            qualified_audience as f64 / totals.population as f64
        } else {
            0.0
        },
        area_sq_miles,
        population_density: totals.population as f64 / area_sq_miles,
        zip_codes: records.iter().map(|z| z.zip_code.clone()).collect(),
    }
}
