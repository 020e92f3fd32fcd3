//! Geofence Library
//!
//! Great-circle geometry for circular exclusion zones on the map:
//! Haversine distance, mile/kilometre conversion, circle overlap and
//! GeoJSON export for the front-end overlay.
//!
//! # Overlap Rule
//!
//! ```text
//! overlap(A, B)  ⇔  haversine_km(A.center, B.center) < (A.radius_mi + B.radius_mi) · 1.609344
//! ```
//!
//! Circles that exactly touch do not overlap.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;

/// Mean Earth radius in km
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Statute mile in km
pub const KM_PER_MILE: f64 = 1.609344;

/// Two centers closer than this are treated as the same site (10 m)
pub const SAME_SITE_TOLERANCE_KM: f64 = 0.01;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("latitude {0} outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} outside [-180, 180]")]
    InvalidLongitude(f64),
    #[error("radius {0} must be a positive number of miles")]
    InvalidRadius(f64),
}

pub type Result<T> = std::result::Result<T, GeoError>;

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::InvalidLatitude(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(GeoError::InvalidLongitude(lng));
        }
        Ok(Self { lat, lng })
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.lat, self.lng, other.lat, other.lng)
    }

    pub fn is_same_site(&self, other: &GeoPoint) -> bool {
        self.distance_km(other) < SAME_SITE_TOLERANCE_KM
    }
}

/// Haversine distance between two points in km
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1 * PI / 180.0;
    let lat2_rad = lat2 * PI / 180.0;
    let dlat = (lat2 - lat1) * PI / 180.0;
    let dlng = (lng2 - lng1) * PI / 180.0;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

pub fn miles_to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

/// Distance between two circle centers against the buffer they need
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Separation {
    pub distance_km: f64,
    pub min_required_km: f64,
}

impl Separation {
    pub fn overlaps(&self) -> bool {
        self.distance_km < self.min_required_km
    }
}

/// Circular zone with a radius in miles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: GeoPoint,
    pub radius_miles: f64,
}

impl Circle {
    pub fn new(center: GeoPoint, radius_miles: f64) -> Result<Self> {
        if !radius_miles.is_finite() || radius_miles <= 0.0 {
            return Err(GeoError::InvalidRadius(radius_miles));
        }
        Ok(Self {
            center,
            radius_miles,
        })
    }

    pub fn radius_km(&self) -> f64 {
        miles_to_km(self.radius_miles)
    }

    pub fn area_sq_miles(&self) -> f64 {
        PI * self.radius_miles * self.radius_miles
    }

    pub fn separation(&self, other: &Circle) -> Separation {
        Separation {
            distance_km: self.center.distance_km(&other.center),
            min_required_km: miles_to_km(self.radius_miles + other.radius_miles),
        }
    }

    pub fn overlaps(&self, other: &Circle) -> bool {
        self.separation(other).overlaps()
    }

    /// Point feature carrying the radius; map clients draw the circle.
    pub fn to_feature(&self, id: &str, mut properties: JsonObject) -> Feature {
        properties.insert("radiusMiles".to_string(), self.radius_miles.into());
        properties.insert("radiusKm".to_string(), self.radius_km().into());

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![
                self.center.lng,
                self.center.lat,
            ]))),
            id: Some(geojson::feature::Id::String(id.to_string())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

pub fn feature_collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
