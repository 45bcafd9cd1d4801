//! Location and forecast models.
//!
//! The `LocationForecast` family mirrors the subset of the api.met.no
//! `locationforecast/2.0` document the lookup reads. Unknown fields are ignored.

use serde::Deserialize;

/// A validated point on the globe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

/// Midday forecast for a coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub altitude_meters: f64,
    pub symbol_code: String,
}

/// Ordinal sky condition understood by the dose estimation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SkyCondition {
    Cloudless = 0,
    ScatteredClouds = 1,
    BrokenClouds = 2,
    Overcast = 3,
}

impl SkyCondition {
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationForecast {
    pub geometry: PointGeometry,
    pub properties: ForecastProperties,
}

/// GeoJSON point; coordinates are `[lon, lat, altitude]`
#[derive(Debug, Deserialize)]
pub struct PointGeometry {
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    pub timeseries: Vec<ForecastStep>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastStep {
    /// ISO 8601 timestamp, e.g. "2023-11-14T12:00:00Z"
    pub time: String,
    pub data: ForecastStepData,
}

#[derive(Debug, Deserialize)]
pub struct ForecastStepData {
    /// Absent for steps far out in the forecast
    pub next_1_hours: Option<PeriodForecast>,
}

#[derive(Debug, Deserialize)]
pub struct PeriodForecast {
    pub summary: PeriodSummary,
}

#[derive(Debug, Deserialize)]
pub struct PeriodSummary {
    pub symbol_code: String,
}
