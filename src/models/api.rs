//! API request and response models for the HTTP endpoints.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize, Serializer};

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response model for the version information endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct VersionResponse {
    pub version: String,
    pub commit: String,
    pub build_time: String,
}

/// Raw query parameters for the vitamin D endpoint.
///
/// Kept as strings so validation can report which parameter is missing or
/// malformed instead of failing the whole extraction.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct VitaminDQuery {
    /// Latitude in decimal degrees
    pub lat: Option<String>,
    /// Longitude in decimal degrees
    pub lng: Option<String>,
    /// Date as Unix epoch milliseconds
    #[serde(rename = "dateMs")]
    pub date_ms: Option<String>,
}

impl VitaminDQuery {
    /// Read the parameters from a raw query string.
    ///
    /// Values are percent-decoded and the first occurrence of a repeated
    /// parameter wins.
    pub fn from_query_string(query: &str) -> Self {
        let mut parsed = Self::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "lat" => &mut parsed.lat,
                "lng" => &mut parsed.lng,
                "dateMs" => &mut parsed.date_ms,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        parsed
    }
}

/// Response model for the vitamin D endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct VitaminDResponse {
    /// Local wall-clock time synthesis starts, "HH:MM"
    #[serde(rename = "startHour")]
    pub start_hour: String,
    /// Local wall-clock time synthesis stops, "HH:MM"
    #[serde(rename = "stopHour")]
    pub stop_hour: String,
    /// Exposure needed, in minutes
    #[serde(serialize_with = "serialize_number")]
    pub duration: f64,
}

/// Integral values are written as JSON integers (`120`, not `120.0`)
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
