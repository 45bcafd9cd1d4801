//! Configuration for the outbound forecast and dose estimation calls.

use std::env;

pub const DEFAULT_FORECAST_URL: &str =
    "https://api.met.no/weatherapi/locationforecast/2.0/.json";
pub const DEFAULT_DOSE_ESTIMATOR_URL: &str = "https://fastrt.nilu.no/cgi-bin/olaeng/VitD-ez.cgi";

/// Endpoints and client settings for the two upstream providers
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Point forecast endpoint, queried with `lat` and `lon`
    pub forecast_url: String,

    /// Dose estimation CGI endpoint, receives a urlencoded form
    pub dose_estimator_url: String,

    /// api.met.no rejects requests without an identifying User-Agent
    pub user_agent: String,

    /// Log every upstream call, not only failures
    pub enable_detailed_logging: bool,

    /// Fixed UTC offset in hours, replacing the host clock's offset
    pub utc_offset_hours: Option<i32>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            dose_estimator_url: DEFAULT_DOSE_ESTIMATOR_URL.to_string(),
            user_agent: default_user_agent(),
            enable_detailed_logging: true,
            utc_offset_hours: None,
        }
    }
}

impl UpstreamConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let forecast_url =
            env::var("FORECAST_URL").unwrap_or_else(|_| DEFAULT_FORECAST_URL.to_string());

        let dose_estimator_url = env::var("DOSE_ESTIMATOR_URL")
            .unwrap_or_else(|_| DEFAULT_DOSE_ESTIMATOR_URL.to_string());

        let user_agent = env::var("UPSTREAM_USER_AGENT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_user_agent);

        let enable_detailed_logging = env::var("UPSTREAM_DETAILED_LOGGING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        let utc_offset_hours = env::var("UTC_OFFSET_HOURS")
            .ok()
            .and_then(|v| v.trim().parse().ok());

        Self {
            forecast_url,
            dose_estimator_url,
            user_agent,
            enable_detailed_logging,
            utc_offset_hours,
        }
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
