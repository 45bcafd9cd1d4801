//! Vitamin D synthesis window estimation.
//!
//! Ties the request pipeline together: forecast lookup, sky classification,
//! dose estimation and conversion of the result to local clock times.

use crate::{
    config::UpstreamConfig,
    error::VitaminDError,
    models::{DoseEstimateRequest, DoseEstimateResult, VitaminDResponse},
    services::{
        clock::{UtcOffsetSource, decimal_hour_to_hhmm},
        dose::{DoseEstimator, FastRtDoseClient},
        forecast::{ForecastProvider, MetNoForecastClient},
        sky::classify_sky,
        upstream::{UpstreamClient, UpstreamMetrics},
        validation::ValidatedQuery,
    },
};
use std::sync::Arc;

/// Stateless estimation service shared by all requests
#[derive(Clone)]
pub struct VitaminDService {
    forecast: Arc<dyn ForecastProvider>,
    dose: Arc<dyn DoseEstimator>,
    offset: UtcOffsetSource,
}

impl VitaminDService {
    pub fn new(
        forecast: Arc<dyn ForecastProvider>,
        dose: Arc<dyn DoseEstimator>,
        offset: UtcOffsetSource,
    ) -> Self {
        Self {
            forecast,
            dose,
            offset,
        }
    }

    /// Build the service against the configured provider endpoints
    pub fn from_config(
        config: &UpstreamConfig,
        metrics: Option<UpstreamMetrics>,
    ) -> Result<Self, reqwest::Error> {
        let http = UpstreamClient::new(config, metrics)?;

        Ok(Self::new(
            Arc::new(MetNoForecastClient::new(http.clone(), &config.forecast_url)),
            Arc::new(FastRtDoseClient::new(http, &config.dose_estimator_url)),
            UtcOffsetSource::from_config(config.utc_offset_hours),
        ))
    }

    /// Estimate the synthesis window for a validated query.
    ///
    /// The dose request depends on the forecast, so the two provider calls
    /// run one after the other.
    pub async fn estimate(&self, query: &ValidatedQuery) -> Result<VitaminDResponse, VitaminDError> {
        let sample = self.forecast.midday_forecast(&query.coordinate).await?;
        let sky_condition = classify_sky(&sample.symbol_code);

        tracing::debug!(
            latitude = query.coordinate.latitude,
            longitude = query.coordinate.longitude,
            symbol_code = %sample.symbol_code,
            sky_condition = sky_condition.ordinal(),
            altitude_meters = sample.altitude_meters,
            "Resolved midday forecast"
        );

        let request = DoseEstimateRequest::new(
            &query.coordinate,
            sky_condition,
            sample.altitude_meters,
            &query.date,
        );
        let estimate = self.dose.estimate(&request).await?;

        Ok(to_local_response(&estimate, self.offset.hours()))
    }
}

/// Shift the UTC window by `offset_hours` and format it as clock times
pub fn to_local_response(estimate: &DoseEstimateResult, offset_hours: i32) -> VitaminDResponse {
    let offset = f64::from(offset_hours);

    VitaminDResponse {
        start_hour: decimal_hour_to_hhmm(estimate.start_hour_decimal + offset),
        stop_hour: decimal_hour_to_hhmm(estimate.stop_hour_decimal + offset),
        duration: estimate.duration_minutes,
    }
}
