//! Weather lookup against the api.met.no point forecast.

use crate::{
    error::{Upstream, VitaminDError},
    models::{Coordinate, ForecastSample, LocationForecast},
    services::upstream::UpstreamClient,
};
use async_trait::async_trait;

/// Marks the forecast step valid at 12:00 UTC
const MIDDAY_MARKER: &str = "T12:00:00Z";

/// Source of midday forecasts
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn midday_forecast(&self, coordinate: &Coordinate)
    -> Result<ForecastSample, VitaminDError>;
}

/// Client for the `locationforecast/2.0` endpoint
pub struct MetNoForecastClient {
    http: UpstreamClient,
    url: String,
}

impl MetNoForecastClient {
    pub fn new(http: UpstreamClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ForecastProvider for MetNoForecastClient {
    async fn midday_forecast(
        &self,
        coordinate: &Coordinate,
    ) -> Result<ForecastSample, VitaminDError> {
        let query = [
            ("lat", coordinate.latitude.to_string()),
            ("lon", coordinate.longitude.to_string()),
        ];

        let body = self
            .http
            .get_text(&self.url, &query)
            .await
            .map_err(|e| VitaminDError::upstream(Upstream::Forecast, e.to_string()))?;

        parse_forecast(&body)
    }
}

/// Extract the midday sample from a forecast document.
///
/// Picks the first step whose timestamp contains `T12:00:00Z`, which is the
/// nearest upcoming midday in the forecast.
pub fn parse_forecast(body: &str) -> Result<ForecastSample, VitaminDError> {
    let forecast: LocationForecast = serde_json::from_str(body).map_err(|e| {
        VitaminDError::upstream(Upstream::Forecast, format!("unparseable response: {e}"))
    })?;

    let midday = forecast
        .properties
        .timeseries
        .iter()
        .find(|step| step.time.contains(MIDDAY_MARKER))
        .ok_or_else(|| {
            VitaminDError::NotFound(
                "No midday forecast entry was found for the requested location.".to_string(),
            )
        })?;

    let next_hour = midday.data.next_1_hours.as_ref().ok_or_else(|| {
        VitaminDError::upstream(
            Upstream::Forecast,
            format!("midday entry {} has no next_1_hours summary", midday.time),
        )
    })?;

    let altitude_meters = forecast.geometry.coordinates.get(2).copied().ok_or_else(|| {
        VitaminDError::upstream(Upstream::Forecast, "response geometry has no altitude")
    })?;

    Ok(ForecastSample {
        altitude_meters,
        symbol_code: next_hour.summary.symbol_code.clone(),
    })
}
