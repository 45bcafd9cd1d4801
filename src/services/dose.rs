//! Client for the FastRT vitamin D dose estimation service.
//!
//! The service is a CGI form that answers with a small HTML page. The last
//! `<BR>`-separated line of the page holds three numbers: the start and stop
//! of the synthesis window as UTC decimal hours, then the exposure time in
//! minutes.

use crate::{
    error::{Upstream, VitaminDError},
    models::{DoseEstimateRequest, DoseEstimateResult},
    services::upstream::UpstreamClient,
};
use async_trait::async_trait;

const LINE_BREAK: &str = "<BR>";
const BODY_END: &str = "</body>";

/// Source of vitamin D synthesis estimates
#[async_trait]
pub trait DoseEstimator: Send + Sync {
    async fn estimate(
        &self,
        request: &DoseEstimateRequest,
    ) -> Result<DoseEstimateResult, VitaminDError>;
}

pub struct FastRtDoseClient {
    http: UpstreamClient,
    url: String,
}

impl FastRtDoseClient {
    pub fn new(http: UpstreamClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl DoseEstimator for FastRtDoseClient {
    async fn estimate(
        &self,
        request: &DoseEstimateRequest,
    ) -> Result<DoseEstimateResult, VitaminDError> {
        let text = self
            .http
            .post_form(&self.url, &request.form_fields())
            .await
            .map_err(|e| VitaminDError::upstream(Upstream::DoseEstimator, e.to_string()))?;

        parse_dose_reply(&text)
    }
}

/// Read the three result values from the service's reply page
pub fn parse_dose_reply(text: &str) -> Result<DoseEstimateResult, VitaminDError> {
    let last_line = text.split(LINE_BREAK).last().unwrap_or_default();
    let last_line = last_line.split(BODY_END).next().unwrap_or_default().trim();

    let values: Vec<f64> = last_line
        .split(' ')
        .filter_map(leading_number)
        .filter(|value| value.is_finite())
        .take(3)
        .collect();

    match values[..] {
        [start_hour_decimal, stop_hour_decimal, duration_minutes] => Ok(DoseEstimateResult {
            start_hour_decimal,
            stop_hour_decimal,
            duration_minutes,
        }),
        _ => Err(VitaminDError::upstream(
            Upstream::DoseEstimator,
            format!(
                "expected three numbers in the result line, found {}: {:?}",
                values.len(),
                last_line
            ),
        )),
    }
}

/// Read the longest decimal literal at the start of `token`.
///
/// Leading whitespace is skipped and anything after the literal is ignored,
/// so `"120min"` reads as 120 and `"16.4\n120"` as 16.4.
fn leading_number(token: &str) -> Option<f64> {
    let token = token.trim_start();
    let bytes = token.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let integer_digits = digits_from(end);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = digits_from(end + 1);
        if integer_digits + fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }

    if integer_digits + fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = digits_from(exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    token[..end].parse().ok()
}
