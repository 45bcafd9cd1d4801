//! Error types for the vitamin D estimate pipeline.
//!
//! Every step of a request (validation, forecast lookup, dose estimation)
//! returns a [`VitaminDError`]. The handler converts it into a `400 Bad Request`
//! with the error message as a plaintext body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;
use thiserror::Error;

/// Query parameter a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    Latitude,
    Longitude,
    DateMs,
}

impl QueryField {
    /// Name of the query string parameter
    pub fn param(&self) -> &'static str {
        match self {
            QueryField::Latitude => "lat",
            QueryField::Longitude => "lng",
            QueryField::DateMs => "dateMs",
        }
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryField::Latitude => f.write_str("latitude"),
            QueryField::Longitude => f.write_str("longitude"),
            QueryField::DateMs => f.write_str("dateMs"),
        }
    }
}

/// External provider an upstream error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Forecast,
    DoseEstimator,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upstream::Forecast => f.write_str("Weather forecast service"),
            Upstream::DoseEstimator => f.write_str("Dose estimation service"),
        }
    }
}

/// Errors produced while computing a vitamin D synthesis window
#[derive(Debug, Error)]
pub enum VitaminDError {
    /// A required query parameter is missing, non-numeric or out of range
    #[error("{message}")]
    InvalidArgument { field: QueryField, message: String },

    /// A provider could not be reached or replied with something unusable
    #[error("{service} error: {message}")]
    Upstream { service: Upstream, message: String },

    /// The forecast has no midday entry
    #[error("{0}")]
    NotFound(String),
}

impl VitaminDError {
    pub fn missing(field: QueryField) -> Self {
        let message = match field {
            QueryField::DateMs => format!(
                "You did not provide a value for the \"{}\" search parameter.",
                field.param()
            ),
            _ => format!(
                "You did not provide a {} value in the \"{}\" search parameter.",
                field,
                field.param()
            ),
        };
        VitaminDError::InvalidArgument { field, message }
    }

    pub fn invalid(field: QueryField, message: impl Into<String>) -> Self {
        VitaminDError::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    pub fn upstream(service: Upstream, message: impl Into<String>) -> Self {
        VitaminDError::Upstream {
            service,
            message: message.into(),
        }
    }

    /// Short machine-readable kind, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            VitaminDError::InvalidArgument { .. } => "invalid_argument",
            VitaminDError::Upstream { .. } => "upstream_error",
            VitaminDError::NotFound(_) => "not_found",
        }
    }

    /// The query parameter this error refers to, if it is a validation error
    pub fn field(&self) -> Option<QueryField> {
        match self {
            VitaminDError::InvalidArgument { field, .. } => Some(*field),
            _ => None,
        }
    }
}

impl ResponseError for VitaminDError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}

/// Errors that can occur while assembling the application state
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to create metrics: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
