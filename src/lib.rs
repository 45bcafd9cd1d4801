//! Vitamin D API - estimates the daily vitamin D synthesis window for a location
//!
//! Each request to `GET /api/vitamin-d?lat=..&lng=..&dateMs=..` runs four
//! steps in sequence:
//! - validate the query parameters
//! - fetch the midday forecast for the coordinate from api.met.no
//! - classify the forecast's weather symbol into a sky condition
//! - submit the parameters to the FastRT dose calculator and convert its
//!   UTC decimal hours into local `HH:MM` clock times
//!
//! ## Architecture
//!
//! The codebase is organized into focused modules:
//! - `models/` - Request/response models and domain types
//! - `handlers/` - HTTP request handlers and the app factory
//! - `middleware/` - CORS headers, request IDs and metrics
//! - `services/` - The estimation pipeline, upstream client and metrics
//! - `utils/` - Request inspection helpers and build metadata
//! - `config/` - Configuration structures and environment loading
//! - `error` - The error taxonomy returned by every pipeline step
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::HttpServer;
//! use vitamind_api::{AppState, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let state = AppState::from_env().map_err(std::io::Error::other)?;
//!     HttpServer::new(move || create_app(state.clone()))
//!         .bind("127.0.0.1:8080")?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types and functions for convenience
pub use config::{CorsHeadersConfig, MetricsConfig, ServerConfig, UpstreamConfig};
pub use error::{QueryField, StartupError, Upstream, VitaminDError};
pub use handlers::{
    AppState, create_app, create_base_app, create_openapi_spec, get_metrics, health,
    render_payload, version, vitamin_d,
};
pub use middleware::{CorsHeaders, MetricsMiddleware, RequestId, RequestIdMiddleware};
pub use models::{
    Coordinate, DoseEstimateRequest, DoseEstimateResult, ForecastSample, HealthResponse,
    SkyCondition, VersionResponse, VitaminDQuery, VitaminDResponse,
};
pub use services::{
    AppMetrics, DoseEstimator, FastRtDoseClient, ForecastProvider, MetNoForecastClient,
    UpstreamClient, UpstreamMetrics, UtcOffsetSource, ValidatedQuery, VitaminDService,
    classify_sky, decimal_hour_to_hhmm, parse_dose_reply, parse_forecast, validate_query,
};
