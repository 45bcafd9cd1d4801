//! Business logic and service layer modules.
//!
//! This module contains the request pipeline (validation, forecast lookup,
//! sky classification, dose estimation, clock conversion), the upstream
//! HTTP client and metrics collection.

pub mod clock;
pub mod dose;
pub mod forecast;
pub mod metrics;
pub mod sky;
pub mod upstream;
pub mod validation;
pub mod vitamin_d;

pub use clock::*;
pub use dose::*;
pub use forecast::*;
pub use metrics::*;
pub use sky::*;
pub use upstream::*;
pub use validation::*;
pub use vitamin_d::*;
