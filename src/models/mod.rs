//! Data models for the vitamin D API.
//!
//! Request/response models for the HTTP surface, and the domain types
//! passed between the forecast lookup and the dose estimator.

pub mod api;
pub mod dose;
pub mod forecast;

pub use api::*;
pub use dose::*;
pub use forecast::*;
