//! HTTP request handlers for API endpoints.
//!
//! This module contains all the HTTP request handlers that process
//! incoming requests and generate responses, plus the app factory.

pub mod health;
pub mod metrics;
pub mod openapi;
pub mod version;
pub mod vitamin_d;

pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use version::*;
pub use vitamin_d::*;
