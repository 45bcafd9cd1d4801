//! Utility functions and helper modules.
//!
//! Request inspection helpers used by the middleware, and build metadata.

pub mod build_info;
pub mod http;
pub mod route;

pub use build_info::*;
pub use http::*;
pub use route::*;
