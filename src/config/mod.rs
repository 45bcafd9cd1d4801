//! Configuration structures and loading utilities.
//!
//! Every structure offers a `Default` and a `from_env()` loader that falls
//! back to the default for any variable that is unset or unparsable.

pub mod cors;
pub mod metrics;
pub mod server;
pub mod upstream;

pub use cors::*;
pub use metrics::*;
pub use server::*;
pub use upstream::*;
