//! Version information endpoint handler.

use crate::{
    models::VersionResponse,
    utils::{build_commit, build_timestamp},
};
use actix_web::{Error, Result, web};
use paperclip::actix::api_v2_operation;

/// Version information endpoint
///
/// Returns the crate version plus the commit and time of the build.
#[api_v2_operation(
    summary = "Version Information Endpoint",
    description = "Returns the current API version, commit hash, and build time.",
    tags("Version")
)]
pub async fn version() -> Result<web::Json<VersionResponse>, Error> {
    Ok(web::Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: build_commit().to_string(),
        build_time: build_timestamp().to_string(),
    }))
}
