//! Build metadata emitted by `build.rs`.

/// Short git SHA of the build, or "unknown" outside a git checkout
pub fn build_commit() -> &'static str {
    option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
}

/// Build timestamp in RFC 3339
pub fn build_timestamp() -> &'static str {
    option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
}
