//! Route pattern extraction utilities.

use actix_web::HttpRequest;

/// Route label for metrics.
///
/// Prefers the matched resource pattern so unknown paths collapse into a
/// single `/unknown` label instead of one series per probe.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    match req.match_pattern() {
        Some(pattern) => pattern,
        None => "/unknown".to_string(),
    }
}
