//! Sky condition classification from forecast symbol codes.

use crate::models::SkyCondition;

/// Map a symbol code such as `partlycloudy_night` to a sky condition.
///
/// Checks run in order and the first match wins; anything unrecognised is
/// treated as overcast.
pub fn classify_sky(symbol_code: &str) -> SkyCondition {
    if symbol_code.contains("clearsky") {
        SkyCondition::Cloudless
    } else if symbol_code.contains("fair") {
        SkyCondition::ScatteredClouds
    } else if symbol_code.contains("partlycloudy") {
        SkyCondition::BrokenClouds
    } else {
        SkyCondition::Overcast
    }
}
