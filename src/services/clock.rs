//! Decimal hour to wall-clock conversion.

use chrono::Local;

/// Where the UTC offset applied to estimated hours comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UtcOffsetSource {
    /// The host process's local clock. The request location's own
    /// timezone is not consulted.
    #[default]
    HostLocal,
    /// A fixed offset in whole hours
    Fixed(i32),
}

impl UtcOffsetSource {
    pub fn from_config(offset_hours: Option<i32>) -> Self {
        offset_hours.map_or(UtcOffsetSource::HostLocal, UtcOffsetSource::Fixed)
    }

    /// Offset in whole hours, truncated toward zero
    pub fn hours(&self) -> i32 {
        match self {
            UtcOffsetSource::HostLocal => Local::now().offset().local_minus_utc() / 3600,
            UtcOffsetSource::Fixed(hours) => *hours,
        }
    }
}

/// Format a decimal hour as "HH:MM".
///
/// The integer part is the hour and the fraction, in minutes, is rounded to
/// the nearest minute. Nothing is normalised: 23.999 yields "23:60" and
/// 25.5 yields "25:30".
pub fn decimal_hour_to_hhmm(decimal_hour: f64) -> String {
    let hours = decimal_hour.trunc() as i64;
    // Round half up, like JavaScript's Math.round
    let minutes = ((decimal_hour % 1.0) * 60.0 + 0.5).floor() as i64;

    format!("{hours:02}:{minutes:02}")
}
