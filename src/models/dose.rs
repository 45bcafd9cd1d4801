//! Dose estimation request and result models.

use crate::models::{Coordinate, SkyCondition};
use chrono::{DateTime, Datelike, Utc};

/// Day of year each month starts on (0-based, non-leap year)
pub const MONTH_START_DAY: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Total ozone column, in Dobson units
pub const OZONE_COLUMN: u32 = 350;

const CITY: &str = "8";
const LOCATION_SPECIFICATION: &str = "1";
const OUTPUT_TYPE: &str = "3";

/// Parameters submitted to the dose estimation service
#[derive(Debug, Clone, PartialEq)]
pub struct DoseEstimateRequest {
    /// Day-of-year offset of the month start
    pub month: u32,
    /// Day of month, UTC calendar
    pub mday: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub sky_condition: SkyCondition,
    pub ozone_column: u32,
    /// Site altitude in kilometers
    pub altitude_km: f64,
}

impl DoseEstimateRequest {
    pub fn new(
        coordinate: &Coordinate,
        sky_condition: SkyCondition,
        altitude_meters: f64,
        date: &DateTime<Utc>,
    ) -> Self {
        Self {
            month: month_start_offset(date),
            mday: date.day(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            sky_condition,
            ozone_column: OZONE_COLUMN,
            altitude_km: altitude_meters / 1000.0,
        }
    }

    /// Form fields in the order the service documents them
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("month", self.month.to_string()),
            ("mday", self.mday.to_string()),
            ("city", CITY.to_string()),
            ("location_specification", LOCATION_SPECIFICATION.to_string()),
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("sky_condition", self.sky_condition.ordinal().to_string()),
            ("ozone_column", self.ozone_column.to_string()),
            ("altitude", self.altitude_km.to_string()),
            ("type", OUTPUT_TYPE.to_string()),
        ]
    }
}

/// Values read from the service's trailing result line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoseEstimateResult {
    /// UTC decimal hour synthesis starts
    pub start_hour_decimal: f64,
    /// UTC decimal hour synthesis stops
    pub stop_hour_decimal: f64,
    pub duration_minutes: f64,
}

/// Day-of-year offset for the month of `date`, UTC calendar
pub fn month_start_offset(date: &DateTime<Utc>) -> u32 {
    MONTH_START_DAY[date.month0() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_start_offset_for_march() {
        let date = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        assert_eq!(date.month0(), 2);
        assert_eq!(month_start_offset(&date), 59);
    }

    #[test]
    fn test_month_table_ignores_leap_years() {
        let leap = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        let common = Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(month_start_offset(&leap), 334);
        assert_eq!(month_start_offset(&common), 334);
    }

    #[test]
    fn test_day_of_month_uses_utc_calendar() {
        // 2024-03-31T23:30:00-02:00 is already April 1st in UTC
        let date = Utc.with_ymd_and_hms(2024, 4, 1, 1, 30, 0).unwrap();
        let coordinate = Coordinate {
            longitude: -30.0,
            latitude: 10.0,
        };

        let request = DoseEstimateRequest::new(&coordinate, SkyCondition::Overcast, 0.0, &date);
        assert_eq!(request.month, 90);
        assert_eq!(request.mday, 1);
    }

    #[test]
    fn test_form_fields() {
        let date = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let coordinate = Coordinate {
            longitude: 10.7,
            latitude: 59.9,
        };

        let request = DoseEstimateRequest::new(&coordinate, SkyCondition::Cloudless, 50.0, &date);
        let fields = request.form_fields();

        let expected = vec![
            ("month", "304"),
            ("mday", "14"),
            ("city", "8"),
            ("location_specification", "1"),
            ("latitude", "59.9"),
            ("longitude", "10.7"),
            ("sky_condition", "0"),
            ("ozone_column", "350"),
            ("altitude", "0.05"),
            ("type", "3"),
        ];
        let actual: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        assert_eq!(actual, expected);
    }
}
