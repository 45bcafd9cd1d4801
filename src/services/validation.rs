//! Query parameter validation for the vitamin D endpoint.

use crate::{
    error::{QueryField, VitaminDError},
    models::{Coordinate, VitaminDQuery},
};
use chrono::{DateTime, Utc};

/// Query parameters after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedQuery {
    pub coordinate: Coordinate,
    pub date_ms: f64,
    pub date: DateTime<Utc>,
}

/// Validate the raw query, checking `lat`, then `lng`, then `dateMs`
pub fn validate_query(query: &VitaminDQuery) -> Result<ValidatedQuery, VitaminDError> {
    let lat = parse_number(query.lat.as_deref(), QueryField::Latitude)?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(VitaminDError::invalid(
            QueryField::Latitude,
            "Latitude must be between -90 and 90",
        ));
    }

    let lng = parse_number(query.lng.as_deref(), QueryField::Longitude)?;
    if !(-180.0..=180.0).contains(&lng) {
        return Err(VitaminDError::invalid(
            QueryField::Longitude,
            "Longitude must be between -180 and 180",
        ));
    }

    let date_ms = parse_number(query.date_ms.as_deref(), QueryField::DateMs)?;
    // Sub-millisecond precision is dropped
    let date = DateTime::from_timestamp_millis(date_ms.trunc() as i64).ok_or_else(|| {
        VitaminDError::invalid(
            QueryField::DateMs,
            "The \"dateMs\" search parameter is outside the supported date range.",
        )
    })?;

    Ok(ValidatedQuery {
        coordinate: Coordinate {
            longitude: lng,
            latitude: lat,
        },
        date_ms,
        date,
    })
}

fn parse_number(raw: Option<&str>, field: QueryField) -> Result<f64, VitaminDError> {
    raw.map(str::trim)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .ok_or_else(|| VitaminDError::missing(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(lat: Option<&str>, lng: Option<&str>, date_ms: Option<&str>) -> VitaminDQuery {
        VitaminDQuery {
            lat: lat.map(String::from),
            lng: lng.map(String::from),
            date_ms: date_ms.map(String::from),
        }
    }

    #[test]
    fn test_valid_query() {
        let validated =
            validate_query(&query(Some("59.9"), Some("10.7"), Some("1700000000000"))).unwrap();

        assert_eq!(validated.coordinate.latitude, 59.9);
        assert_eq!(validated.coordinate.longitude, 10.7);
        assert_eq!(validated.date_ms, 1_700_000_000_000.0);
        assert_eq!(validated.date.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_boundary_coordinates_are_valid() {
        assert!(validate_query(&query(Some("-90"), Some("180"), Some("0"))).is_ok());
        assert!(validate_query(&query(Some(" 90 "), Some("-180"), Some("-1000"))).is_ok());
    }

    #[test]
    fn test_each_missing_field_is_named() {
        let cases = [
            (query(None, Some("10.7"), Some("1")), QueryField::Latitude),
            (query(Some("59.9"), None, Some("1")), QueryField::Longitude),
            (query(Some("59.9"), Some("10.7"), None), QueryField::DateMs),
        ];

        for (q, field) in cases {
            let err = validate_query(&q).unwrap_err();
            assert_eq!(err.field(), Some(field));
            assert!(err.to_string().contains(&field.to_string()));
        }
    }

    #[test]
    fn test_non_numeric_fields_are_rejected() {
        let cases = [
            (query(Some("north"), Some("10.7"), Some("1")), QueryField::Latitude),
            (query(Some("59.9"), Some(""), Some("1")), QueryField::Longitude),
            (query(Some("59.9"), Some("10.7"), Some("yesterday")), QueryField::DateMs),
            (query(Some("NaN"), Some("10.7"), Some("1")), QueryField::Latitude),
            (query(Some("59.9"), Some("10.7"), Some("inf")), QueryField::DateMs),
        ];

        for (q, field) in cases {
            assert_eq!(validate_query(&q).unwrap_err().field(), Some(field));
        }
    }

    #[test]
    fn test_first_invalid_field_is_reported() {
        let err = validate_query(&query(None, None, None)).unwrap_err();
        assert_eq!(err.field(), Some(QueryField::Latitude));
    }

    #[test]
    fn test_out_of_range_coordinates_are_rejected() {
        let err = validate_query(&query(Some("90.5"), Some("0"), Some("1"))).unwrap_err();
        assert_eq!(err.field(), Some(QueryField::Latitude));

        let err = validate_query(&query(Some("0"), Some("-181"), Some("1"))).unwrap_err();
        assert_eq!(err.field(), Some(QueryField::Longitude));
    }

    #[test]
    fn test_unrepresentable_date_is_rejected() {
        let err = validate_query(&query(Some("0"), Some("0"), Some("1e300"))).unwrap_err();
        assert_eq!(err.field(), Some(QueryField::DateMs));
    }
}
