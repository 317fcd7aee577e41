//! Delay Label Generation
//!
//! Training rows carry scheduled and actual departure timestamps; a flight
//! counts as delayed when it left more than 15 minutes late.

use chrono::NaiveDateTime;
use flight_data::{FlightRecord, TIMESTAMP_FORMAT};

use crate::EncodeError;

/// Delay threshold in minutes; strictly above it means label 1.
pub const DELAY_THRESHOLD_MINUTES: f64 = 15.0;

/// Signed departure delay in minutes (actual minus scheduled).
///
/// Negative values mean the flight left early.
pub fn departure_delay_minutes(scheduled: NaiveDateTime, actual: NaiveDateTime) -> f64 {
    (actual - scheduled).num_seconds() as f64 / 60.0
}

/// Compute the binary delay label for one training row.
pub(crate) fn label_for_row(row: usize, record: &FlightRecord) -> Result<u8, EncodeError> {
    let scheduled = parse_departure(row, "scheduled_departure", &record.scheduled_departure)?;
    let actual = parse_departure(row, "actual_departure", &record.actual_departure)?;

    let min_diff = departure_delay_minutes(scheduled, actual);
    Ok(u8::from(min_diff > DELAY_THRESHOLD_MINUTES))
}

fn parse_departure(
    row: usize,
    field: &'static str,
    value: &Option<String>,
) -> Result<NaiveDateTime, EncodeError> {
    let raw = value
        .as_deref()
        .ok_or(EncodeError::MissingField { row, field })?;

    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|_| EncodeError::BadTimestamp {
        row,
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flight_data::FlightType;

    fn row(scheduled: &str, actual: &str) -> FlightRecord {
        FlightRecord::with_departures("Copa Air", FlightType::Domestic, 1, scheduled, actual)
    }

    #[test]
    fn test_exactly_fifteen_minutes_is_on_time() {
        let r = row("2023-01-01 10:00:00", "2023-01-01 10:15:00");
        assert_eq!(label_for_row(0, &r).unwrap(), 0);
    }

    #[test]
    fn test_sixteen_minutes_is_delayed() {
        let r = row("2023-01-01 10:00:00", "2023-01-01 10:16:00");
        assert_eq!(label_for_row(0, &r).unwrap(), 1);
    }

    #[test]
    fn test_early_departure_is_on_time() {
        let r = row("2023-01-01 10:00:00", "2023-01-01 09:30:00");
        assert_eq!(label_for_row(0, &r).unwrap(), 0);
    }

    #[test]
    fn test_delay_minutes_is_signed() {
        let scheduled =
            NaiveDateTime::parse_from_str("2023-01-01 10:00:00", TIMESTAMP_FORMAT).unwrap();
        let actual =
            NaiveDateTime::parse_from_str("2023-01-01 09:30:00", TIMESTAMP_FORMAT).unwrap();
        assert_eq!(departure_delay_minutes(scheduled, actual), -30.0);
    }

    #[test]
    fn test_missing_timestamp() {
        let mut r = row("2023-01-01 10:00:00", "2023-01-01 10:16:00");
        r.actual_departure = None;
        assert!(matches!(
            label_for_row(3, &r),
            Err(EncodeError::MissingField {
                row: 3,
                field: "actual_departure"
            })
        ));
    }

    #[test]
    fn test_unparseable_timestamp() {
        let r = row("2023-01-01 10:00:00", "01/01/2023 10:16");
        assert!(matches!(
            label_for_row(0, &r),
            Err(EncodeError::BadTimestamp {
                field: "actual_departure",
                ..
            })
        ));
    }
}
