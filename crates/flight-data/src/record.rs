//! Flight Record Types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Timestamp layout used by the scheduled/actual departure fields.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Domestic vs. international flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightType {
    /// "N" on the wire
    #[serde(rename = "N")]
    Domestic,
    /// "I" on the wire
    #[serde(rename = "I")]
    International,
}

impl FlightType {
    /// Wire representation ("N" or "I").
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightType::Domestic => "N",
            FlightType::International => "I",
        }
    }
}

impl fmt::Display for FlightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlightType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(FlightType::Domestic),
            "I" => Ok(FlightType::International),
            other => Err(ValidationError::InvalidFlightType(other.to_string())),
        }
    }
}

/// A single raw flight, as handed to the encoder.
///
/// Serving-path records carry only the three categorical attributes; the
/// departure timestamps are present on training rows and consumed when
/// labels are requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Operating airline, one of [`crate::VALID_AIRLINES`]
    pub operator: String,
    /// Domestic or international
    pub flight_type: FlightType,
    /// Calendar month, 1-12
    pub month: u32,
    /// Scheduled departure, "YYYY-MM-DD HH:MM:SS" (training rows only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_departure: Option<String>,
    /// Actual departure, "YYYY-MM-DD HH:MM:SS" (training rows only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_departure: Option<String>,
}

impl FlightRecord {
    /// Build a serving-path record (no timestamps).
    pub fn new(operator: impl Into<String>, flight_type: FlightType, month: u32) -> Self {
        Self {
            operator: operator.into(),
            flight_type,
            month,
            scheduled_departure: None,
            actual_departure: None,
        }
    }

    /// Build a training row carrying both departure timestamps.
    pub fn with_departures(
        operator: impl Into<String>,
        flight_type: FlightType,
        month: u32,
        scheduled: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            operator: operator.into(),
            flight_type,
            month,
            scheduled_departure: Some(scheduled.into()),
            actual_departure: Some(actual.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_type_round_trip() {
        assert_eq!("N".parse::<FlightType>().unwrap(), FlightType::Domestic);
        assert_eq!("I".parse::<FlightType>().unwrap(), FlightType::International);
        assert_eq!(FlightType::International.as_str(), "I");
    }

    #[test]
    fn test_flight_type_rejects_unknown() {
        assert!("X".parse::<FlightType>().is_err());
        assert!("".parse::<FlightType>().is_err());
    }

    #[test]
    fn test_record_constructors() {
        let r = FlightRecord::new("Copa Air", FlightType::Domestic, 3);
        assert!(r.scheduled_departure.is_none());

        let t = FlightRecord::with_departures(
            "Copa Air",
            FlightType::Domestic,
            3,
            "2023-01-01 10:00:00",
            "2023-01-01 10:20:00",
        );
        assert_eq!(t.actual_departure.as_deref(), Some("2023-01-01 10:20:00"));
    }
}
