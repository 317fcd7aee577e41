//! Inbound Request Validation
//!
//! The serving layer validates flight attributes against the fixed catalogs
//! before anything reaches the encoder; encoder-side failures are a
//! last-resort guard, not the primary validation path.

use crate::catalog::is_valid_airline;
use crate::error::ValidationError;
use crate::record::{FlightRecord, FlightType};

/// Validator for raw flight attribute triples.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate an operator name against the airline catalog.
    pub fn validate_operator(&self, operator: &str) -> Result<(), ValidationError> {
        if is_valid_airline(operator) {
            Ok(())
        } else {
            Err(ValidationError::UnknownAirline(operator.to_string()))
        }
    }

    /// Validate and parse a flight type ("N" or "I").
    pub fn validate_flight_type(&self, flight_type: &str) -> Result<FlightType, ValidationError> {
        flight_type.parse()
    }

    /// Validate a calendar month (1-12).
    pub fn validate_month(&self, month: u32) -> Result<(), ValidationError> {
        if (1..=12).contains(&month) {
            Ok(())
        } else {
            Err(ValidationError::MonthOutOfRange(month))
        }
    }

    /// Validate a full attribute triple, returning a record on success.
    pub fn validate_flight(
        &self,
        operator: &str,
        flight_type: &str,
        month: u32,
    ) -> Result<FlightRecord, ValidationError> {
        self.validate_operator(operator)?;
        let flight_type = self.validate_flight_type(flight_type)?;
        self.validate_month(month)?;
        Ok(FlightRecord::new(operator, flight_type, month))
    }

    /// Validate a whole inbound batch of attribute triples, in order,
    /// stopping at the first violation; empty batches are rejected.
    pub fn validate_batch<'a>(
        &self,
        flights: impl IntoIterator<Item = (&'a str, &'a str, u32)>,
    ) -> Result<Vec<FlightRecord>, ValidationError> {
        let mut records = Vec::new();
        for (operator, flight_type, month) in flights {
            records.push(self.validate_flight(operator, flight_type, month)?);
        }
        if records.is_empty() {
            return Err(ValidationError::EmptyFlightList);
        }
        Ok(records)
    }
}
