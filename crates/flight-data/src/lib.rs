//! Flight Data Types
//!
//! Raw flight records, the fixed airline catalog, and inbound request
//! validation shared by the serving layer and the offline trainer.

mod catalog;
mod error;
mod record;
mod validator;

pub use catalog::{is_valid_airline, VALID_AIRLINES};
pub use error::ValidationError;
pub use record::{FlightRecord, FlightType, TIMESTAMP_FORMAT};
pub use validator::Validator;
