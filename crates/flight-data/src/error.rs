//! Validation Error Types

use thiserror::Error;

/// Errors raised while validating inbound flight attributes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Operator not present in the airline catalog
    #[error("OPERA must be one of the valid airlines, got {0:?}")]
    UnknownAirline(String),

    /// Flight type outside the two-value enum
    #[error("TIPOVUELO must be either \"N\" or \"I\", got {0:?}")]
    InvalidFlightType(String),

    /// Month outside 1-12
    #[error("MES must be between 1 and 12, got {0}")]
    MonthOutOfRange(u32),

    /// Empty flight list
    #[error("flights list cannot be empty")]
    EmptyFlightList,
}
