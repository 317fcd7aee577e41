//! Feature Catalog
//!
//! The fixed 10-column schema shared by training and inference. Column order
//! is part of the model contract and must never change between the two.

/// Number of features in the vector
pub const FEATURE_DIMENSION: usize = 10;

/// Catalog columns, in output order.
pub const FEATURE_CATALOG: [&str; FEATURE_DIMENSION] = [
    "OPERA_Latin American Wings",
    "MES_7",
    "MES_10",
    "OPERA_Grupo LATAM",
    "MES_12",
    "TIPOVUELO_I",
    "MES_4",
    "MES_11",
    "OPERA_Sky Airline",
    "OPERA_Copa Air",
];

/// Expansion column name for an operator value.
pub fn opera_column(operator: &str) -> String {
    format!("OPERA_{operator}")
}

/// Expansion column name for a flight-type value ("N"/"I").
pub fn tipovuelo_column(flight_type: &str) -> String {
    format!("TIPOVUELO_{flight_type}")
}

/// Expansion column name for a month value.
pub fn mes_column(month: u32) -> String {
    format!("MES_{month}")
}
