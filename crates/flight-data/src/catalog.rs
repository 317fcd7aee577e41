//! Airline Catalog

/// Airlines accepted by the serving layer.
pub const VALID_AIRLINES: [&str; 23] = [
    "Aerolineas Argentinas",
    "Aeromexico",
    "Air Canada",
    "Air France",
    "Alitalia",
    "American Airlines",
    "Austral",
    "Avianca",
    "British Airways",
    "Copa Air",
    "Delta Air",
    "Gol Trans",
    "Grupo LATAM",
    "Iberia",
    "JetSmart SPA",
    "K.L.M.",
    "Lacsa",
    "Latin American Wings",
    "Oceanair Linhas Aereas",
    "Plus Ultra Lineas Aereas",
    "Qantas Airways",
    "Sky Airline",
    "United Airlines",
];

/// Check whether an operator name belongs to the catalog.
pub fn is_valid_airline(operator: &str) -> bool {
    VALID_AIRLINES.contains(&operator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_airline() {
        assert!(is_valid_airline("Grupo LATAM"));
        assert!(is_valid_airline("Sky Airline"));
    }

    #[test]
    fn test_unknown_airline() {
        assert!(!is_valid_airline("Acme Air"));
        assert!(!is_valid_airline(""));
    }
}
