//! Feature Vector Assembly
//!
//! Encoding runs in two phases. Phase one expands `operator`, `flight_type`
//! and `month` into one-hot indicator columns over the values observed in
//! the batch. Phase two projects that expansion onto the fixed catalog:
//! catalog columns absent from the batch become zero columns, everything
//! outside the catalog is dropped. The projection is what lets unseen
//! categorical values encode to all-zero rows instead of erroring, while
//! the classifier always sees the same 10-column schema.

use std::collections::BTreeMap;

use flight_data::FlightRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{mes_column, opera_column, tipovuelo_column, FEATURE_CATALOG, FEATURE_DIMENSION};
use crate::labels::label_for_row;
use crate::EncodeError;

/// One encoded row: the 10 catalog indicators, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Indicator values (0.0 or 1.0), one per catalog column
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Value of a catalog column by name, if the name is in the catalog
    /// and the row actually carries that dimension.
    pub fn get(&self, column: &str) -> Option<f64> {
        FEATURE_CATALOG
            .iter()
            .position(|&name| name == column)
            .and_then(|idx| self.values.get(idx).copied())
    }
}

/// Stateless encoder from flight records to the fixed feature schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self
    }

    /// Encode a batch for prediction.
    ///
    /// Row order is preserved 1:1. Fails only on an empty batch.
    pub fn encode(&self, batch: &[FlightRecord]) -> Result<Vec<FeatureVector>, EncodeError> {
        if batch.is_empty() {
            return Err(EncodeError::EmptyBatch);
        }
        Ok(self.expand_and_project(batch))
    }

    /// Encode a training batch, additionally deriving the delay label for
    /// every row from its departure timestamps.
    pub fn encode_with_labels(
        &self,
        batch: &[FlightRecord],
    ) -> Result<(Vec<FeatureVector>, Vec<u8>), EncodeError> {
        if batch.is_empty() {
            return Err(EncodeError::EmptyBatch);
        }

        let labels = batch
            .iter()
            .enumerate()
            .map(|(row, record)| label_for_row(row, record))
            .collect::<Result<Vec<u8>, EncodeError>>()?;

        Ok((self.expand_and_project(batch), labels))
    }

    /// Batch-relative one-hot expansion followed by catalog projection.
    fn expand_and_project(&self, batch: &[FlightRecord]) -> Vec<FeatureVector> {
        // Phase 1: one indicator column per distinct observed value.
        let mut expansion: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for (row, record) in batch.iter().enumerate() {
            let active = [
                opera_column(&record.operator),
                tipovuelo_column(record.flight_type.as_str()),
                mes_column(record.month),
            ];
            for column in active {
                expansion
                    .entry(column)
                    .or_insert_with(|| vec![0.0; batch.len()])[row] = 1.0;
            }
        }

        debug!(
            expanded = expansion.len(),
            projected = FEATURE_DIMENSION,
            rows = batch.len(),
            "projecting one-hot expansion onto feature catalog"
        );

        // Phase 2: project onto the catalog, strictly in catalog order.
        let zero_column = vec![0.0; batch.len()];
        let mut rows = vec![Vec::with_capacity(FEATURE_DIMENSION); batch.len()];
        for column in FEATURE_CATALOG {
            let values = expansion.get(column).unwrap_or(&zero_column);
            for (row, value) in values.iter().enumerate() {
                rows[row].push(*value);
            }
        }

        rows.into_iter()
            .map(|values| FeatureVector { values })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flight_data::FlightType;
    use proptest::prelude::*;

    fn record(operator: &str, flight_type: FlightType, month: u32) -> FlightRecord {
        FlightRecord::new(operator, flight_type, month)
    }

    #[test]
    fn test_catalog_positions_for_known_flight() {
        let encoder = FeatureEncoder::new();
        let batch = [record("Grupo LATAM", FlightType::Domestic, 7)];
        let features = encoder.encode(&batch).unwrap();

        assert_eq!(features.len(), 1);
        let row = &features[0];
        assert_eq!(row.get("OPERA_Grupo LATAM"), Some(1.0));
        assert_eq!(row.get("MES_7"), Some(1.0));
        assert_eq!(row.values.iter().sum::<f64>(), 2.0);
    }

    #[test]
    fn test_get_on_short_row_is_none() {
        // Hand-built rows may be narrower than the catalog; lookups past
        // the end answer None instead of panicking.
        let row = FeatureVector { values: vec![1.0] };
        assert_eq!(row.get("OPERA_Latin American Wings"), Some(1.0));
        assert_eq!(row.get("OPERA_Copa Air"), None);
        assert_eq!(row.get("not a column"), None);
    }

    #[test]
    fn test_unseen_operator_encodes_to_zero_row() {
        let encoder = FeatureEncoder::new();
        // Not in the catalog: the operator, month 3, and domestic type all
        // expand to columns the projection drops.
        let batch = [record("Aerolineas Argentinas", FlightType::Domestic, 3)];
        let features = encoder.encode(&batch).unwrap();

        assert!(features[0].values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_row_order_preserved() {
        let encoder = FeatureEncoder::new();
        let batch = [
            record("Sky Airline", FlightType::Domestic, 1),
            record("Grupo LATAM", FlightType::International, 12),
            record("Copa Air", FlightType::Domestic, 4),
        ];
        let features = encoder.encode(&batch).unwrap();

        assert_eq!(features[0].get("OPERA_Sky Airline"), Some(1.0));
        assert_eq!(features[1].get("OPERA_Grupo LATAM"), Some(1.0));
        assert_eq!(features[1].get("MES_12"), Some(1.0));
        assert_eq!(features[1].get("TIPOVUELO_I"), Some(1.0));
        assert_eq!(features[2].get("OPERA_Copa Air"), Some(1.0));
        assert_eq!(features[2].get("MES_4"), Some(1.0));
    }

    #[test]
    fn test_empty_batch_rejected() {
        let encoder = FeatureEncoder::new();
        assert!(matches!(encoder.encode(&[]), Err(EncodeError::EmptyBatch)));
        assert!(matches!(
            encoder.encode_with_labels(&[]),
            Err(EncodeError::EmptyBatch)
        ));
    }

    #[test]
    fn test_labels_parallel_to_rows() {
        let encoder = FeatureEncoder::new();
        let batch = [
            FlightRecord::with_departures(
                "Copa Air",
                FlightType::Domestic,
                2,
                "2023-01-01 10:00:00",
                "2023-01-01 10:30:00",
            ),
            FlightRecord::with_departures(
                "Sky Airline",
                FlightType::International,
                2,
                "2023-01-01 11:00:00",
                "2023-01-01 11:05:00",
            ),
        ];
        let (features, labels) = encoder.encode_with_labels(&batch).unwrap();

        assert_eq!(features.len(), 2);
        assert_eq!(labels, vec![1, 0]);
    }

    #[test]
    fn test_label_mode_requires_timestamps() {
        let encoder = FeatureEncoder::new();
        let batch = [record("Copa Air", FlightType::Domestic, 2)];
        assert!(matches!(
            encoder.encode_with_labels(&batch),
            Err(EncodeError::MissingField { row: 0, .. })
        ));
    }

    fn arb_record() -> impl Strategy<Value = FlightRecord> {
        let operators = prop::sample::select(vec![
            "Grupo LATAM",
            "Sky Airline",
            "Copa Air",
            "Latin American Wings",
            "American Airlines",
            "Midnight Cargo", // deliberately outside every catalog
        ]);
        (operators, any::<bool>(), 1u32..=12).prop_map(|(operator, international, month)| {
            let flight_type = if international {
                FlightType::International
            } else {
                FlightType::Domestic
            };
            FlightRecord::new(operator, flight_type, month)
        })
    }

    proptest! {
        #[test]
        fn prop_schema_is_stable(batch in prop::collection::vec(arb_record(), 1..32)) {
            let features = FeatureEncoder::new().encode(&batch).unwrap();
            prop_assert_eq!(features.len(), batch.len());
            for row in &features {
                prop_assert_eq!(row.values.len(), FEATURE_DIMENSION);
                prop_assert!(row.values.iter().all(|&v| v == 0.0 || v == 1.0));
            }
        }
    }
}
