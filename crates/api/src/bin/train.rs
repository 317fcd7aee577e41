//! Offline Trainer
//!
//! Reads a JSON array of training flight records (each carrying
//! `scheduled_departure` and `actual_departure`), encodes them in label
//! mode, fits the classifier, and writes the model blob served by the API.
//!
//! Usage: `delay-trainer <records.json> <model.bin>`

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;

use api::init_logging;
use delay_model::DelayClassifier;
use feature_encoder::FeatureEncoder;
use flight_data::FlightRecord;
use tracing::info;

fn main() -> Result<()> {
    init_logging();

    let mut args = env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        bail!("usage: delay-trainer <records.json> <model.bin>");
    };

    let raw = fs::read_to_string(&input).with_context(|| format!("reading {input}"))?;
    let records: Vec<FlightRecord> =
        serde_json::from_str(&raw).context("parsing training records")?;
    info!(rows = records.len(), "encoding training batch");

    let (features, labels) = FeatureEncoder::new()
        .encode_with_labels(&records)
        .context("encoding training batch")?;

    let mut classifier = DelayClassifier::new();
    classifier.fit(&features, &labels).context("fitting classifier")?;
    classifier.save(&output).context("saving model blob")?;

    info!(model = %output, "training complete");
    Ok(())
}
