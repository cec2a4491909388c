//! JSON point-list input

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::points::Record;

/// Load a JSON array of `{ "x": .., "y": .., ... }` records
pub fn load_records(path: &str) -> Result<Vec<Record>> {
    log::info!("Reading point file: {}", path);

    if !Path::new(path).exists() {
        return Err(anyhow::anyhow!("File not found: {}", path));
    }

    let file = File::open(path).with_context(|| format!("opening {}", path))?;
    let records: Vec<Record> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing point records from {}", path))?;

    log::info!("Loaded {} points from {}", records.len(), path);

    Ok(records)
}

/// Parse records from an in-memory JSON string
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    let records = serde_json::from_str(json).context("parsing point records")?;
    Ok(records)
}
