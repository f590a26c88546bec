use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::model::TripSnapshot;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML trip snapshot: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("failed to parse JSON trip snapshot: {0}")]
    JsonDecode(#[from] serde_json::Error),
    #[error("trip snapshot is empty")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SnapshotFormat {
    Toml,
    Json,
}

impl SnapshotFormat {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Reads a trip with its itinerary and packing list. `.json` files are read
/// as JSON, anything else as TOML.
pub fn load_snapshot(path: &Path) -> Result<TripSnapshot, StorageError> {
    let raw = fs::read_to_string(path)?;
    let snapshot = parse_snapshot(&raw, SnapshotFormat::for_path(path))?;

    debug!(
        path = %path.display(),
        trip_id = %snapshot.trip.id,
        itineraries = snapshot.itineraries.len(),
        packing_items = snapshot.packing_items.len(),
        "loaded trip snapshot"
    );
    if !snapshot.trip.has_valid_range() {
        warn!(trip_id = %snapshot.trip.id, "trip end date is before its start date");
    }

    Ok(snapshot)
}

fn parse_snapshot(raw: &str, format: SnapshotFormat) -> Result<TripSnapshot, StorageError> {
    if raw.trim().is_empty() {
        return Err(StorageError::Empty);
    }

    Ok(match format {
        SnapshotFormat::Toml => toml::from_str(raw)?,
        SnapshotFormat::Json => serde_json::from_str(raw)?,
    })
}
