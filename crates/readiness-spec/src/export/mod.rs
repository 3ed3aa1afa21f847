pub mod csv;
pub mod email;
pub mod gate;
pub mod snapshot;

pub use csv::to_csv;
pub use email::EmailDraft;
pub use gate::{ExportError, JSON_FILENAME, check_export_ready, csv_filename};
pub use snapshot::{CapabilityAnswers, CollectedAnswers, LocationAnswers, ProviderItems, collect};

/// Pretty-printed JSON of the snapshot.
pub fn to_json(data: &CollectedAnswers) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}
