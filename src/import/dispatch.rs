use serde_json::Value;
use tracing::debug;

use crate::error::{EditorError, EditorResult};

use super::csv_append::append_merge;
use super::plugin::TreatAs;

/// Host-facing result of dispatching a filtered payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// New contents for the CSV paste area.
    Csv(String),
    /// Parsed chart settings/data JSON.
    Json(Value),
}

/// Routes a plugin's filtered payload by its `treatAs` mode.
///
/// `Csv` replaces the existing text, `CsvAppend` merges new columns into
/// it, `Json` validates the payload as JSON and hands it back parsed.
pub fn apply_import(
    treat_as: TreatAs,
    existing_csv: &str,
    payload: &str,
) -> EditorResult<ImportOutcome> {
    match treat_as {
        TreatAs::Csv => Ok(ImportOutcome::Csv(payload.to_owned())),
        TreatAs::CsvAppend => {
            let merged = append_merge(existing_csv, payload);
            debug!(
                existing_rows = existing_csv.lines().count(),
                merged_rows = merged.lines().count(),
                "applied csv append-merge"
            );
            Ok(ImportOutcome::Csv(merged))
        }
        TreatAs::Json => serde_json::from_str(payload)
            .map(ImportOutcome::Json)
            .map_err(|e| EditorError::ImportPayloadParse(e.to_string())),
    }
}
