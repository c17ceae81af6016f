use serde_json::Value;

use crate::error::{EditorError, EditorResult};

use super::plugin::{ImportFilter, ImportFilterResult, ResolvedOptions};

/// Option name carrying the semicolon-separated field list.
pub const INCLUDE_FIELDS_OPTION: &str = "includeFields";

/// Projects a JSON record array into tabular form.
///
/// Covers the common shape of web import feeds: a payload whose records
/// live in a nested array, from which the user picks fields via an
/// `includeFields` option (`"Fylke;Antall innbyggere"` style). `"NaN"`
/// cells become empty, missing fields become empty cells.
#[derive(Debug, Clone)]
pub struct FieldProjectionFilter {
    /// JSON pointer to the record array, e.g. `/entries` or
    /// `/data/Observationsens`.
    records_pointer: String,
}

impl FieldProjectionFilter {
    #[must_use]
    pub fn new(records_pointer: impl Into<String>) -> Self {
        Self {
            records_pointer: records_pointer.into(),
        }
    }
}

impl ImportFilter for FieldProjectionFilter {
    fn filter(&self, raw: &str, options: &ResolvedOptions) -> EditorResult<ImportFilterResult> {
        let payload: Value = serde_json::from_str(raw)
            .map_err(|e| EditorError::ImportPayloadParse(e.to_string()))?;

        let fields: Vec<&str> = options
            .get(INCLUDE_FIELDS_OPTION)
            .map(|spec| spec.split(';').collect())
            .unwrap_or_default();

        let mut result = ImportFilterResult {
            headers: fields.iter().map(|&f| f.to_owned()).collect(),
            rows: Vec::new(),
        };

        // A payload without the record array produces an empty table, not
        // an error, matching the source plugins.
        let Some(records) = payload.pointer(&self.records_pointer).and_then(Value::as_array)
        else {
            return Ok(result);
        };

        for record in records {
            let row = fields
                .iter()
                .map(|&field| cell_text(record.get(field)))
                .collect();
            result.rows.push(row);
        }

        Ok(result)
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) if s == "NaN" => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(compound) => compound.to_string(),
    }
}
