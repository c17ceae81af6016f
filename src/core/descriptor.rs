use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EditorError, EditorResult};

use super::path::{OptionPath, resolve_path};

/// Value kind of a leaf option, mirroring the editor's field palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    Number,
    Boolean,
    Color,
    Font,
    #[serde(rename = "array<color>")]
    ColorArray,
    #[serde(rename = "colorstops")]
    ColorStops,
    #[serde(rename = "colorcategories")]
    ColorCategories,
    /// Section header row; never written into the configuration tree.
    Header,
    /// Multiline text field.
    Text,
}

/// Numeric bounds used for value validation, not for path resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct NumericConstraints {
    #[serde(rename = "minValue", default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(rename = "maxValue", default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

/// Per-subtype replacement for an option's default and allowed values.
///
/// Fields left unset fall through to the descriptor's base definition;
/// allowed-value sets are never merged element-wise.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubtypeOverride {
    pub default_value: Option<Value>,
    pub allowed_values: Option<Vec<Value>>,
}

/// A leaf option definition inside a schema category.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDescriptor {
    pub id: String,
    pub display_text: String,
    pub tooltip: Option<String>,
    pub data_type: DataType,
    pub default_value: Option<Value>,
    pub allowed_values: Option<Vec<Value>>,
    /// Id of the sibling option whose current value selects among
    /// `subtype_defaults` (e.g. `series--type`).
    pub subtype_key: Option<String>,
    /// Subtypes this option applies to at all; UI filtering metadata.
    pub subtype_scope: Vec<String>,
    pub subtype_defaults: IndexMap<String, SubtypeOverride>,
    /// Explicit positional index into a multi-instance section (e.g. which
    /// axis); absent means singleton or whole-array.
    pub data_index: Option<usize>,
    pub constraints: Option<NumericConstraints>,
    pub parent: Option<String>,
    pub width: Option<u32>,
}

impl OptionDescriptor {
    #[must_use]
    pub fn new(id: impl Into<String>, data_type: DataType) -> Self {
        let id = id.into();
        Self {
            display_text: id.clone(),
            id,
            tooltip: None,
            data_type,
            default_value: None,
            allowed_values: None,
            subtype_key: None,
            subtype_scope: Vec::new(),
            subtype_defaults: IndexMap::new(),
            data_index: None,
            constraints: None,
            parent: None,
            width: None,
        }
    }

    /// Sets the base default, normalized for this descriptor's data type.
    #[must_use]
    pub fn with_default(mut self, default_value: Value) -> Self {
        self.default_value = Some(normalize_value(self.data_type, default_value));
        self
    }

    #[must_use]
    pub fn with_allowed_values(mut self, allowed_values: Vec<Value>) -> Self {
        self.allowed_values = Some(allowed_values);
        self
    }

    #[must_use]
    pub fn with_subtype_key(mut self, subtype_key: impl Into<String>) -> Self {
        self.subtype_key = Some(subtype_key.into());
        self
    }

    #[must_use]
    pub fn with_subtype_default(
        mut self,
        subtype: impl Into<String>,
        override_entry: SubtypeOverride,
    ) -> Self {
        self.subtype_defaults.insert(subtype.into(), override_entry);
        self
    }

    #[must_use]
    pub fn with_data_index(mut self, data_index: usize) -> Self {
        self.data_index = Some(data_index);
        self
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: NumericConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Resolves this descriptor's id into a structured configuration path.
    pub fn resolved_path(&self) -> EditorResult<OptionPath> {
        resolve_path(&self.id, self.data_index)
    }

    /// Header rows carry no value and are skipped by the merge engine.
    #[must_use]
    pub fn is_ui_only(&self) -> bool {
        self.data_type == DataType::Header
    }
}

impl SubtypeOverride {
    #[must_use]
    pub fn with_default(default_value: Value) -> Self {
        Self {
            default_value: Some(default_value),
            allowed_values: None,
        }
    }

    #[must_use]
    pub fn with_allowed_values(mut self, allowed_values: Vec<Value>) -> Self {
        self.allowed_values = Some(allowed_values);
        self
    }
}

/// External JSON shape of one option descriptor, field names preserved for
/// compatibility with existing schema data files.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOptionDescriptor {
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub tooltip_text: Option<String>,
    #[serde(default)]
    pub data_type: Option<DataType>,
    #[serde(default)]
    pub defaults: Option<Value>,
    #[serde(default)]
    pub values: Option<Value>,
    #[serde(default)]
    pub custom: Option<NumericConstraints>,
    #[serde(default)]
    pub sub_type: Option<Vec<String>>,
    #[serde(default)]
    pub sub_type_defaults: Option<IndexMap<String, Value>>,
    #[serde(default)]
    pub data_index: Option<usize>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
}

impl RawOptionDescriptor {
    /// Converts the external shape into the structured descriptor model.
    ///
    /// `subtype_key` comes from the enclosing subcategory's `filteredBy`
    /// field and only applies when the raw entry carries subtype data.
    pub fn into_descriptor(self, subtype_key: Option<&str>) -> EditorResult<OptionDescriptor> {
        let data_type = self.data_type.unwrap_or_default();
        let has_subtype_data = self.sub_type.is_some() || self.sub_type_defaults.is_some();

        let mut subtype_defaults = IndexMap::new();
        if let Some(raw_defaults) = self.sub_type_defaults {
            for (subtype, raw_entry) in raw_defaults {
                subtype_defaults.insert(subtype, parse_subtype_override(data_type, raw_entry)?);
            }
        }

        Ok(OptionDescriptor {
            display_text: self.text.unwrap_or_else(|| self.id.clone()),
            tooltip: self.tooltip_text,
            data_type,
            default_value: self.defaults.map(|v| normalize_value(data_type, v)),
            allowed_values: parse_values(&self.id, self.values)?,
            subtype_key: if has_subtype_data {
                subtype_key.map(str::to_owned)
            } else {
                None
            },
            subtype_scope: self.sub_type.unwrap_or_default(),
            subtype_defaults,
            data_index: self.data_index,
            constraints: self.custom,
            parent: self.parent,
            width: self.width,
            id: self.id,
        })
    }
}

/// Normalizes a raw default for its data type.
///
/// The source schema files encode most defaults as strings regardless of
/// type (`"false"`, `"null"`, JSON-in-a-string for fonts and color arrays);
/// normalization happens once here so downstream code sees typed values.
#[must_use]
pub fn normalize_value(data_type: DataType, raw: Value) -> Value {
    let Value::String(text) = raw else {
        return raw;
    };

    match data_type {
        DataType::Boolean => match text.as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            "null" => Value::Null,
            _ => Value::String(text),
        },
        DataType::Number => text
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map_or_else(|| Value::String(text.clone()), Value::Number),
        DataType::Color => {
            if text == "null" {
                Value::Null
            } else {
                Value::String(text)
            }
        }
        DataType::Font | DataType::ColorArray | DataType::ColorStops | DataType::ColorCategories => {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        }
        _ => Value::String(text),
    }
}

/// Parses an allowed-values set that may arrive as a JSON array or as the
/// source's JSON-array-in-a-string encoding.
fn parse_values(id: &str, raw: Option<Value>) -> EditorResult<Option<Vec<Value>>> {
    match raw {
        None => Ok(None),
        Some(Value::Array(values)) => Ok(Some(values)),
        Some(Value::String(text)) => serde_json::from_str::<Vec<Value>>(&text)
            .map(Some)
            .map_err(|e| {
                EditorError::InvalidSchema(format!("unparseable values list for `{id}`: {e}"))
            }),
        Some(other) => Err(EditorError::InvalidSchema(format!(
            "values for `{id}` must be an array, got {other}"
        ))),
    }
}

/// A subtype override entry is either a bare default or a structured
/// `{defaults?, values?}` object.
fn parse_subtype_override(data_type: DataType, raw: Value) -> EditorResult<SubtypeOverride> {
    if let Value::Object(map) = &raw {
        if map.contains_key("defaults") || map.contains_key("values") {
            let default_value = map
                .get("defaults")
                .cloned()
                .map(|v| normalize_value(data_type, v));
            let allowed_values = parse_values("subTypeDefaults", map.get("values").cloned())?;
            return Ok(SubtypeOverride {
                default_value,
                allowed_values,
            });
        }
    }

    Ok(SubtypeOverride {
        default_value: Some(normalize_value(data_type, raw)),
        allowed_values: None,
    })
}
