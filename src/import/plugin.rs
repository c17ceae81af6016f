use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::EditorResult;

/// How the host should treat a plugin's filtered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TreatAs {
    #[default]
    Csv,
    Json,
    /// Merge new columns into the existing pasted CSV by join key.
    CsvAppend,
}

/// Expected wire shape of the fetched payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchAs {
    #[default]
    Json,
    Text,
}

/// One user-facing plugin option (rendered as a form field by the host).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginOptionSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub default: String,
}

/// User-resolved plugin options: spec defaults overlaid with host input.
pub type ResolvedOptions = IndexMap<String, String>;

/// Declarative part of an import plugin definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportPluginDescriptor {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub treat_as: TreatAs,
    #[serde(default)]
    pub fetch_as: FetchAs,
    #[serde(rename = "defaultURL", default)]
    pub default_url: String,
    #[serde(default)]
    pub options: IndexMap<String, PluginOptionSpec>,
}

impl ImportPluginDescriptor {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_treat_as(mut self, treat_as: TreatAs) -> Self {
        self.treat_as = treat_as;
        self
    }

    #[must_use]
    pub fn with_fetch_as(mut self, fetch_as: FetchAs) -> Self {
        self.fetch_as = fetch_as;
        self
    }

    #[must_use]
    pub fn with_default_url(mut self, default_url: impl Into<String>) -> Self {
        self.default_url = default_url.into();
        self
    }

    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, spec: PluginOptionSpec) -> Self {
        self.options.insert(name.into(), spec);
        self
    }

    /// Overlays host-supplied values on this plugin's option defaults.
    #[must_use]
    pub fn resolve_options(&self, overrides: &ResolvedOptions) -> ResolvedOptions {
        let mut resolved: ResolvedOptions = self
            .options
            .iter()
            .map(|(name, spec)| (name.clone(), spec.default.clone()))
            .collect();
        for (name, value) in overrides {
            resolved.insert(name.clone(), value.clone());
        }
        resolved
    }
}

/// Normalized tabular payload produced by a filter.
///
/// Produced once per import invocation and consumed immediately by the
/// host; the core never persists it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportFilterResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ImportFilterResult {
    /// Serializes as comma-delimited text, header row first.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.headers.join(","));
        for row in &self.rows {
            lines.push(row.join(","));
        }
        lines.join("\n")
    }
}

/// Transformation step of an import plugin.
///
/// Replaces the source's callback-style `filter(data, options, fn)` with an
/// explicit success/error result; parse failures surface as
/// `ImportPayloadParse` instead of crashing the merge path.
pub trait ImportFilter {
    fn filter(&self, raw: &str, options: &ResolvedOptions) -> EditorResult<ImportFilterResult>;
}
