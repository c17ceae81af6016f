use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{EditorError, EditorResult};

use super::descriptor::{OptionDescriptor, RawOptionDescriptor};

/// One subcategory of options inside a category, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SubcategoryDef {
    pub title: String,
    pub dropdown: bool,
    /// Id of the option whose value filters/discriminates this group
    /// (becomes `subtype_key` on contained descriptors with subtype data).
    pub filtered_by: Option<String>,
    pub options: Vec<OptionDescriptor>,
}

impl SubcategoryDef {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_filtered_by(mut self, filtered_by: impl Into<String>) -> Self {
        self.filtered_by = Some(filtered_by.into());
        self
    }

    #[must_use]
    pub fn with_option(mut self, option: OptionDescriptor) -> Self {
        self.options.push(option);
        self
    }
}

#[derive(Debug, Clone, Default)]
struct StoredSubcategory {
    title: String,
    dropdown: bool,
    option_ids: Vec<String>,
}

/// Holds one product variant's category -> subcategory -> option descriptor
/// tree and exposes read-only lookup by id.
///
/// Constructed once at startup and read-only thereafter; no global state.
#[derive(Debug, Clone, Default)]
pub struct OptionSchemaRegistry {
    categories: IndexMap<String, Vec<StoredSubcategory>>,
    by_id: IndexMap<String, OptionDescriptor>,
}

impl OptionSchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a full registry from the external JSON schema shape:
    /// `{"<category>": [{text, dropdown?, filteredBy?, options: [...]}]}`.
    pub fn from_json_str(input: &str) -> EditorResult<Self> {
        let raw: RawSchema = serde_json::from_str(input)
            .map_err(|e| EditorError::InvalidSchema(format!("failed to parse schema json: {e}")))?;

        let mut registry = Self::new();
        for (category, subcategories) in raw {
            for raw_subcategory in subcategories {
                registry.register(&category, raw_subcategory.into_def()?)?;
            }
        }
        registry.validate_subtype_tables();
        Ok(registry)
    }

    /// Registers one subcategory of descriptors under a category.
    ///
    /// Fails with `DuplicateOptionId` when any descriptor id is already
    /// present anywhere in the registry; registration errors are fatal to
    /// registry setup.
    pub fn register(&mut self, category: &str, subcategory: SubcategoryDef) -> EditorResult<()> {
        let mut stored = StoredSubcategory {
            title: subcategory.title,
            dropdown: subcategory.dropdown,
            option_ids: Vec::with_capacity(subcategory.options.len()),
        };

        for mut descriptor in subcategory.options {
            if self.by_id.contains_key(&descriptor.id) {
                return Err(EditorError::DuplicateOptionId(descriptor.id));
            }
            if descriptor.subtype_key.is_none()
                && !(descriptor.subtype_defaults.is_empty() && descriptor.subtype_scope.is_empty())
                && subcategory.filtered_by.is_some()
            {
                descriptor.subtype_key = subcategory.filtered_by.clone();
            }
            stored.option_ids.push(descriptor.id.clone());
            self.by_id.insert(descriptor.id.clone(), descriptor);
        }

        debug!(
            category,
            subcategory = %stored.title,
            options = stored.option_ids.len(),
            "registered option subcategory"
        );
        self.categories.entry(category.to_owned()).or_default().push(stored);
        Ok(())
    }

    /// Returns the descriptor for an id, or `UnknownOptionId`.
    pub fn get_by_id(&self, id: &str) -> EditorResult<&OptionDescriptor> {
        self.by_id
            .get(id)
            .ok_or_else(|| EditorError::UnknownOptionId(id.to_owned()))
    }

    /// All descriptors in a category, in declaration order.
    ///
    /// Order is significant for UI layout but irrelevant for merge
    /// correctness. The iterator is restartable by calling again.
    pub fn all_in_category<'a>(
        &'a self,
        category: &str,
    ) -> impl Iterator<Item = &'a OptionDescriptor> + 'a {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .flat_map(|subcategory| subcategory.option_ids.iter())
            .filter_map(|id| self.by_id.get(id))
    }

    /// Category ids in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Checks that every `subtype_defaults` table only names subtypes the
    /// referenced sibling option actually allows.
    ///
    /// Real schema data violates this for legacy series types, so the check
    /// logs instead of failing registration.
    fn validate_subtype_tables(&self) {
        for descriptor in self.by_id.values() {
            let Some(subtype_key) = descriptor.subtype_key.as_deref() else {
                continue;
            };
            let Some(sibling) = self.by_id.get(subtype_key) else {
                warn!(
                    option = %descriptor.id,
                    subtype_key,
                    "subtype key does not name a registered option"
                );
                continue;
            };
            let Some(allowed) = sibling.allowed_values.as_deref() else {
                continue;
            };
            for subtype in descriptor.subtype_defaults.keys() {
                let known = allowed
                    .iter()
                    .any(|v| matches!(v, Value::String(s) if s == subtype));
                if !known {
                    warn!(
                        option = %descriptor.id,
                        subtype_key,
                        subtype = %subtype,
                        "subtype override names a value outside the sibling's allowed set"
                    );
                }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubcategory {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    dropdown: bool,
    #[serde(default)]
    filtered_by: Option<String>,
    #[serde(default)]
    options: Vec<RawOptionDescriptor>,
}

type RawSchema = IndexMap<String, Vec<RawSubcategory>>;

impl RawSubcategory {
    fn into_def(self) -> EditorResult<SubcategoryDef> {
        let filtered_by = self.filtered_by;
        let options = self
            .options
            .into_iter()
            .map(|raw| raw.into_descriptor(filtered_by.as_deref()))
            .collect::<EditorResult<Vec<_>>>()?;

        Ok(SubcategoryDef {
            title: self.text.unwrap_or_default(),
            dropdown: self.dropdown,
            filtered_by,
            options,
        })
    }
}
