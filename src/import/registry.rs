use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::EditorResult;

use super::plugin::{ImportFilter, ImportFilterResult, ImportPluginDescriptor, ResolvedOptions};

/// A named plugin plus its filter implementation.
pub struct InstalledPlugin {
    pub name: String,
    pub descriptor: ImportPluginDescriptor,
    filter: Box<dyn ImportFilter + Send + Sync>,
}

impl InstalledPlugin {
    /// Runs the plugin's filter against a fetched payload, resolving
    /// option defaults against the supplied overrides first.
    pub fn run(&self, raw: &str, overrides: &ResolvedOptions) -> EditorResult<ImportFilterResult> {
        let options = self.descriptor.resolve_options(overrides);
        self.filter.filter(raw, &options)
    }
}

impl std::fmt::Debug for InstalledPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstalledPlugin")
            .field("name", &self.name)
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Registry of installed import plugins.
///
/// An explicitly constructed instance replaces the source's module-level
/// `webImports` table: built once at startup, read-only afterwards.
#[derive(Debug, Default)]
pub struct ImportPluginRegistry {
    plugins: IndexMap<String, InstalledPlugin>,
}

impl ImportPluginRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a plugin under a name. A second install under the same
    /// name is ignored, keeping the first registration.
    pub fn install(
        &mut self,
        name: impl Into<String>,
        descriptor: ImportPluginDescriptor,
        filter: Box<dyn ImportFilter + Send + Sync>,
    ) {
        let name = name.into();
        if self.plugins.contains_key(&name) {
            warn!(
                plugin = %name,
                "tried to install an import plugin which already exists"
            );
            return;
        }
        debug!(plugin = %name, treat_as = ?descriptor.treat_as, "installed import plugin");
        self.plugins.insert(
            name.clone(),
            InstalledPlugin {
                name,
                descriptor,
                filter,
            },
        );
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&InstalledPlugin> {
        self.plugins.get(name)
    }

    /// Installed plugins in install order.
    pub fn iter(&self) -> impl Iterator<Item = &InstalledPlugin> {
        self.plugins.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
