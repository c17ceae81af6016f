use serde_json::Value;
use tracing::debug;

use crate::core::{
    ConfigTree, MergeFailure, OptionSchemaRegistry, OptionWrite, merge_options,
};
use crate::error::EditorResult;

/// Editing session over one chart configuration.
///
/// Queues field edits the way the options panel binds them to option ids,
/// then applies the batch through the merge engine. The working tree is
/// owned here; callers needing concurrency use independent sessions.
#[derive(Debug)]
pub struct OptionsEditor<'a> {
    registry: &'a OptionSchemaRegistry,
    tree: ConfigTree,
    pending: Vec<OptionWrite>,
}

impl<'a> OptionsEditor<'a> {
    #[must_use]
    pub fn new(registry: &'a OptionSchemaRegistry) -> Self {
        Self::with_base(registry, ConfigTree::new())
    }

    /// Starts from an existing configuration, e.g. a loaded project.
    #[must_use]
    pub fn with_base(registry: &'a OptionSchemaRegistry, tree: ConfigTree) -> Self {
        Self {
            registry,
            tree,
            pending: Vec::new(),
        }
    }

    /// Queues an explicit user value for an option.
    pub fn set(&mut self, id: impl Into<String>, value: Value) {
        self.pending.push(OptionWrite::explicit(id, value));
    }

    /// Queues a reset of an option to its effective default.
    pub fn use_default(&mut self, id: impl Into<String>) {
        self.pending.push(OptionWrite::use_default(id));
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Applies all queued writes in order and returns per-option failures.
    ///
    /// Failed writes are skipped; the rest of the batch still lands, so the
    /// form stays usable around a single bad field.
    pub fn apply(&mut self) -> Vec<MergeFailure> {
        let writes = std::mem::take(&mut self.pending);
        debug!(writes = writes.len(), "applying queued option writes");
        let outcome = merge_options(&self.tree, self.registry, &writes);
        self.tree = outcome.tree;
        outcome.failures
    }

    #[must_use]
    pub fn config(&self) -> &ConfigTree {
        &self.tree
    }

    /// Consumes the session, releasing the configuration tree.
    #[must_use]
    pub fn into_config(self) -> ConfigTree {
        self.tree
    }

    pub fn config_json_pretty(&self) -> EditorResult<String> {
        self.tree.to_json_pretty()
    }
}
