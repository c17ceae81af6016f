use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EditorError, EditorResult};

use super::path::PathSegment;

/// Field used to pick an array element addressed by an array tag
/// (e.g. the series entry whose `type` is `treemap`).
pub(crate) const ARRAY_DISCRIMINANT: &str = "type";

/// One node of a configuration tree: a nested section, an ordered
/// multi-instance array, or a leaf value.
///
/// Leaf values may themselves be JSON objects (font specs, color stop
/// tables); compare trees through [`ConfigTree::to_json_value`] when
/// structural equality across both representations matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigNode {
    Array(Vec<ConfigNode>),
    Tree(ConfigTree),
    Value(Value),
}

/// Nested chart-configuration structure with insertion-ordered keys.
///
/// Owned exclusively by the caller; the merge engine never mutates a base
/// tree in place. Concurrent writers to one instance are not supported and
/// must be serialized by the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigTree {
    #[serde(flatten)]
    entries: IndexMap<String, ConfigNode>,
}

impl ConfigTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.entries.get(key)
    }

    pub(crate) fn entries_mut(&mut self) -> &mut IndexMap<String, ConfigNode> {
        &mut self.entries
    }

    /// Walks a resolved option path and returns the node it addresses,
    /// if present. Never creates intermediate structure.
    #[must_use]
    pub fn get_at(&self, path: &[PathSegment]) -> Option<&ConfigNode> {
        let (segment, rest) = path.split_first()?;
        let mut node = self.entries.get(&segment.key)?;

        if segment.is_array() {
            let ConfigNode::Array(elements) = node else {
                return None;
            };
            node = match (segment.index, segment.array_tag.as_deref()) {
                (Some(index), _) => elements.get(index)?,
                (None, Some(tag)) => elements.iter().find(|e| element_has_tag(e, tag))?,
                (None, None) => return None,
            };
        }

        if rest.is_empty() {
            return Some(node);
        }
        match node {
            ConfigNode::Tree(tree) => tree.get_at(rest),
            _ => None,
        }
    }

    /// Leaf string value at a path, for discriminant lookups.
    #[must_use]
    pub fn string_at(&self, path: &[PathSegment]) -> Option<&str> {
        match self.get_at(path)? {
            ConfigNode::Value(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn to_json_value(&self) -> EditorResult<Value> {
        serde_json::to_value(self)
            .map_err(|e| EditorError::InvalidSchema(format!("failed to serialize config: {e}")))
    }

    pub fn to_json_pretty(&self) -> EditorResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EditorError::InvalidSchema(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> EditorResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| EditorError::InvalidSchema(format!("failed to parse config: {e}")))
    }

    pub fn from_json_value(value: Value) -> EditorResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| EditorError::InvalidSchema(format!("failed to parse config: {e}")))
    }
}

pub(crate) fn element_has_tag(element: &ConfigNode, tag: &str) -> bool {
    match element {
        ConfigNode::Tree(tree) => matches!(
            tree.get(ARRAY_DISCRIMINANT),
            Some(ConfigNode::Value(Value::String(s))) if s == tag
        ),
        _ => false,
    }
}
