use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{EditorError, EditorResult};

use super::config_tree::{ARRAY_DISCRIMINANT, ConfigNode, ConfigTree, element_has_tag};
use super::descriptor::OptionDescriptor;
use super::path::PathSegment;
use super::registry::OptionSchemaRegistry;
use super::subtype::resolve_effective;

/// Value side of one option edit.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteValue {
    /// A user-entered value; always wins over computed defaults.
    Explicit(Value),
    /// Reset the option to its effective (possibly subtype-specific)
    /// default.
    UseDefault,
}

/// One (option, value) pair queued for merging.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionWrite {
    pub id: String,
    pub value: WriteValue,
}

impl OptionWrite {
    #[must_use]
    pub fn explicit(id: impl Into<String>, value: Value) -> Self {
        Self {
            id: id.into(),
            value: WriteValue::Explicit(value),
        }
    }

    #[must_use]
    pub fn use_default(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: WriteValue::UseDefault,
        }
    }
}

/// A single skipped write; the rest of the batch is unaffected.
#[derive(Debug)]
pub struct MergeFailure {
    pub option_id: String,
    pub error: EditorError,
}

/// Result of one merge pass: the new tree plus per-option failures.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    pub tree: ConfigTree,
    pub failures: Vec<MergeFailure>,
}

/// Applies an ordered sequence of option writes onto a base tree.
///
/// Writes are processed in caller order with last-write-wins semantics per
/// resolved path. The base tree is never mutated; the outcome carries a
/// fresh tree. A validation failure skips that single write and is
/// reported, so one bad field never blocks unrelated fields.
///
/// Deterministic: the same base and write sequence always produce a
/// structurally equal tree.
#[must_use]
pub fn merge_options(
    base: &ConfigTree,
    registry: &OptionSchemaRegistry,
    writes: &[OptionWrite],
) -> MergeOutcome {
    let mut tree = base.clone();
    let mut failures = Vec::new();

    for write in writes {
        if let Err(error) = apply_write(&mut tree, registry, write) {
            warn!(option = %write.id, error = %error, "skipping option write");
            failures.push(MergeFailure {
                option_id: write.id.clone(),
                error,
            });
        }
    }

    MergeOutcome { tree, failures }
}

fn apply_write(
    tree: &mut ConfigTree,
    registry: &OptionSchemaRegistry,
    write: &OptionWrite,
) -> EditorResult<()> {
    let descriptor = registry.get_by_id(&write.id)?;
    if descriptor.is_ui_only() {
        debug!(option = %write.id, "header option carries no value");
        return Ok(());
    }
    let path = descriptor.resolved_path()?;

    let value = match &write.value {
        WriteValue::Explicit(value) => {
            let subtype = current_subtype(tree, registry, descriptor);
            validate_value(descriptor, subtype.as_deref(), value)?;
            value.clone()
        }
        WriteValue::UseDefault => {
            let subtype = current_subtype(tree, registry, descriptor);
            let effective = resolve_effective(descriptor, subtype.as_deref());
            match effective.default_value {
                Some(default_value) => default_value.clone(),
                None => {
                    debug!(option = %write.id, "no default to apply");
                    return Ok(());
                }
            }
        }
    };

    write_at(tree, &path, value);
    Ok(())
}

/// Current value of the descriptor's subtype sibling, read out of the tree
/// being built so that earlier writes in the same batch are visible.
fn current_subtype(
    tree: &ConfigTree,
    registry: &OptionSchemaRegistry,
    descriptor: &OptionDescriptor,
) -> Option<String> {
    let subtype_key = descriptor.subtype_key.as_deref()?;
    let sibling = registry.get_by_id(subtype_key).ok()?;
    let path = sibling.resolved_path().ok()?;
    tree.string_at(&path).map(str::to_owned)
}

fn validate_value(
    descriptor: &OptionDescriptor,
    subtype: Option<&str>,
    value: &Value,
) -> EditorResult<()> {
    if let Some(constraints) = descriptor.constraints {
        if let Some(number) = value.as_f64() {
            if let Some(min) = constraints.min {
                if number < min {
                    return Err(EditorError::OptionValueOutOfRange {
                        id: descriptor.id.clone(),
                        reason: format!("{number} is below the minimum {min}"),
                    });
                }
            }
            if let Some(max) = constraints.max {
                if number > max {
                    return Err(EditorError::OptionValueOutOfRange {
                        id: descriptor.id.clone(),
                        reason: format!("{number} is above the maximum {max}"),
                    });
                }
            }
        }
    }

    let effective = resolve_effective(descriptor, subtype);
    if let Some(allowed) = effective.allowed_values {
        if !allowed.contains(value) {
            return Err(EditorError::OptionValueNotAllowed {
                id: descriptor.id.clone(),
                reason: format!("{value} is not in the allowed set"),
            });
        }
    }

    Ok(())
}

/// Walks/extends the tree along a resolved path and writes the leaf value.
///
/// Intermediate objects are created as needed; arrays are extended with
/// empty placeholder elements up to the target index and never truncated.
fn write_at(tree: &mut ConfigTree, path: &[PathSegment], value: Value) {
    let Some((segment, rest)) = path.split_first() else {
        return;
    };
    let entries = tree.entries_mut();

    if segment.is_array() {
        let slot = entries
            .entry(segment.key.clone())
            .or_insert_with(|| ConfigNode::Array(Vec::new()));
        if !matches!(slot, ConfigNode::Array(_)) {
            *slot = ConfigNode::Array(Vec::new());
        }
        if let ConfigNode::Array(elements) = slot {
            let index = match (segment.index, segment.array_tag.as_deref()) {
                (Some(index), _) => {
                    while elements.len() <= index {
                        elements.push(ConfigNode::Tree(ConfigTree::new()));
                    }
                    index
                }
                (None, Some(tag)) => {
                    let found = elements
                        .iter()
                        .position(|element| element_has_tag(element, tag));
                    match found {
                        Some(index) => index,
                        None => {
                            let mut element = ConfigTree::new();
                            element.entries_mut().insert(
                                ARRAY_DISCRIMINANT.to_owned(),
                                ConfigNode::Value(Value::String(tag.to_owned())),
                            );
                            elements.push(ConfigNode::Tree(element));
                            elements.len() - 1
                        }
                    }
                }
                (None, None) => 0,
            };
            if rest.is_empty() {
                elements[index] = ConfigNode::Value(value);
            } else {
                if !matches!(elements[index], ConfigNode::Tree(_)) {
                    elements[index] = ConfigNode::Tree(ConfigTree::new());
                }
                if let ConfigNode::Tree(subtree) = &mut elements[index] {
                    write_at(subtree, rest, value);
                }
            }
        }
        return;
    }

    if rest.is_empty() {
        entries.insert(segment.key.clone(), ConfigNode::Value(value));
        return;
    }

    let slot = entries
        .entry(segment.key.clone())
        .or_insert_with(|| ConfigNode::Tree(ConfigTree::new()));
    if !matches!(slot, ConfigNode::Tree(_)) {
        *slot = ConfigNode::Tree(ConfigTree::new());
    }
    if let ConfigNode::Tree(subtree) = slot {
        write_at(subtree, rest, value);
    }
}
