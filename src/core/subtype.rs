use serde_json::Value;

use super::descriptor::OptionDescriptor;

/// Effective default and allowed set after subtype override resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveOption<'a> {
    pub default_value: Option<&'a Value>,
    pub allowed_values: Option<&'a [Value]>,
}

/// Computes the effective default/allowed set for a descriptor given the
/// current value of its subtype sibling.
///
/// Pure and stateless: identical inputs always yield identical outputs,
/// which lets option-panel UI state be cached safely.
///
/// An unknown subtype degrades to the descriptor's base default rather than
/// failing: new chart subtypes are added over time without every override
/// table being updated in lockstep.
#[must_use]
pub fn resolve_effective<'a>(
    descriptor: &'a OptionDescriptor,
    current_subtype: Option<&str>,
) -> EffectiveOption<'a> {
    let base = EffectiveOption {
        default_value: descriptor.default_value.as_ref(),
        allowed_values: descriptor.allowed_values.as_deref(),
    };

    if descriptor.subtype_key.is_none() {
        return base;
    }
    let Some(subtype) = current_subtype else {
        return base;
    };
    let Some(override_entry) = descriptor.subtype_defaults.get(subtype) else {
        return base;
    };

    EffectiveOption {
        default_value: override_entry
            .default_value
            .as_ref()
            .or(base.default_value),
        allowed_values: override_entry
            .allowed_values
            .as_deref()
            .or(base.allowed_values),
    }
}
