//! Built-in option schema metadata.
//!
//! The embedded JSON uses the same external descriptor shape as the
//! editor's schema data files, so it doubles as a live fixture for the
//! registry loading path.

use crate::core::OptionSchemaRegistry;
use crate::error::EditorResult;

/// Loads the built-in general-chart option schema: chart titles and
/// appearance, x/y axes, the series subtype table, and legend options.
pub fn standard_options() -> EditorResult<OptionSchemaRegistry> {
    OptionSchemaRegistry::from_json_str(include_str!("standard_options.json"))
}
