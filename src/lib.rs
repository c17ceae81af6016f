//! chartedit-rs: schema-driven chart options core.
//!
//! This crate provides the pure-data machinery behind a chart options
//! editor: a declarative option-descriptor registry, id-to-path
//! resolution, per-series-subtype override resolution, and a
//! deterministic merge engine that applies edits onto a nested chart
//! configuration tree. A loosely coupled import framework normalizes
//! external tabular payloads into CSV for the same editor surface.

pub mod api;
pub mod core;
pub mod error;
pub mod import;
pub mod meta;
pub mod telemetry;

pub use api::OptionsEditor;
pub use core::{ConfigTree, OptionSchemaRegistry};
pub use error::{EditorError, EditorResult};
