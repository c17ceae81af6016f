//! Import plugin framework: pluggable normalization of fetched payloads
//! into the editor's tabular CSV shape.
//!
//! The framework is independent of the options core; the only shared
//! concern is value normalization. All operations are synchronous; hosts
//! perform their own fetches and hand the resolved payload in.

pub mod csv_append;
pub mod dispatch;
pub mod filters;
pub mod plugin;
pub mod registry;

pub use csv_append::append_merge;
pub use dispatch::{ImportOutcome, apply_import};
pub use filters::FieldProjectionFilter;
pub use plugin::{
    FetchAs, ImportFilter, ImportFilterResult, ImportPluginDescriptor, PluginOptionSpec,
    ResolvedOptions, TreatAs,
};
pub use registry::{ImportPluginRegistry, InstalledPlugin};
