pub mod config_tree;
pub mod descriptor;
pub mod merge;
pub mod path;
pub mod registry;
pub mod subtype;

pub use config_tree::{ConfigNode, ConfigTree};
pub use descriptor::{DataType, NumericConstraints, OptionDescriptor, SubtypeOverride};
pub use merge::{MergeFailure, MergeOutcome, OptionWrite, WriteValue, merge_options};
pub use path::{OptionPath, PathSegment, resolve_path};
pub use registry::{OptionSchemaRegistry, SubcategoryDef};
pub use subtype::{EffectiveOption, resolve_effective};
