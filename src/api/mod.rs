pub mod editor;
pub mod json_contract;

pub use editor::OptionsEditor;
pub use json_contract::{CONFIG_JSON_SCHEMA_V1, ConfigJsonContractV1};
