use serde::{Deserialize, Serialize};

use crate::core::ConfigTree;
use crate::error::{EditorError, EditorResult};

pub const CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Versioned export envelope for persisted chart configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ConfigTree,
}

impl ConfigTree {
    pub fn to_json_contract_v1_pretty(&self) -> EditorResult<String> {
        let payload = ConfigJsonContractV1 {
            schema_version: CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            EditorError::InvalidSchema(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Accepts both the bare tree shape and the versioned envelope.
    pub fn from_json_compat_str(input: &str) -> EditorResult<Self> {
        if let Ok(payload) = serde_json::from_str::<ConfigJsonContractV1>(input) {
            if payload.schema_version != CONFIG_JSON_SCHEMA_V1 {
                return Err(EditorError::InvalidSchema(format!(
                    "unsupported config schema version: {}",
                    payload.schema_version
                )));
            }
            return Ok(payload.config);
        }
        Self::from_json_str(input)
    }
}
