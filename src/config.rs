use crate::domain::Issue;
use serde::{Deserialize, Serialize};

/// Manager configuration
///
/// Controls the defaults given to newly created issues (and to issues
/// imported without those fields) and where the identifier sequence starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub default_status: String,
    pub default_priority: i64,
    pub first_id: u64,
}

impl ManagerConfig {
    /// Parses a (possibly partial) JSON configuration document
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            default_status: Issue::DEFAULT_STATUS.to_string(),
            default_priority: Issue::DEFAULT_PRIORITY,
            first_id: 1,
        }
    }
}
