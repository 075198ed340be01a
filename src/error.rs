use crate::domain::id::{EntityId, EntityKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MinimiError>;

#[derive(Debug, Error)]
pub enum MinimiError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: EntityId },

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MinimiError {
    pub fn not_found(kind: EntityKind, id: EntityId) -> Self {
        Self::NotFound { kind, id }
    }

    /// Returns true for a missing-entity lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
