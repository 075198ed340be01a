use crate::domain::id::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    pub author_id: EntityId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: EntityId, author_id: EntityId, body: String) -> Self {
        Self {
            id,
            author_id,
            body,
            created_at: Utc::now(),
        }
    }
}
