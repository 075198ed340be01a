use crate::domain::id::EntityId;
use serde::{Deserialize, Serialize};

/// A user who can be assigned issues and author comments.
///
/// Issues and comments hold a user's id as a plain value; nothing checks
/// that the id still names a known user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
}

impl User {
    pub fn new(id: EntityId, name: String) -> Self {
        Self { id, name }
    }
}
