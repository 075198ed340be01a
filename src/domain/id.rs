use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Process-unique identifier shared by every entity kind (e.g., 1, 2, 42)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw integer value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for EntityId {
    type Err = crate::error::MinimiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| crate::error::MinimiError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of entity an identifier refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Board,
    Issue,
    Sprint,
    User,
    Comment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board => write!(f, "board"),
            Self::Issue => write!(f, "issue"),
            Self::Sprint => write!(f, "sprint"),
            Self::User => write!(f, "user"),
            Self::Comment => write!(f, "comment"),
        }
    }
}

/// Monotonic identifier sequence owned by a single manager.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new(first: u64) -> Self {
        Self { next: first }
    }

    /// Returns the next identifier and advances the sequence
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Returns the identifier the next call to `next_id` will produce
    pub fn peek(&self) -> EntityId {
        EntityId(self.next)
    }

    /// Ensures every future identifier is strictly greater than `id`.
    /// Never moves the sequence backwards.
    pub fn advance_past(&mut self, id: EntityId) {
        if id.0 >= self.next {
            self.next = id.0 + 1;
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
