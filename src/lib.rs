//! # Minimi Core
//!
//! In-memory issue tracking: boards holding issues, sprints, and comments,
//! plus the users they refer to.
//!
//! All state lives in a [`BoardManager`], which hands out identifiers from a
//! single sequence shared by every entity kind, keeps sprint membership
//! consistent with the issues on each board, and round-trips boards through
//! a JSON export format.

pub mod config;
pub mod domain;
pub mod error;
pub mod manager;

// Re-export commonly used types
pub use config::ManagerConfig;
pub use domain::{
    Board, Comment, EntityId, EntityKind, Issue, IssueFilter, IssuePatch, NewIssue, Sprint, User,
};
pub use error::{MinimiError, Result};
pub use manager::BoardManager;
