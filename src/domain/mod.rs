pub mod board;
pub mod comment;
pub mod filter;
pub mod id;
pub mod issue;
pub mod sprint;
pub mod user;

pub use board::Board;
pub use comment::Comment;
pub use filter::IssueFilter;
pub use id::{EntityId, EntityKind, IdGenerator};
pub use issue::{Issue, IssuePatch, NewIssue};
pub use sprint::Sprint;
pub use user::User;
