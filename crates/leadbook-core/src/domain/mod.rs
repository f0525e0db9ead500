pub mod agent;
pub mod comment;
pub mod ids;
pub mod labeled;
pub mod lead;
pub mod tag;

pub use agent::{normalize_email, SalesAgent};
pub use comment::Comment;
pub use ids::{AgentId, CommentId, LeadId, TagId};
pub use labeled::Labeled;
pub use lead::{Lead, LeadPriority, LeadSource, LeadStatus};
pub use tag::Tag;
