use crate::domain::ids::{AgentId, CommentId, LeadId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub lead: LeadId,
    pub author: AgentId,
    pub comment_text: String,
    pub created_at: i64,
}
