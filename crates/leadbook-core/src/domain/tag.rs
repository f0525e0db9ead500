use crate::domain::ids::TagId;
use serde::{Deserialize, Serialize};

/// A free-form label. Names are trimmed but not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub created_at: i64,
}
