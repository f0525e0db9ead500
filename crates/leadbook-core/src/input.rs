//! Validated inputs handed to the store. Values of these types have already
//! passed the checks in [`crate::rules::validation`]; referential checks
//! (agent, tag and lead existence) happen in the store.

use crate::domain::{AgentId, LeadId, LeadPriority, LeadSource, LeadStatus, TagId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub sales_agent: AgentId,
    pub source: Option<LeadSource>,
    pub status: LeadStatus,
    pub tags: Vec<TagId>,
    pub time_to_close: Option<i64>,
    pub priority: LeadPriority,
}

impl NewLead {
    pub fn new(name: impl Into<String>, sales_agent: AgentId) -> Self {
        Self {
            name: name.into(),
            sales_agent,
            source: None,
            status: LeadStatus::default(),
            tags: Vec::new(),
            time_to_close: None,
            priority: LeadPriority::default(),
        }
    }
}

/// Partial lead update. `None` leaves a field untouched; for nullable fields
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub sales_agent: Option<AgentId>,
    pub source: Option<Option<LeadSource>>,
    pub status: Option<LeadStatus>,
    pub tags: Option<Vec<TagId>>,
    pub time_to_close: Option<Option<i64>>,
    pub priority: Option<LeadPriority>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFilter {
    pub sales_agent: Option<AgentId>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAgent {
    pub name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub lead: LeadId,
    pub author: AgentId,
    pub comment_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
}
