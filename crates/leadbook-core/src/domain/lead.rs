use crate::domain::ids::{AgentId, LeadId, TagId};
use crate::domain::labeled::labeled_enum;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

labeled_enum!(LeadStatus, "status", {
    New => "New",
    Contacted => "Contacted",
    Qualified => "Qualified",
    ProposalSent => "Proposal Sent",
    Closed => "Closed",
});

labeled_enum!(LeadSource, "source", {
    Website => "Website",
    Referral => "Referral",
    ColdCall => "Cold Call",
    Advertisement => "Advertisement",
    Email => "Email",
    Other => "Other",
});

labeled_enum!(LeadPriority, "priority", {
    High => "High",
    Medium => "Medium",
    Low => "Low",
});

impl Default for LeadStatus {
    fn default() -> Self {
        Self::New
    }
}

impl Default for LeadPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl LeadStatus {
    /// Every status except `Closed` counts towards the pipeline.
    pub fn is_pipeline(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub source: Option<LeadSource>,
    pub status: LeadStatus,
    pub sales_agent: AgentId,
    pub tags: Vec<TagId>,
    pub time_to_close: Option<i64>,
    pub priority: LeadPriority,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Lead {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::MissingField("name"));
        }

        if let Some(days) = self.time_to_close {
            if days <= 0 {
                return Err(CoreError::InvalidTimeToClose(days));
            }
        }

        Ok(())
    }
}
