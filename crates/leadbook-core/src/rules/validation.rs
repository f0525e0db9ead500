use crate::domain::{
    AgentId, Labeled, LeadId, LeadPriority, LeadSource, LeadStatus, TagId,
};
use crate::dto::{
    AgentCreateRequest, CommentCreateRequest, LeadCreateRequest, LeadFilterParams,
    LeadUpdateRequest, TagCreateRequest,
};
use crate::error::CoreError;
use crate::input::{LeadFilter, LeadPatch, NewAgent, NewComment, NewLead, NewTag};
use lettre::Address;
use std::str::FromStr;
use uuid::Uuid;

/// True iff `id` is in the store's identifier format.
pub fn validate_object_identifier(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

pub fn validate_enum(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}

pub fn validate_email(value: &str) -> bool {
    Address::from_str(value.trim()).is_ok()
}

pub fn parse_identifier<I>(field: &'static str, raw: &str) -> Result<I, CoreError>
where
    I: FromStr,
{
    if !validate_object_identifier(raw) {
        return Err(invalid_identifier(field, raw));
    }
    I::from_str(raw).map_err(|_| invalid_identifier(field, raw))
}

pub fn parse_enum<E: Labeled>(raw: &str) -> Result<E, CoreError> {
    E::parse_label(raw)
}

fn invalid_identifier(field: &'static str, raw: &str) -> CoreError {
    CoreError::InvalidIdentifier {
        field,
        value: raw.to_string(),
    }
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, CoreError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(CoreError::MissingField(field)),
    }
}

/// Fields that may be omitted from an update but never set to `null`.
fn non_null<T>(field: &'static str, value: Option<T>) -> Result<T, CoreError> {
    value.ok_or(CoreError::NullField(field))
}

fn ensure_time_to_close(days: i64) -> Result<i64, CoreError> {
    if days <= 0 {
        return Err(CoreError::InvalidTimeToClose(days));
    }
    Ok(days)
}

fn parse_tags(raw: Vec<String>) -> Result<Vec<TagId>, CoreError> {
    let mut tags: Vec<TagId> = Vec::with_capacity(raw.len());
    for value in raw {
        let id = parse_identifier::<TagId>("tags", &value)?;
        if !tags.contains(&id) {
            tags.push(id);
        }
    }
    Ok(tags)
}

impl LeadCreateRequest {
    pub fn validate(self) -> Result<NewLead, CoreError> {
        let name = required_text("name", self.name)?;
        let agent_raw = self
            .sales_agent
            .ok_or(CoreError::MissingField("salesAgent"))?;
        let sales_agent = parse_identifier::<AgentId>("salesAgent", &agent_raw)?;

        let mut lead = NewLead::new(name, sales_agent);
        if let Some(source) = self.source {
            lead.source = Some(parse_enum::<LeadSource>(&source)?);
        }
        if let Some(status) = self.status {
            lead.status = parse_enum::<LeadStatus>(&status)?;
        }
        if let Some(priority) = self.priority {
            lead.priority = parse_enum::<LeadPriority>(&priority)?;
        }
        if let Some(tags) = self.tags {
            lead.tags = parse_tags(tags)?;
        }
        if let Some(days) = self.time_to_close {
            lead.time_to_close = Some(ensure_time_to_close(days)?);
        }
        Ok(lead)
    }
}

impl LeadUpdateRequest {
    pub fn validate(self) -> Result<LeadPatch, CoreError> {
        let mut patch = LeadPatch::default();

        if let Some(name) = self.name {
            let name = name.ok_or(CoreError::EmptyField("name"))?;
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(CoreError::EmptyField("name"));
            }
            patch.name = Some(trimmed.to_string());
        }
        if let Some(agent) = self.sales_agent {
            let agent = non_null("salesAgent", agent)?;
            patch.sales_agent = Some(parse_identifier::<AgentId>("salesAgent", &agent)?);
        }
        if let Some(source) = self.source {
            patch.source = Some(source.as_deref().map(parse_enum::<LeadSource>).transpose()?);
        }
        if let Some(status) = self.status {
            let status = non_null(LeadStatus::FIELD, status)?;
            patch.status = Some(parse_enum::<LeadStatus>(&status)?);
        }
        if let Some(priority) = self.priority {
            let priority = non_null(LeadPriority::FIELD, priority)?;
            patch.priority = Some(parse_enum::<LeadPriority>(&priority)?);
        }
        if let Some(tags) = self.tags {
            patch.tags = Some(parse_tags(non_null("tags", tags)?)?);
        }
        if let Some(days) = self.time_to_close {
            patch.time_to_close = Some(days.map(ensure_time_to_close).transpose()?);
        }

        Ok(patch)
    }
}

impl LeadFilterParams {
    pub fn validate(self) -> Result<LeadFilter, CoreError> {
        Ok(LeadFilter {
            sales_agent: self
                .sales_agent
                .as_deref()
                .map(|raw| parse_identifier::<AgentId>("salesAgent", raw))
                .transpose()?,
            status: self.status.as_deref().map(parse_enum).transpose()?,
            source: self.source.as_deref().map(parse_enum).transpose()?,
        })
    }
}

impl AgentCreateRequest {
    pub fn validate(self) -> Result<NewAgent, CoreError> {
        let raw = self
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or(CoreError::MissingField("email"))?
            .to_string();
        if !validate_email(&raw) {
            return Err(CoreError::InvalidEmail(raw));
        }
        let name = self
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        Ok(NewAgent { name, email: raw })
    }
}

impl CommentCreateRequest {
    pub fn validate(self, lead: LeadId) -> Result<NewComment, CoreError> {
        let comment_text = required_text("commentText", self.comment_text)?;
        let author_raw = self.author.ok_or(CoreError::MissingField("author"))?;
        let author = parse_identifier::<AgentId>("author", &author_raw)?;
        Ok(NewComment {
            lead,
            author,
            comment_text,
        })
    }
}

impl TagCreateRequest {
    pub fn validate(self) -> Result<NewTag, CoreError> {
        Ok(NewTag {
            name: required_text("name", self.name)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_email, validate_enum, validate_object_identifier};
    use crate::domain::{AgentId, LeadId, LeadPriority, LeadSource, LeadStatus};
    use crate::dto::{
        AgentCreateRequest, CommentCreateRequest, LeadCreateRequest, LeadFilterParams,
        LeadUpdateRequest, TagCreateRequest,
    };
    use crate::error::CoreError;

    #[test]
    fn object_identifier_accepts_uuid_only() {
        assert!(validate_object_identifier(
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        ));
        assert!(!validate_object_identifier("xyz"));
        assert!(!validate_object_identifier(""));
        assert!(!validate_object_identifier("64b7f0c2e4b0a1a2b3c4d5e6"));
    }

    #[test]
    fn enum_membership_is_exact() {
        let allowed = ["New", "Closed"];
        assert!(validate_enum("New", &allowed));
        assert!(!validate_enum("new", &allowed));
        assert!(!validate_enum("", &allowed));
    }

    #[test]
    fn email_syntax() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("first.last@example.co.uk"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("ada@"));
    }

    #[test]
    fn lead_create_requires_name() {
        let request = LeadCreateRequest {
            sales_agent: Some(AgentId::new().to_string()),
            ..Default::default()
        };
        assert_eq!(request.validate(), Err(CoreError::MissingField("name")));

        let blank = LeadCreateRequest {
            name: Some("   ".to_string()),
            sales_agent: Some(AgentId::new().to_string()),
            ..Default::default()
        };
        assert_eq!(blank.validate(), Err(CoreError::MissingField("name")));
    }

    #[test]
    fn lead_create_requires_agent_identifier() {
        let missing = LeadCreateRequest {
            name: Some("Acme".to_string()),
            ..Default::default()
        };
        assert_eq!(missing.validate(), Err(CoreError::MissingField("salesAgent")));

        let malformed = LeadCreateRequest {
            name: Some("Acme".to_string()),
            sales_agent: Some("xyz".to_string()),
            ..Default::default()
        };
        let err = malformed.validate().unwrap_err();
        assert!(err.to_string().contains("salesAgent"));
    }

    #[test]
    fn lead_create_applies_schema_defaults() {
        let agent = AgentId::new();
        let lead = LeadCreateRequest {
            name: Some(" Acme ".to_string()),
            sales_agent: Some(agent.to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(lead.name, "Acme");
        assert_eq!(lead.sales_agent, agent);
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.priority, LeadPriority::Medium);
        assert_eq!(lead.source, None);
        assert!(lead.tags.is_empty());
    }

    #[test]
    fn lead_create_rejects_bad_optional_fields() {
        let base = LeadCreateRequest {
            name: Some("Acme".to_string()),
            sales_agent: Some(AgentId::new().to_string()),
            ..Default::default()
        };

        let bad_status = LeadCreateRequest {
            status: Some("Won".to_string()),
            ..base.clone()
        };
        let message = bad_status.validate().unwrap_err().to_string();
        assert!(message.contains("status"));
        assert!(message.contains("Proposal Sent"));

        let bad_days = LeadCreateRequest {
            time_to_close: Some(0),
            ..base.clone()
        };
        assert_eq!(bad_days.validate(), Err(CoreError::InvalidTimeToClose(0)));

        let bad_tag = LeadCreateRequest {
            tags: Some(vec!["hot".to_string()]),
            ..base
        };
        assert!(matches!(
            bad_tag.validate(),
            Err(CoreError::InvalidIdentifier { field: "tags", .. })
        ));
    }

    #[test]
    fn lead_update_handles_clears_and_empty_names() {
        let patch = LeadUpdateRequest {
            source: Some(None),
            time_to_close: Some(Some(5)),
            status: Some(Some("Closed".to_string())),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(patch.source, Some(None));
        assert_eq!(patch.time_to_close, Some(Some(5)));
        assert_eq!(patch.status, Some(LeadStatus::Closed));
        assert!(patch.name.is_none());

        let empty_name = LeadUpdateRequest {
            name: Some(Some(String::new())),
            ..Default::default()
        };
        assert_eq!(empty_name.validate(), Err(CoreError::EmptyField("name")));
    }

    #[test]
    fn lead_update_rejects_null_for_required_fields() {
        let null_name = LeadUpdateRequest {
            name: Some(None),
            ..Default::default()
        };
        assert_eq!(null_name.validate(), Err(CoreError::EmptyField("name")));

        let null_status = LeadUpdateRequest {
            status: Some(None),
            ..Default::default()
        };
        assert_eq!(null_status.validate(), Err(CoreError::NullField("status")));

        let null_priority = LeadUpdateRequest {
            priority: Some(None),
            ..Default::default()
        };
        assert_eq!(
            null_priority.validate(),
            Err(CoreError::NullField("priority"))
        );

        let null_agent = LeadUpdateRequest {
            sales_agent: Some(None),
            ..Default::default()
        };
        assert_eq!(
            null_agent.validate(),
            Err(CoreError::NullField("salesAgent"))
        );

        let null_tags = LeadUpdateRequest {
            tags: Some(None),
            ..Default::default()
        };
        assert_eq!(null_tags.validate(), Err(CoreError::NullField("tags")));
    }

    #[test]
    fn lead_filter_validates_each_provided_field() {
        let filter = LeadFilterParams {
            source: Some("Cold Call".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(filter.source, Some(LeadSource::ColdCall));
        assert!(filter.status.is_none());

        let err = LeadFilterParams {
            status: Some("Lost".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidEnum { field: "status", .. }));

        let err = LeadFilterParams {
            sales_agent: Some("nope".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidIdentifier {
                field: "salesAgent",
                ..
            }
        ));
    }

    #[test]
    fn agent_create_trims_but_keeps_email_case() {
        let agent = AgentCreateRequest {
            name: Some("  ".to_string()),
            email: Some(" A@B.com ".to_string()),
        }
        .validate()
        .unwrap();
        assert_eq!(agent.email, "A@B.com");
        assert!(agent.name.is_none());

        let err = AgentCreateRequest {
            name: None,
            email: Some("not-an-email".to_string()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, CoreError::InvalidEmail("not-an-email".to_string()));

        let missing = AgentCreateRequest::default().validate().unwrap_err();
        assert_eq!(missing, CoreError::MissingField("email"));
    }

    #[test]
    fn comment_create_binds_path_lead() {
        let lead = LeadId::new();
        let author = AgentId::new();
        let comment = CommentCreateRequest {
            author: Some(author.to_string()),
            comment_text: Some("Called, left voicemail".to_string()),
        }
        .validate(lead)
        .unwrap();
        assert_eq!(comment.lead, lead);
        assert_eq!(comment.author, author);

        let err = CommentCreateRequest {
            author: Some(author.to_string()),
            comment_text: None,
        }
        .validate(lead)
        .unwrap_err();
        assert_eq!(err, CoreError::MissingField("commentText"));
    }

    #[test]
    fn tag_create_requires_name() {
        assert_eq!(
            TagCreateRequest::default().validate(),
            Err(CoreError::MissingField("name"))
        );
        let tag = TagCreateRequest {
            name: Some(" hot ".to_string()),
        }
        .validate()
        .unwrap();
        assert_eq!(tag.name, "hot");
    }
}
