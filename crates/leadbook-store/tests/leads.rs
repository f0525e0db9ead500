use leadbook_core::{
    AgentId, LeadFilter, LeadId, LeadPatch, LeadPriority, LeadSource, LeadStatus, NewAgent,
    NewLead, NewTag, TagId,
};
use leadbook_store::error::StoreErrorKind;
use leadbook_store::query::LeadQuery;
use leadbook_store::Store;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

fn agent(store: &Store, email: &str) -> AgentId {
    store
        .agents()
        .create(
            1_700_000_000,
            NewAgent {
                name: None,
                email: email.to_string(),
            },
        )
        .expect("create agent")
        .id
}

#[test]
fn lead_crud_roundtrip() {
    let store = store();
    let now = 1_700_000_000;
    let owner = agent(&store, "ada@example.com");

    let lead = store
        .leads()
        .create(now, NewLead::new("Acme", owner))
        .expect("create lead");
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.priority, LeadPriority::Medium);
    assert_eq!(lead.sales_agent, owner);
    assert_eq!(lead.created_at, now);

    let fetched = store
        .leads()
        .get(lead.id)
        .expect("get lead")
        .expect("lead exists");
    assert_eq!(fetched, lead);

    let updated = store
        .leads()
        .update(
            now + 60,
            lead.id,
            LeadPatch {
                name: Some("Acme Corp".to_string()),
                status: Some(LeadStatus::Qualified),
                source: Some(Some(LeadSource::Referral)),
                time_to_close: Some(Some(30)),
                ..Default::default()
            },
        )
        .expect("update lead");
    assert_eq!(updated.name, "Acme Corp");
    assert_eq!(updated.status, LeadStatus::Qualified);
    assert_eq!(updated.source, Some(LeadSource::Referral));
    assert_eq!(updated.time_to_close, Some(30));
    assert_eq!(updated.created_at, now);
    assert_eq!(updated.updated_at, now + 60);

    let cleared = store
        .leads()
        .update(
            now + 120,
            lead.id,
            LeadPatch {
                source: Some(None),
                ..Default::default()
            },
        )
        .expect("clear source");
    assert_eq!(cleared.source, None);
    assert_eq!(cleared.name, "Acme Corp");

    let deleted = store.leads().delete(lead.id).expect("delete lead");
    assert_eq!(deleted.id, lead.id);
    assert!(store.leads().get(lead.id).expect("get").is_none());
}

#[test]
fn create_requires_existing_agent() {
    let store = store();
    let missing = AgentId::new();
    let err = store
        .leads()
        .create(1_700_000_000, NewLead::new("Acme", missing))
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::AgentNotFound);
    assert!(err.to_string().contains("not found"));
    assert!(store
        .leads()
        .list(&LeadQuery::default())
        .expect("list")
        .is_empty());
}

#[test]
fn update_and_delete_missing_lead_are_not_found() {
    let store = store();
    let err = store
        .leads()
        .update(1_700_000_000, LeadId::new(), LeadPatch::default())
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);

    let err = store.leads().delete(LeadId::new()).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
}

#[test]
fn update_checks_new_agent_reference() {
    let store = store();
    let owner = agent(&store, "ada@example.com");
    let lead = store
        .leads()
        .create(1_700_000_000, NewLead::new("Acme", owner))
        .expect("create");

    let err = store
        .leads()
        .update(
            1_700_000_100,
            lead.id,
            LeadPatch {
                sales_agent: Some(AgentId::new()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::AgentNotFound);

    let unchanged = store.leads().get(lead.id).expect("get").expect("exists");
    assert_eq!(unchanged.sales_agent, owner);
}

#[test]
fn tags_are_linked_in_order_and_replaced_on_update() {
    let store = store();
    let now = 1_700_000_000;
    let owner = agent(&store, "ada@example.com");
    let hot = store
        .tags()
        .create(
            now,
            NewTag {
                name: "hot".to_string(),
            },
        )
        .expect("tag");
    let enterprise = store
        .tags()
        .create(
            now,
            NewTag {
                name: "enterprise".to_string(),
            },
        )
        .expect("tag");

    let mut input = NewLead::new("Acme", owner);
    input.tags = vec![enterprise.id, hot.id];
    let lead = store.leads().create(now, input).expect("create");
    assert_eq!(lead.tags, vec![enterprise.id, hot.id]);

    let listed = store.leads().list(&LeadQuery::default()).expect("list");
    assert_eq!(listed[0].tags, vec![enterprise.id, hot.id]);

    let updated = store
        .leads()
        .update(
            now + 1,
            lead.id,
            LeadPatch {
                tags: Some(vec![hot.id]),
                ..Default::default()
            },
        )
        .expect("update");
    assert_eq!(updated.tags, vec![hot.id]);
    let fetched = store.leads().get(lead.id).expect("get").expect("exists");
    assert_eq!(fetched.tags, vec![hot.id]);
}

#[test]
fn unknown_tag_is_rejected() {
    let store = store();
    let owner = agent(&store, "ada@example.com");
    let mut input = NewLead::new("Acme", owner);
    input.tags = vec![TagId::new()];
    let err = store.leads().create(1_700_000_000, input).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::TagNotFound);
}

#[test]
fn list_applies_each_filter() {
    let store = store();
    let now = 1_700_000_000;
    let ada = agent(&store, "ada@example.com");
    let grace = agent(&store, "grace@example.com");

    let mut website = NewLead::new("Website lead", ada);
    website.source = Some(LeadSource::Website);
    let website = store.leads().create(now, website).expect("create");

    let mut referral = NewLead::new("Referral lead", grace);
    referral.source = Some(LeadSource::Referral);
    referral.status = LeadStatus::Contacted;
    let referral = store.leads().create(now + 1, referral).expect("create");

    let all = store.leads().list(&LeadQuery::default()).expect("list");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, website.id);

    let by_agent = store
        .leads()
        .list(&LeadQuery::from_filter(&LeadFilter {
            sales_agent: Some(grace),
            ..Default::default()
        }))
        .expect("list");
    assert_eq!(by_agent.len(), 1);
    assert_eq!(by_agent[0].id, referral.id);

    let by_status = store
        .leads()
        .list(&LeadQuery::from_filter(&LeadFilter {
            status: Some(LeadStatus::New),
            ..Default::default()
        }))
        .expect("list");
    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].id, website.id);

    let none = store
        .leads()
        .list(&LeadQuery::from_filter(&LeadFilter {
            sales_agent: Some(ada),
            source: Some(LeadSource::Referral),
            ..Default::default()
        }))
        .expect("list");
    assert!(none.is_empty());
}
