use crate::error::{Result, StoreError};
use crate::query::{LeadQuery, LEAD_COLUMNS};
use crate::repo::{parse_id, row_exists};
use leadbook_core::{
    AgentId, Labeled, Lead, LeadId, LeadPatch, LeadPriority, LeadSource, LeadStatus, NewLead,
    TagId,
};
use rusqlite::types::Value;
use rusqlite::vtab::array::Array;
use rusqlite::{params, params_from_iter, Connection};
use std::collections::HashMap;
use std::rc::Rc;

pub struct LeadsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> LeadsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts a lead and its tag links. The owning agent and every tag must
    /// already exist.
    pub fn create(&self, now_utc: i64, input: NewLead) -> Result<Lead> {
        let tx = self.conn.unchecked_transaction()?;
        let lead = create_inner(&tx, now_utc, input)?;
        tx.commit()?;
        Ok(lead)
    }

    pub fn get(&self, id: LeadId) -> Result<Option<Lead>> {
        get_inner(self.conn, id)
    }

    pub fn exists(&self, id: LeadId) -> Result<bool> {
        row_exists(self.conn, "leads", &id.to_string())
    }

    pub fn list(&self, query: &LeadQuery) -> Result<Vec<Lead>> {
        let compiled = query.to_sql();
        let mut stmt = self.conn.prepare(&compiled.sql)?;
        let mut rows = stmt.query(params_from_iter(compiled.params))?;
        let mut leads = Vec::new();
        while let Some(row) = rows.next()? {
            leads.push(lead_from_row(row)?);
        }
        attach_tags(self.conn, &mut leads)?;
        Ok(leads)
    }

    pub fn count(&self, query: &LeadQuery) -> Result<i64> {
        let compiled = query.to_count_sql();
        let count: i64 = self.conn.query_row(
            &compiled.sql,
            params_from_iter(compiled.params),
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn list_closed_last_week(&self, now_utc: i64) -> Result<Vec<Lead>> {
        self.list(&LeadQuery::closed_since_window(now_utc))
    }

    pub fn count_pipeline(&self) -> Result<i64> {
        self.count(&LeadQuery::pipeline())
    }

    pub fn update(&self, now_utc: i64, id: LeadId, patch: LeadPatch) -> Result<Lead> {
        let tx = self.conn.unchecked_transaction()?;
        let lead = update_inner(&tx, now_utc, id, patch)?;
        tx.commit()?;
        Ok(lead)
    }

    /// Removes the lead; its comments and tag links go with it.
    pub fn delete(&self, id: LeadId) -> Result<Lead> {
        let tx = self.conn.unchecked_transaction()?;
        let lead = get_inner(&tx, id)?.ok_or_else(|| lead_not_found(id))?;
        tx.execute("DELETE FROM leads WHERE id = ?1;", [id.to_string()])?;
        tx.commit()?;
        Ok(lead)
    }
}

pub(crate) fn lead_not_found(id: LeadId) -> StoreError {
    StoreError::NotFound(format!("lead {id}"))
}

fn create_inner(conn: &Connection, now_utc: i64, input: NewLead) -> Result<Lead> {
    ensure_agent(conn, input.sales_agent)?;
    ensure_tags(conn, &input.tags)?;

    let lead = Lead {
        id: LeadId::new(),
        name: input.name,
        source: input.source,
        status: input.status,
        sales_agent: input.sales_agent,
        tags: input.tags,
        time_to_close: input.time_to_close,
        priority: input.priority,
        created_at: now_utc,
        updated_at: now_utc,
    };

    lead.validate()?;

    conn.execute(
        "INSERT INTO leads (id, name, source, status, sales_agent_id, time_to_close, priority, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
        params![
            lead.id.to_string(),
            lead.name,
            lead.source.map(Labeled::label),
            lead.status.label(),
            lead.sales_agent.to_string(),
            lead.time_to_close,
            lead.priority.label(),
            lead.created_at,
            lead.updated_at,
        ],
    )?;
    write_tags(conn, lead.id, &lead.tags)?;

    Ok(lead)
}

fn update_inner(conn: &Connection, now_utc: i64, id: LeadId, patch: LeadPatch) -> Result<Lead> {
    let mut lead = get_inner(conn, id)?.ok_or_else(|| lead_not_found(id))?;

    if let Some(value) = patch.name {
        lead.name = value;
    }
    if let Some(agent) = patch.sales_agent {
        ensure_agent(conn, agent)?;
        lead.sales_agent = agent;
    }
    if let Some(value) = patch.source {
        lead.source = value;
    }
    if let Some(value) = patch.status {
        lead.status = value;
    }
    if let Some(value) = patch.time_to_close {
        lead.time_to_close = value;
    }
    if let Some(value) = patch.priority {
        lead.priority = value;
    }
    let tags_update = patch.tags.is_some();
    if let Some(tags) = patch.tags {
        ensure_tags(conn, &tags)?;
        lead.tags = tags;
    }

    lead.updated_at = now_utc;
    lead.validate()?;

    conn.execute(
        "UPDATE leads SET name = ?2, source = ?3, status = ?4, sales_agent_id = ?5, time_to_close = ?6, priority = ?7, updated_at = ?8
         WHERE id = ?1;",
        params![
            lead.id.to_string(),
            lead.name,
            lead.source.map(Labeled::label),
            lead.status.label(),
            lead.sales_agent.to_string(),
            lead.time_to_close,
            lead.priority.label(),
            lead.updated_at,
        ],
    )?;

    if tags_update {
        conn.execute(
            "DELETE FROM lead_tags WHERE lead_id = ?1;",
            [lead.id.to_string()],
        )?;
        write_tags(conn, lead.id, &lead.tags)?;
    }

    Ok(lead)
}

fn get_inner(conn: &Connection, id: LeadId) -> Result<Option<Lead>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1;"
    ))?;
    let mut rows = stmt.query([id.to_string()])?;
    let Some(row) = rows.next()? else {
        return Ok(None);
    };
    let mut lead = lead_from_row(row)?;
    lead.tags = tags_for_lead(conn, id)?;
    Ok(Some(lead))
}

fn ensure_agent(conn: &Connection, agent: AgentId) -> Result<()> {
    if !row_exists(conn, "sales_agents", &agent.to_string())? {
        return Err(StoreError::AgentNotFound(agent));
    }
    Ok(())
}

fn ensure_tags(conn: &Connection, tags: &[TagId]) -> Result<()> {
    for tag in tags {
        if !row_exists(conn, "tags", &tag.to_string())? {
            return Err(StoreError::TagNotFound(*tag));
        }
    }
    Ok(())
}

fn write_tags(conn: &Connection, lead: LeadId, tags: &[TagId]) -> Result<()> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO lead_tags (lead_id, tag_id, position) VALUES (?1, ?2, ?3);",
    )?;
    for (position, tag) in tags.iter().enumerate() {
        stmt.execute(params![lead.to_string(), tag.to_string(), position as i64])?;
    }
    Ok(())
}

fn tags_for_lead(conn: &Connection, lead: LeadId) -> Result<Vec<TagId>> {
    let mut stmt = conn.prepare(
        "SELECT tag_id FROM lead_tags WHERE lead_id = ?1 ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([lead.to_string()])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(parse_id(row.get(0)?)?);
    }
    Ok(tags)
}

fn attach_tags(conn: &Connection, leads: &mut [Lead]) -> Result<()> {
    if leads.is_empty() {
        return Ok(());
    }

    let ids: Array = Rc::new(
        leads
            .iter()
            .map(|lead| Value::from(lead.id.to_string()))
            .collect(),
    );
    let mut stmt = conn.prepare(
        "SELECT lead_id, tag_id
         FROM lead_tags
         WHERE lead_id IN rarray(?1)
         ORDER BY lead_id ASC, position ASC;",
    )?;
    let mut rows = stmt.query([ids])?;
    let mut map: HashMap<LeadId, Vec<TagId>> = HashMap::new();
    while let Some(row) = rows.next()? {
        let lead_id: LeadId = parse_id(row.get(0)?)?;
        let tag_id: TagId = parse_id(row.get(1)?)?;
        map.entry(lead_id).or_default().push(tag_id);
    }

    for lead in leads.iter_mut() {
        lead.tags = map.remove(&lead.id).unwrap_or_default();
    }
    Ok(())
}

fn parse_label<E: Labeled>(raw: String) -> Result<E> {
    E::from_label(&raw).ok_or_else(|| StoreError::InvalidData(format!("{} '{}'", E::FIELD, raw)))
}

fn lead_from_row(row: &rusqlite::Row<'_>) -> Result<Lead> {
    let source: Option<String> = row.get(2)?;
    Ok(Lead {
        id: parse_id(row.get(0)?)?,
        name: row.get(1)?,
        source: source.map(parse_label::<LeadSource>).transpose()?,
        status: parse_label::<LeadStatus>(row.get(3)?)?,
        sales_agent: parse_id(row.get(4)?)?,
        tags: Vec::new(),
        time_to_close: row.get(5)?,
        priority: parse_label::<LeadPriority>(row.get(6)?)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
