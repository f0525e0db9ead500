use crate::error::{Result, StoreError};
use crate::repo::parse_id;
use leadbook_core::{normalize_email, AgentId, NewAgent, SalesAgent};
use rusqlite::{params, Connection, OptionalExtension};

pub struct AgentsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> AgentsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts an agent. The email is stored as submitted; uniqueness is
    /// checked on its normalized form, so `Ada@Example.com` collides with
    /// `ada@example.com`.
    pub fn create(&self, now_utc: i64, input: NewAgent) -> Result<SalesAgent> {
        let email = input.email.trim().to_string();
        let key = normalize_email(&email).ok_or_else(|| {
            StoreError::InvalidData(format!("email '{}'", input.email))
        })?;
        let tx = self.conn.unchecked_transaction()?;
        if AgentsRepo::new(&tx).find_by_email(&email)?.is_some() {
            return Err(StoreError::DuplicateEmail(email));
        }

        let agent = SalesAgent {
            id: AgentId::new(),
            name: input.name,
            email,
            created_at: now_utc,
        };
        tx.execute(
            "INSERT INTO sales_agents (id, name, email, email_key, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                agent.id.to_string(),
                agent.name,
                agent.email,
                key,
                agent.created_at
            ],
        )?;
        tx.commit()?;
        Ok(agent)
    }

    pub fn get(&self, id: AgentId) -> Result<Option<SalesAgent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, email, created_at FROM sales_agents WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(agent_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<SalesAgent>> {
        let Some(id) = find_id_by_email(self.conn, email)? else {
            return Ok(None);
        };
        self.get(id)
    }

    pub fn list(&self) -> Result<Vec<SalesAgent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, email, created_at FROM sales_agents ORDER BY created_at ASC, rowid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut agents = Vec::new();
        while let Some(row) = rows.next()? {
            agents.push(agent_from_row(row)?);
        }
        Ok(agents)
    }

    /// Deletes an agent that owns no leads, together with the comments they
    /// authored.
    pub fn delete(&self, id: AgentId) -> Result<SalesAgent> {
        let tx = self.conn.unchecked_transaction()?;
        let agent = AgentsRepo::new(&tx)
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(format!("sales agent {id}")))?;

        let leads: i64 = tx.query_row(
            "SELECT COUNT(1) FROM leads WHERE sales_agent_id = ?1;",
            [id.to_string()],
            |row| row.get(0),
        )?;
        if leads > 0 {
            return Err(StoreError::AgentInUse { agent: id, leads });
        }

        tx.execute(
            "DELETE FROM comments WHERE author_id = ?1;",
            [id.to_string()],
        )?;
        tx.execute("DELETE FROM sales_agents WHERE id = ?1;", [id.to_string()])?;
        tx.commit()?;
        Ok(agent)
    }
}

fn find_id_by_email(conn: &Connection, email: &str) -> Result<Option<AgentId>> {
    let Some(key) = normalize_email(email) else {
        return Ok(None);
    };
    let id_str: Option<String> = conn
        .query_row(
            "SELECT id FROM sales_agents WHERE email_key = ?1;",
            [key],
            |row| row.get(0),
        )
        .optional()?;
    id_str.map(parse_id).transpose()
}

fn agent_from_row(row: &rusqlite::Row<'_>) -> Result<SalesAgent> {
    Ok(SalesAgent {
        id: parse_id(row.get(0)?)?,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: row.get(3)?,
    })
}
