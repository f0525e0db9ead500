use leadbook_core::{closed_window, AgentId, Labeled, LeadFilter, LeadSource, LeadStatus};
use rusqlite::types::Value;

pub(crate) const LEAD_COLUMNS: &str =
    "id, name, source, status, sales_agent_id, time_to_close, priority, created_at, updated_at";

/// Conjunction of lead predicates compiled to a parameterized `SELECT`.
#[derive(Debug, Default, Clone)]
pub struct LeadQuery {
    pub sales_agent: Option<AgentId>,
    pub statuses: Vec<LeadStatus>,
    pub source: Option<LeadSource>,
    pub updated_between: Option<(i64, i64)>,
}

pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl LeadQuery {
    pub fn from_filter(filter: &LeadFilter) -> Self {
        LeadQuery {
            sales_agent: filter.sales_agent,
            statuses: filter.status.into_iter().collect(),
            source: filter.source,
            updated_between: None,
        }
    }

    /// Leads in `Closed` status last modified inside the trailing window.
    pub fn closed_since_window(now_utc: i64) -> Self {
        LeadQuery {
            statuses: vec![LeadStatus::Closed],
            updated_between: Some(closed_window(now_utc)),
            ..Default::default()
        }
    }

    pub fn pipeline() -> Self {
        LeadQuery {
            statuses: LeadStatus::ALL
                .iter()
                .copied()
                .filter(|status| status.is_pipeline())
                .collect(),
            ..Default::default()
        }
    }

    pub fn to_sql(&self) -> SqlQuery {
        let (where_sql, params) = self.where_clause();
        let sql = format!(
            "SELECT {LEAD_COLUMNS} FROM leads{where_sql} ORDER BY created_at ASC, rowid ASC"
        );
        SqlQuery { sql, params }
    }

    pub fn to_count_sql(&self) -> SqlQuery {
        let (where_sql, params) = self.where_clause();
        SqlQuery {
            sql: format!("SELECT COUNT(1) FROM leads{where_sql}"),
            params,
        }
    }

    fn where_clause(&self) -> (String, Vec<Value>) {
        let mut clauses: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(agent) = self.sales_agent {
            clauses.push("sales_agent_id = ?".to_string());
            params.push(Value::from(agent.to_string()));
        }

        if !self.statuses.is_empty() {
            let placeholders = vec!["?"; self.statuses.len()].join(", ");
            clauses.push(format!("status IN ({placeholders})"));
            for status in &self.statuses {
                params.push(Value::from(status.label().to_string()));
            }
        }

        if let Some(source) = self.source {
            clauses.push("source = ?".to_string());
            params.push(Value::from(source.label().to_string()));
        }

        if let Some((start, end)) = self.updated_between {
            clauses.push("updated_at >= ? AND updated_at <= ?".to_string());
            params.push(Value::from(start));
            params.push(Value::from(end));
        }

        if clauses.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", clauses.join(" AND ")), params)
        }
    }
}
