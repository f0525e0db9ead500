use crate::error::{Result, StoreError};
use crate::repo::leads::lead_not_found;
use crate::repo::{parse_id, row_exists};
use leadbook_core::{Comment, CommentId, LeadId, NewComment};
use rusqlite::{params, Connection};

pub struct CommentsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> CommentsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: NewComment) -> Result<Comment> {
        if !row_exists(self.conn, "leads", &input.lead.to_string())? {
            return Err(lead_not_found(input.lead));
        }
        if !row_exists(self.conn, "sales_agents", &input.author.to_string())? {
            return Err(StoreError::AgentNotFound(input.author));
        }

        let comment = Comment {
            id: CommentId::new(),
            lead: input.lead,
            author: input.author,
            comment_text: input.comment_text,
            created_at: now_utc,
        };
        self.conn.execute(
            "INSERT INTO comments (id, lead_id, author_id, comment_text, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                comment.id.to_string(),
                comment.lead.to_string(),
                comment.author.to_string(),
                comment.comment_text,
                comment.created_at,
            ],
        )?;
        Ok(comment)
    }

    /// Comments on `lead`, oldest first.
    pub fn list_for_lead(&self, lead: LeadId) -> Result<Vec<Comment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, lead_id, author_id, comment_text, created_at
             FROM comments
             WHERE lead_id = ?1
             ORDER BY created_at ASC, rowid ASC;",
        )?;
        let mut rows = stmt.query([lead.to_string()])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(comment_from_row(row)?);
        }
        Ok(comments)
    }
}

fn comment_from_row(row: &rusqlite::Row<'_>) -> Result<Comment> {
    Ok(Comment {
        id: parse_id(row.get(0)?)?,
        lead: parse_id(row.get(1)?)?,
        author: parse_id(row.get(2)?)?,
        comment_text: row.get(3)?,
        created_at: row.get(4)?,
    })
}
