use crate::error::Result;
use crate::repo::parse_id;
use leadbook_core::{NewTag, Tag, TagId};
use rusqlite::{params, Connection};

pub struct TagsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> TagsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: NewTag) -> Result<Tag> {
        let tag = Tag {
            id: TagId::new(),
            name: input.name,
            created_at: now_utc,
        };
        self.conn.execute(
            "INSERT INTO tags (id, name, created_at) VALUES (?1, ?2, ?3);",
            params![tag.id.to_string(), tag.name, tag.created_at],
        )?;
        Ok(tag)
    }

    pub fn list(&self) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, created_at FROM tags ORDER BY created_at ASC, rowid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(tag_from_row(row)?);
        }
        Ok(tags)
    }
}

fn tag_from_row(row: &rusqlite::Row<'_>) -> Result<Tag> {
    Ok(Tag {
        id: parse_id(row.get(0)?)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}
