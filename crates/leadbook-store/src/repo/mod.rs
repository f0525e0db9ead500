pub mod agents;
pub mod comments;
pub mod leads;
pub mod tags;

pub use agents::AgentsRepo;
pub use comments::CommentsRepo;
pub use leads::LeadsRepo;
pub use tags::TagsRepo;

use crate::error::{Result, StoreError};
use rusqlite::{Connection, OptionalExtension};
use std::str::FromStr;

pub(crate) fn parse_id<I: FromStr>(raw: String) -> Result<I> {
    I::from_str(&raw).map_err(|_| StoreError::InvalidId(raw))
}

/// `table` is always a literal from this crate, never caller input.
pub(crate) fn row_exists(conn: &Connection, table: &str, id: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            &format!("SELECT 1 FROM {table} WHERE id = ?1;"),
            [id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}
