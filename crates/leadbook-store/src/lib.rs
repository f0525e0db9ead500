pub mod db;
pub mod error;
pub mod migrate;
pub mod paths;
pub mod query;
pub mod repo;

use crate::error::{Result, StoreError};
use rusqlite::Connection;
use std::path::Path;

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        migrate::run_migrations(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i64> {
        migrate::schema_version(&self.conn)
    }

    /// Closes the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_conn, err)| StoreError::Sql(err))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn leads(&self) -> repo::LeadsRepo<'_> {
        repo::LeadsRepo::new(&self.conn)
    }

    pub fn agents(&self) -> repo::AgentsRepo<'_> {
        repo::AgentsRepo::new(&self.conn)
    }

    pub fn comments(&self) -> repo::CommentsRepo<'_> {
        repo::CommentsRepo::new(&self.conn)
    }

    pub fn tags(&self) -> repo::TagsRepo<'_> {
        repo::TagsRepo::new(&self.conn)
    }
}
