use crate::error::{Result, StoreError};
use rusqlite::Connection;

/// Ordered schema steps; the schema version is the number applied so far,
/// kept in SQLite's `user_version` header field.
const MIGRATIONS: &[(&str, &str)] = &[("001_init", include_str!("../migrations/001_init.sql"))];

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    let current = schema_version(&tx)?;
    let latest = MIGRATIONS.len() as i64;

    if current > latest {
        return Err(StoreError::Migration(format!(
            "database schema {current} is newer than this build supports ({latest})"
        )));
    }

    for (version, (name, sql)) in (1..).zip(MIGRATIONS.iter()) {
        if version <= current {
            continue;
        }
        tx.execute_batch(sql)
            .map_err(|err| StoreError::Migration(format!("{name}: {err}")))?;
        tx.pragma_update(None, "user_version", version)?;
    }

    tx.commit()?;
    Ok(())
}

pub fn schema_version(conn: &Connection) -> Result<i64> {
    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}
