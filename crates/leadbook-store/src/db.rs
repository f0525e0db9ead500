use crate::error::{Result, StoreError};
use crate::paths::ensure_parent_dir;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

const BUSY_TIMEOUT_MS: i64 = 2000;

pub fn open(path: &Path) -> Result<Connection> {
    if path.is_dir() {
        return Err(StoreError::InvalidDataPath(path.to_path_buf()));
    }
    ensure_parent_dir(path)?;
    let conn = Connection::open(path)?;
    restrict_db_permissions(path)?;
    configure(&conn, "WAL")?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn, "MEMORY")?;
    Ok(conn)
}

/// Lead deletion cascades to comments and tag links, so foreign keys must be
/// enforced on every connection.
fn configure(conn: &Connection, journal_mode: &str) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "journal_mode", journal_mode)?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS)?;
    // `rarray()` binds id lists when attaching tags to listed leads.
    rusqlite::vtab::array::load_module(conn)?;

    let enforced: i64 = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    if enforced != 1 {
        return Err(StoreError::Migration(
            "sqlite foreign key enforcement unavailable".to_string(),
        ));
    }
    Ok(())
}

#[cfg(unix)]
fn restrict_db_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if path.exists() {
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn restrict_db_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{open, open_in_memory};
    use crate::error::StoreError;

    #[test]
    fn in_memory_connection_enforces_foreign_keys() {
        let conn = open_in_memory().expect("open");
        let enforced: i64 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .expect("pragma");
        assert_eq!(enforced, 1);
    }

    #[test]
    fn open_creates_missing_parent_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("leadbook.sqlite3");
        open(&path).expect("open");
        assert!(path.exists());
    }

    #[test]
    fn open_rejects_directory_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = open(temp.path()).expect_err("directory");
        assert!(matches!(err, StoreError::InvalidDataPath(_)));
    }

    #[cfg(unix)]
    #[test]
    fn database_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("leadbook.sqlite3");
        open(&path).expect("open");
        let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
