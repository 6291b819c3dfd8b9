//! Replica lifecycle: drop the file, recreate the empty schema.

use rusqlite::Connection;
use std::fs;
use std::io;
use std::path::Path;

use crate::db::schema::SchemaRegistry;
use crate::errors::AppResult;

/// Delete the replica file and create a fresh one containing every
/// registry table, empty. A missing file is not an error; any other
/// filesystem problem is.
pub fn rebuild(path: &Path, registry: &SchemaRegistry) -> AppResult<()> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    for table in registry.tables() {
        conn.execute(&table.create_sql(), [])?;
        for sql in table.index_sql() {
            conn.execute(&sql, [])?;
        }
    }

    Ok(())
}
