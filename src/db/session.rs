//! Write session over the SQLite replica (lightweight for CLI usage).
//!
//! Rows queue up in memory via `add` and hit the database only inside
//! `commit`, which wraps every pending INSERT in one transaction. A
//! constraint violation therefore aborts the whole batch: the
//! transaction rolls back on drop and nothing of it is persisted.

use rusqlite::Connection;
use std::path::Path;

use crate::db::schema::TableDef;
use crate::db::value::SqlValue;
use crate::errors::AppResult;

pub struct SqliteSession {
    conn: Connection,
    pending: Vec<(&'static TableDef, Vec<SqlValue>)>,
}

impl SqliteSession {
    pub fn open(path: &Path) -> AppResult<Self> {
        let conn = Connection::open(path)?;
        // off by default in SQLite
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn,
            pending: Vec::new(),
        })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn,
            pending: Vec::new(),
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Queue one row for the next `commit`. The row must carry exactly
    /// the table's declared columns, in declaration order.
    pub fn add(&mut self, table: &'static TableDef, row: Vec<SqlValue>) {
        self.pending.push((table, row));
    }

    /// Number of rows queued and not yet committed.
    pub fn staged(&self) -> usize {
        self.pending.len()
    }

    /// Drop every queued row without touching the database.
    pub fn rollback(&mut self) {
        self.pending.clear();
    }

    /// Flush every queued row inside a single transaction and return how
    /// many were written. On error the queue is kept, so the caller can
    /// inspect or drop it.
    pub fn commit(&mut self) -> AppResult<usize> {
        if self.pending.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        for (table, row) in &self.pending {
            let mut stmt = tx.prepare_cached(&table.insert_sql())?;
            stmt.execute(rusqlite::params_from_iter(row.iter()))?;
        }
        tx.commit()?;

        let flushed = self.pending.len();
        self.pending.clear();
        Ok(flushed)
    }
}
