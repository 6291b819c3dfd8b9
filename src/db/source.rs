//! Read-only connection to the copy source.
//!
//! `open` only records the MySQL connection options; the TCP connection
//! is made on the first read, so commands that never touch the source
//! (rebuild, status) work with an unreachable server.

use mysql::prelude::Queryable;
use mysql::{Opts, OptsBuilder};
use rusqlite::Connection;

use crate::config::SourceConfig;
use crate::db::schema::{Dialect, TableDef};
use crate::db::value::SqlValue;
use crate::errors::{AppError, AppResult};
use crate::utils::expand_tilde;

pub enum SourceConn {
    Mysql {
        opts: Opts,
        conn: Option<mysql::Conn>,
    },
    Sqlite {
        conn: Connection,
    },
}

impl SourceConn {
    pub fn open(cfg: &SourceConfig) -> AppResult<Self> {
        match cfg {
            SourceConfig::Mysql {
                host,
                port,
                database,
                user,
                password,
                charset,
            } => {
                let opts = OptsBuilder::new()
                    .ip_or_hostname(Some(host.clone()))
                    .tcp_port(*port)
                    .user(Some(user.clone()))
                    .pass(Some(password.clone()))
                    .db_name(Some(database.clone()))
                    .init(vec![format!("SET NAMES {charset}")]);
                Ok(SourceConn::Mysql {
                    opts: opts.into(),
                    conn: None,
                })
            }
            SourceConfig::Sqlite { path } => {
                let conn = Connection::open(expand_tilde(path))?;
                Ok(SourceConn::Sqlite { conn })
            }
        }
    }

    /// Fetch every row of `table`, converted per the declared column
    /// kinds, in the source's own order.
    pub fn read_all(&mut self, table: &TableDef) -> AppResult<Vec<Vec<SqlValue>>> {
        match self {
            SourceConn::Mysql { opts, conn } => {
                let mut live = match conn.take() {
                    Some(c) => c,
                    None => mysql::Conn::new(opts.clone())?,
                };
                let rows = read_mysql(&mut live, table);
                *conn = Some(live);
                rows
            }
            SourceConn::Sqlite { conn } => read_sqlite(conn, table),
        }
    }
}

fn read_mysql(conn: &mut mysql::Conn, table: &TableDef) -> AppResult<Vec<Vec<SqlValue>>> {
    let mut out = Vec::new();

    let result = conn.query_iter(table.select_sql(Dialect::Mysql))?;
    for row in result {
        let row = row?;
        if row.len() != table.columns.len() {
            return Err(AppError::Conversion(
                table.name.to_string(),
                format!("expected {} columns, got {}", table.columns.len(), row.len()),
            ));
        }

        // column order matches the SELECT
        let mut converted = Vec::with_capacity(row.len());
        for (idx, col) in table.columns.iter().enumerate() {
            let value = row.as_ref(idx).cloned().ok_or_else(|| {
                AppError::Conversion(
                    format!("{}.{}", table.name, col.name),
                    "value already taken".to_string(),
                )
            })?;
            converted.push(SqlValue::from_mysql(col.kind, value, table.name, col.name)?);
        }
        out.push(converted);
    }

    Ok(out)
}

fn read_sqlite(conn: &Connection, table: &TableDef) -> AppResult<Vec<Vec<SqlValue>>> {
    let mut stmt = conn.prepare(&table.select_sql(Dialect::Sqlite))?;
    let mut rows = stmt.query([])?;

    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut converted = Vec::with_capacity(table.columns.len());
        for (idx, col) in table.columns.iter().enumerate() {
            converted.push(SqlValue::from_sqlite(row, idx, col.kind)?);
        }
        out.push(converted);
    }

    Ok(out)
}
