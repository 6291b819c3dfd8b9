//! Bulk copy of the catw tables from the source into the replica.

use crate::db::schema::SchemaRegistry;
use crate::db::session::SqliteSession;
use crate::db::source::SourceConn;
use crate::errors::AppResult;

/// Row count for one copied table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: usize,
}

/// Outcome of one migration run, tables in copy order.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub tables: Vec<TableCount>,
}

impl MigrationReport {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

/// Copy every row of the registry's copy tables into the replica.
///
/// Each table is read in full, staged, and committed before the next one
/// starts, so the copy order (parameters, projects, timesheet) keeps
/// foreign-key parents ahead of their children. The first error aborts
/// the run; completed tables stay committed, the failed one is rolled
/// back as a whole.
pub fn copy_all(
    source: &mut SourceConn,
    replica: &mut SqliteSession,
    registry: &SchemaRegistry,
) -> AppResult<MigrationReport> {
    let mut report = MigrationReport::default();

    for &table in registry.copy_order() {
        let rows = source.read_all(table)?;
        for row in rows {
            replica.add(table, row);
        }
        let copied = replica.commit()?;
        report.tables.push(TableCount {
            table: table.name,
            rows: copied,
        });
    }

    Ok(report)
}
