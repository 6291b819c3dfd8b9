use crate::config::Config;
use crate::core::migrate::copy_all;
use crate::db::schema::SchemaRegistry;
use crate::db::session::SqliteSession;
use crate::db::source::SourceConn;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::expand_tilde;

/// Handle the `migrate` command: copy every row of the catw tables from
/// the configured source into the replica.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let db_path = expand_tilde(&cfg.replica);
    let registry = SchemaRegistry::catw();

    messages::info(format!(
        "Starting migration: {} → {}",
        cfg.source.describe(),
        db_path.display()
    ));

    let mut source = SourceConn::open(&cfg.source)?;
    let mut replica = SqliteSession::open(&db_path)?;

    let report = copy_all(&mut source, &mut replica, &registry)?;

    for t in &report.tables {
        println!("    {:<12} {} rows", t.table, t.rows);
    }
    messages::success(format!(
        "Migration complete: {} rows across {} tables.",
        report.total_rows(),
        report.tables.len()
    ));

    Ok(())
}
