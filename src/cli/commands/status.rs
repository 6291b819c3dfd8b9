use crate::config::Config;
use crate::db::schema::SchemaRegistry;
use crate::db::session::SqliteSession;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::expand_tilde;

/// Handle the `status` command: print replica file and content info.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let db_path = expand_tilde(&cfg.replica);
    let registry = SchemaRegistry::catw();

    let session = SqliteSession::open(&db_path)?;
    stats::print_replica_info(session.conn(), &db_path.to_string_lossy(), &registry)?;

    Ok(())
}
