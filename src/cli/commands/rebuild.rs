use crate::config::Config;
use crate::db::admin;
use crate::db::schema::SchemaRegistry;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::expand_tilde;

/// Handle the `rebuild` command: wipe the replica file and recreate the
/// empty catw schema.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let db_path = expand_tilde(&cfg.replica);
    let registry = SchemaRegistry::catw();

    messages::info(format!("Rebuilding replica at {}", db_path.display()));
    admin::rebuild(&db_path, &registry)?;
    messages::success(format!(
        "Replica schema rebuilt: {} tables, 0 rows.",
        registry.tables().len()
    ));

    Ok(())
}
