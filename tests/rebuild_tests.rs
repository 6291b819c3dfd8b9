use predicates::str::contains;
use rusqlite::Connection;

mod common;
use common::{catw, temp_file, write_sqlite_config};

fn table_names(db: &str) -> Vec<String> {
    let conn = Connection::open(db).expect("open");
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .expect("prepare");
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .expect("query");
    rows.collect::<Result<Vec<_>, _>>().expect("names")
}

fn column_names(db: &str, table: &str) -> Vec<String> {
    let conn = Connection::open(db).expect("open");
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info('{table}')"))
        .expect("prepare");
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .expect("query");
    rows.collect::<Result<Vec<_>, _>>().expect("columns")
}

#[test]
fn rebuild_creates_the_schema_when_the_file_is_missing() {
    let replica = temp_file("rebuild_missing", "sqlite");
    let source = temp_file("rebuild_missing_src", "sqlite");
    let cfg = write_sqlite_config("rebuild_missing", &source, &replica);

    catw()
        .args(["--config", &cfg, "rebuild"])
        .assert()
        .success()
        .stdout(contains("rebuilt"));

    assert_eq!(
        table_names(&replica),
        vec!["parameters", "projects", "timesheet", "users"]
    );
    assert_eq!(
        column_names(&replica, "projects"),
        vec!["project_id", "wbs", "name", "start", "end", "entered", "status", "billable", "info"]
    );
    assert_eq!(
        column_names(&replica, "timesheet"),
        vec!["project_id", "datestring", "timestring"]
    );
    assert_eq!(
        column_names(&replica, "users"),
        vec!["id", "username", "password_hash"]
    );
    assert_eq!(column_names(&replica, "parameters"), vec!["parameter", "value"]);
}

#[test]
fn rebuild_wipes_existing_rows() {
    let replica = temp_file("rebuild_wipe", "sqlite");
    let source = temp_file("rebuild_wipe_src", "sqlite");
    let cfg = write_sqlite_config("rebuild_wipe", &source, &replica);

    catw().args(["--config", &cfg, "rebuild"]).assert().success();

    {
        let conn = Connection::open(&replica).expect("open");
        conn.execute(
            "INSERT INTO parameters (parameter, value) VALUES ('stale', 'row')",
            [],
        )
        .expect("insert");
    }

    catw().args(["--config", &cfg, "rebuild"]).assert().success();

    let conn = Connection::open(&replica).expect("open");
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM parameters", [], |row| row.get(0))
        .expect("count");
    assert_eq!(count, 0);
}

#[test]
fn rebuild_enforces_the_unique_username_index() {
    let replica = temp_file("rebuild_index", "sqlite");
    let source = temp_file("rebuild_index_src", "sqlite");
    let cfg = write_sqlite_config("rebuild_index", &source, &replica);

    catw().args(["--config", &cfg, "rebuild"]).assert().success();

    let conn = Connection::open(&replica).expect("open");
    let sql: String = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'index' AND name = 'ix_users_username'",
            [],
            |row| row.get(0),
        )
        .expect("index present");
    assert!(sql.contains("UNIQUE"));
}

#[test]
fn timesheet_has_a_composite_primary_key() {
    let replica = temp_file("rebuild_pk", "sqlite");
    let source = temp_file("rebuild_pk_src", "sqlite");
    let cfg = write_sqlite_config("rebuild_pk", &source, &replica);

    catw().args(["--config", &cfg, "rebuild"]).assert().success();

    let conn = Connection::open(&replica).expect("open");
    let mut stmt = conn
        .prepare("PRAGMA table_info('timesheet')")
        .expect("prepare");
    // pk column (index 5) is the 1-based position within the primary key
    let pks: Vec<(String, i64)> = stmt
        .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, i64>(5)?)))
        .expect("query")
        .collect::<Result<Vec<_>, _>>()
        .expect("rows");

    assert_eq!(
        pks,
        vec![
            ("project_id".to_string(), 1),
            ("datestring".to_string(), 2),
            ("timestring".to_string(), 0),
        ]
    );
}

#[test]
fn replica_override_wins_over_the_config_file() {
    let configured = temp_file("rebuild_override_cfgdb", "sqlite");
    let overridden = temp_file("rebuild_override_clidb", "sqlite");
    let source = temp_file("rebuild_override_src", "sqlite");
    let cfg = write_sqlite_config("rebuild_override", &source, &configured);

    catw()
        .args(["--config", &cfg, "--replica", &overridden, "rebuild"])
        .assert()
        .success();

    assert!(std::path::Path::new(&overridden).exists());
    assert!(!std::path::Path::new(&configured).exists());
}
