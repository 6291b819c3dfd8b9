use predicates::str::contains;
use rusqlite::Connection;

use catwmigrate::db::queries;

mod common;
use common::{catw, date, seed_source, temp_file, write_sqlite_config};

/// Stringified dump of a query, for comparing source and replica content
fn dump(db: &str, sql: &str) -> Vec<Vec<String>> {
    let conn = Connection::open(db).expect("open");
    let mut stmt = conn.prepare(sql).expect("prepare");
    let ncols = stmt.column_count();

    let rows = stmt
        .query_map([], |row| {
            let mut out = Vec::with_capacity(ncols);
            for i in 0..ncols {
                use rusqlite::types::ValueRef;
                let cell = match row.get_ref(i)? {
                    ValueRef::Null => "NULL".to_string(),
                    ValueRef::Integer(n) => n.to_string(),
                    ValueRef::Real(f) => f.to_string(),
                    ValueRef::Text(t) => String::from_utf8_lossy(t).to_string(),
                    ValueRef::Blob(_) => "BLOB".to_string(),
                };
                out.push(cell);
            }
            Ok(out)
        })
        .expect("query");
    rows.collect::<Result<Vec<_>, _>>().expect("rows")
}

#[test]
fn migrate_copies_every_table() {
    let source = temp_file("migrate_all_src", "sqlite");
    let replica = temp_file("migrate_all", "sqlite");
    let cfg = write_sqlite_config("migrate_all", &source, &replica);
    seed_source(&source);

    catw().args(["--config", &cfg, "rebuild"]).assert().success();
    catw()
        .args(["--config", &cfg, "migrate"])
        .assert()
        .success()
        .stdout(contains("Starting migration"))
        .stdout(contains("Migration complete: 7 rows across 3 tables"));

    let conn = Connection::open(&replica).expect("open replica");
    let count = |table: &str| -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
        .expect("count")
    };
    assert_eq!(count("parameters"), 2);
    assert_eq!(count("projects"), 2);
    assert_eq!(count("timesheet"), 3);
    // schema table only, never copied
    assert_eq!(count("users"), 0);
}

#[test]
fn migrate_round_trips_column_values() {
    let source = temp_file("migrate_fidelity_src", "sqlite");
    let replica = temp_file("migrate_fidelity", "sqlite");
    let cfg = write_sqlite_config("migrate_fidelity", &source, &replica);
    seed_source(&source);

    catw().args(["--config", &cfg, "rebuild"]).assert().success();
    catw().args(["--config", &cfg, "migrate"]).assert().success();

    for sql in [
        "SELECT parameter, value FROM parameters ORDER BY parameter",
        "SELECT project_id, wbs, name, start, \"end\", entered, status, billable, info \
         FROM projects ORDER BY project_id",
        "SELECT project_id, datestring, timestring FROM timesheet \
         ORDER BY project_id, datestring",
    ] {
        assert_eq!(dump(&source, sql), dump(&replica, sql), "mismatch for {sql}");
    }
}

#[test]
fn migrated_rows_read_back_through_the_typed_loaders() {
    let source = temp_file("migrate_typed_src", "sqlite");
    let replica = temp_file("migrate_typed", "sqlite");
    let cfg = write_sqlite_config("migrate_typed", &source, &replica);
    seed_source(&source);

    catw().args(["--config", &cfg, "rebuild"]).assert().success();
    catw().args(["--config", &cfg, "migrate"]).assert().success();

    let conn = Connection::open(&replica).expect("open replica");

    let project = queries::load_project(&conn, 1)
        .expect("query")
        .expect("present");
    assert_eq!(project.name.as_deref(), Some("Acme rollout"));
    assert_eq!(project.wbs.as_deref(), Some("WBS-001"));
    assert_eq!(project.start, Some(date("2024-01-01")));
    assert_eq!(project.end, Some(date("2024-06-30")));
    assert_eq!(project.billable.as_deref(), Some("yes"));
    assert!(project.entered.is_some());
    assert_eq!(project.info, None);

    let projects = queries::load_projects(&conn).expect("list");
    let ids: Vec<i64> = projects.iter().map(|p| p.project_id).collect();
    assert_eq!(ids, vec![1, 2]);

    let entry = queries::load_timesheet_entry(&conn, 1, date("2024-01-02"))
        .expect("query")
        .expect("present");
    assert_eq!(entry.timestring, Some(8));

    let parameter = queries::load_parameter(&conn, "schema_rev")
        .expect("query")
        .expect("present");
    assert_eq!(parameter.value, "7");

    assert!(
        queries::load_timesheet_entry(&conn, 1, date("2024-01-04"))
            .expect("query")
            .is_none()
    );
}

#[test]
fn migrate_rerun_fails_on_duplicate_keys() {
    let source = temp_file("migrate_rerun_src", "sqlite");
    let replica = temp_file("migrate_rerun", "sqlite");
    let cfg = write_sqlite_config("migrate_rerun", &source, &replica);
    seed_source(&source);

    catw().args(["--config", &cfg, "rebuild"]).assert().success();
    catw().args(["--config", &cfg, "migrate"]).assert().success();

    catw()
        .args(["--config", &cfg, "migrate"])
        .assert()
        .failure()
        .stderr(contains("UNIQUE constraint failed"));
}

#[test]
fn migrate_without_source_tables_fails() {
    let source = temp_file("migrate_nosrc_src", "sqlite");
    let replica = temp_file("migrate_nosrc", "sqlite");
    let cfg = write_sqlite_config("migrate_nosrc", &source, &replica);
    // source deliberately not seeded

    catw().args(["--config", &cfg, "rebuild"]).assert().success();
    catw()
        .args(["--config", &cfg, "migrate"])
        .assert()
        .failure()
        .stderr(contains("no such table"));
}

#[test]
fn status_reports_replica_contents() {
    let source = temp_file("status_src", "sqlite");
    let replica = temp_file("status", "sqlite");
    let cfg = write_sqlite_config("status", &source, &replica);
    seed_source(&source);

    catw().args(["--config", &cfg, "rebuild"]).assert().success();
    catw().args(["--config", &cfg, "migrate"]).assert().success();

    catw()
        .args(["--config", &cfg, "status"])
        .assert()
        .success()
        .stdout(contains("projects"))
        .stdout(contains("timesheet"))
        .stdout(contains("Timesheet range"))
        .stdout(contains("2024-01-02"))
        .stdout(contains("2024-02-05"));
}
