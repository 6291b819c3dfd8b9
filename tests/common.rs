#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use catwmigrate::db::admin;
use catwmigrate::db::schema::SchemaRegistry;
use catwmigrate::db::session::SqliteSession;
use catwmigrate::models::{Parameter, Project, Timesheet};

pub fn catw() -> Command {
    cargo_bin_cmd!("catwmigrate")
}

/// Create a unique temp file path and remove any leftover from a
/// previous run
pub fn temp_file(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_catwmigrate.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a config file whose source is a SQLite file, so CLI tests run
/// without a MySQL server
pub fn write_sqlite_config(name: &str, source: &str, replica: &str) -> String {
    let cfg_path = temp_file(&format!("{}_cfg", name), "yml");
    let yaml = format!("replica: {replica}\nsource:\n  backend: sqlite\n  path: {source}\n");
    fs::write(&cfg_path, yaml).expect("write config");
    cfg_path
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date literal")
}

/// Build a source database with the catw schema and a small dataset:
/// 2 projects, 3 timesheet entries, 2 parameters (7 copyable rows)
pub fn seed_source(path: &str) {
    let registry = SchemaRegistry::catw();
    admin::rebuild(Path::new(path), &registry).expect("rebuild source");

    let mut session = SqliteSession::open(Path::new(path)).expect("open source");

    let acme = Project::new(
        1,
        "WBS-001",
        "Acme rollout",
        date("2024-01-01"),
        date("2024-06-30"),
        "active",
        "yes",
    );
    let internal = Project::new(
        2,
        "WBS-002",
        "Internal tooling",
        date("2024-02-01"),
        date("2024-12-31"),
        "closed",
        "no",
    );
    session.add(Project::TABLE, acme.values());
    session.add(Project::TABLE, internal.values());
    session.commit().expect("seed projects");

    session.add(
        Timesheet::TABLE,
        Timesheet::new(1, date("2024-01-02"), 8).values(),
    );
    session.add(
        Timesheet::TABLE,
        Timesheet::new(1, date("2024-01-03"), 6).values(),
    );
    session.add(
        Timesheet::TABLE,
        Timesheet::new(2, date("2024-02-05"), 4).values(),
    );
    session.commit().expect("seed timesheet");

    session.add(
        Parameter::TABLE,
        Parameter::new("last_run", "2024-06-30").values(),
    );
    session.add(
        Parameter::TABLE,
        Parameter::new("schema_rev", "7").values(),
    );
    session.commit().expect("seed parameters");
}
