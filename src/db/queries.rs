//! Typed reads from the replica.
//!
//! These are for the tool's own commands and for callers embedding the
//! crate; the bulk copy never goes through them.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row};

use crate::db::schema::{Dialect, TableDef};
use crate::db::value::{self, format_date};
use crate::errors::AppResult;
use crate::models::{Parameter, Project, Timesheet, User};

fn text_to_date(s: &str) -> Result<NaiveDate> {
    value::parse_date(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn text_to_datetime(s: &str) -> Result<NaiveDateTime> {
    value::parse_datetime(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

pub fn map_project(row: &Row) -> Result<Project> {
    let start: Option<String> = row.get("start")?;
    let end: Option<String> = row.get("end")?;
    let entered: Option<String> = row.get("entered")?;

    Ok(Project {
        project_id: row.get("project_id")?,
        wbs: row.get("wbs")?,
        name: row.get("name")?,
        start: start.as_deref().map(text_to_date).transpose()?,
        end: end.as_deref().map(text_to_date).transpose()?,
        entered: entered.as_deref().map(text_to_datetime).transpose()?,
        status: row.get("status")?,
        billable: row.get("billable")?,
        info: row.get("info")?,
    })
}

pub fn map_timesheet(row: &Row) -> Result<Timesheet> {
    let datestring: String = row.get("datestring")?;

    Ok(Timesheet {
        project_id: row.get("project_id")?,
        datestring: text_to_date(&datestring)?,
        timestring: row.get("timestring")?,
    })
}

pub fn map_parameter(row: &Row) -> Result<Parameter> {
    Ok(Parameter {
        parameter: row.get("parameter")?,
        value: row.get("value")?,
    })
}

pub fn map_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
    })
}

pub fn load_project(conn: &Connection, project_id: i64) -> AppResult<Option<Project>> {
    let sql = format!(
        "{} WHERE project_id = ?1",
        Project::TABLE.select_sql(Dialect::Sqlite)
    );
    let mut stmt = conn.prepare(&sql)?;
    let project = stmt.query_row([project_id], map_project).optional()?;
    Ok(project)
}

pub fn load_projects(conn: &Connection) -> AppResult<Vec<Project>> {
    let sql = format!(
        "{} ORDER BY project_id ASC",
        Project::TABLE.select_sql(Dialect::Sqlite)
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_project)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_timesheet_entry(
    conn: &Connection,
    project_id: i64,
    day: NaiveDate,
) -> AppResult<Option<Timesheet>> {
    let sql = format!(
        "{} WHERE project_id = ?1 AND datestring = ?2",
        Timesheet::TABLE.select_sql(Dialect::Sqlite)
    );
    let mut stmt = conn.prepare(&sql)?;
    let entry = stmt
        .query_row(
            rusqlite::params![project_id, format_date(day)],
            map_timesheet,
        )
        .optional()?;
    Ok(entry)
}

pub fn load_parameter(conn: &Connection, name: &str) -> AppResult<Option<Parameter>> {
    let sql = format!(
        "{} WHERE parameter = ?1",
        Parameter::TABLE.select_sql(Dialect::Sqlite)
    );
    let mut stmt = conn.prepare(&sql)?;
    let parameter = stmt.query_row([name], map_parameter).optional()?;
    Ok(parameter)
}

pub fn load_user(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let sql = format!(
        "{} WHERE username = ?1",
        User::TABLE.select_sql(Dialect::Sqlite)
    );
    let mut stmt = conn.prepare(&sql)?;
    let user = stmt.query_row([username], map_user).optional()?;
    Ok(user)
}

pub fn count_rows(conn: &Connection, table: &TableDef) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", Dialect::Sqlite.quote(table.name));
    let count = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(count)
}
