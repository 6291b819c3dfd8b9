use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::db::schema::{PROJECTS, TableDef};
use crate::db::value::SqlValue;

#[derive(Debug, Clone)]
pub struct Project {
    pub project_id: i64,                  // ⇔ projects.project_id (INTEGER PK)
    pub wbs: Option<String>,              // ⇔ projects.wbs (VARCHAR(256))
    pub name: Option<String>,             // ⇔ projects.name (VARCHAR(256))
    pub start: Option<NaiveDate>,         // ⇔ projects.start (DATE)
    pub end: Option<NaiveDate>,           // ⇔ projects.end (DATE, reserved word)
    pub entered: Option<NaiveDateTime>,   // ⇔ projects.entered (DATETIME)
    pub status: Option<String>,           // ⇔ projects.status (VARCHAR(256))
    pub billable: Option<String>,         // ⇔ projects.billable (VARCHAR(256))
    pub info: Option<String>,             // ⇔ projects.info (TEXT)
}

impl Project {
    pub const TABLE: &'static TableDef = &PROJECTS;

    /// Constructor for projects created locally. Stamps `entered` with
    /// the current UTC time; copied rows keep whatever the source holds.
    pub fn new(
        project_id: i64,
        wbs: &str,
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
        status: &str,
        billable: &str,
    ) -> Self {
        Self {
            project_id,
            wbs: Some(wbs.to_string()),
            name: Some(name.to_string()),
            start: Some(start),
            end: Some(end),
            entered: Some(Utc::now().naive_utc()),
            status: Some(status.to_string()),
            billable: Some(billable.to_string()),
            info: None,
        }
    }

    /// Cell values in the table's column order, ready for a session add.
    pub fn values(&self) -> Vec<SqlValue> {
        vec![
            self.project_id.into(),
            self.wbs.clone().into(),
            self.name.clone().into(),
            self.start.into(),
            self.end.into(),
            self.entered.into(),
            self.status.clone().into(),
            self.billable.clone().into(),
            self.info.clone().into(),
        ]
    }
}
