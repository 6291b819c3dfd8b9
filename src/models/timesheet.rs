use chrono::NaiveDate;

use crate::db::schema::{TIMESHEET, TableDef};
use crate::db::value::SqlValue;

/// One worked-time entry: minutes (or whatever unit catw uses) booked on
/// a project for a calendar day. Project and day together form the key.
#[derive(Debug, Clone)]
pub struct Timesheet {
    pub project_id: i64,          // ⇔ timesheet.project_id (INTEGER PK, FK projects)
    pub datestring: NaiveDate,    // ⇔ timesheet.datestring (DATE PK)
    pub timestring: Option<i64>,  // ⇔ timesheet.timestring (INTEGER)
}

impl Timesheet {
    pub const TABLE: &'static TableDef = &TIMESHEET;

    pub fn new(project_id: i64, datestring: NaiveDate, timestring: i64) -> Self {
        Self {
            project_id,
            datestring,
            timestring: Some(timestring),
        }
    }

    pub fn values(&self) -> Vec<SqlValue> {
        vec![
            self.project_id.into(),
            self.datestring.into(),
            self.timestring.into(),
        ]
    }
}
