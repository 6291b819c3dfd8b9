//! Typed cell values passing between source and replica.
//!
//! Rows are read from the source into `SqlValue`s according to the
//! declared `ColumnKind`, then bound to the replica INSERT via `ToSql`.
//! NULL stays NULL through the whole pipeline; nothing here invents
//! values.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use rusqlite::ToSql;
use rusqlite::types::{ToSqlOutput, Value, ValueRef};

use crate::db::schema::ColumnKind;
use crate::errors::{AppError, AppResult};

pub const DATE_FMT: &str = "%Y-%m-%d";
pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT).map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Accepts both `2024-01-02 08:30:00` and the microsecond form the
/// source emits for sub-second timestamps.
pub fn parse_datetime(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .map_err(|_| AppError::InvalidDateTime(s.to_string()))
}

pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

/// Sub-second precision is kept only when present, so values written by
/// earlier runs compare equal after a round trip.
pub fn format_datetime(dt: NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format(DATETIME_FMT).to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

fn label(table: &str, column: &str) -> String {
    format!("{table}.{column}")
}

fn utf8(bytes: Vec<u8>, table: &str, column: &str) -> AppResult<String> {
    String::from_utf8(bytes)
        .map_err(|_| AppError::Conversion(label(table, column), "non-UTF-8 text".to_string()))
}

fn variant_name(value: &mysql::Value) -> &'static str {
    match value {
        mysql::Value::NULL => "null",
        mysql::Value::Bytes(_) => "bytes",
        mysql::Value::Int(_) => "int",
        mysql::Value::UInt(_) => "unsigned int",
        mysql::Value::Float(_) => "float",
        mysql::Value::Double(_) => "double",
        mysql::Value::Date(..) => "date",
        mysql::Value::Time(..) => "time",
    }
}

impl SqlValue {
    /// Convert one raw MySQL cell according to the declared column kind.
    ///
    /// The text protocol delivers every non-NULL cell as `Bytes`; the
    /// binary protocol delivers typed variants. Both are handled.
    pub fn from_mysql(
        kind: ColumnKind,
        value: mysql::Value,
        table: &str,
        column: &str,
    ) -> AppResult<Self> {
        use mysql::Value as My;

        let converted = match (kind, value) {
            (_, My::NULL) => SqlValue::Null,

            (ColumnKind::Integer, My::Int(n)) => SqlValue::Int(n),
            (ColumnKind::Integer, My::UInt(n)) => SqlValue::Int(i64::try_from(n).map_err(
                |_| AppError::Conversion(label(table, column), format!("integer overflow: {n}")),
            )?),
            (ColumnKind::Integer, My::Bytes(b)) => {
                let text = utf8(b, table, column)?;
                SqlValue::Int(text.trim().parse().map_err(|_| {
                    AppError::Conversion(label(table, column), format!("not an integer: {text}"))
                })?)
            }

            (ColumnKind::VarChar(_) | ColumnKind::Text, My::Bytes(b)) => {
                SqlValue::Text(utf8(b, table, column)?)
            }

            (ColumnKind::Date, My::Bytes(b)) => {
                SqlValue::Date(parse_date(&utf8(b, table, column)?)?)
            }
            (ColumnKind::Date, My::Date(y, m, d, ..)) => SqlValue::Date(
                NaiveDate::from_ymd_opt(i32::from(y), u32::from(m), u32::from(d))
                    .ok_or_else(|| AppError::InvalidDate(format!("{y:04}-{m:02}-{d:02}")))?,
            ),

            (ColumnKind::DateTime, My::Bytes(b)) => {
                SqlValue::DateTime(parse_datetime(&utf8(b, table, column)?)?)
            }
            (ColumnKind::DateTime, My::Date(y, m, d, h, mi, s, us)) => {
                let date = NaiveDate::from_ymd_opt(i32::from(y), u32::from(m), u32::from(d))
                    .ok_or_else(|| AppError::InvalidDate(format!("{y:04}-{m:02}-{d:02}")))?;
                let stamp = date
                    .and_hms_micro_opt(u32::from(h), u32::from(mi), u32::from(s), us)
                    .ok_or_else(|| {
                        AppError::InvalidDateTime(format!("{h:02}:{mi:02}:{s:02}.{us:06}"))
                    })?;
                SqlValue::DateTime(stamp)
            }

            (_, other) => {
                return Err(AppError::Conversion(
                    label(table, column),
                    format!("unexpected {} value", variant_name(&other)),
                ));
            }
        };

        Ok(converted)
    }

    /// Convert one cell of a SQLite row according to the declared kind.
    pub fn from_sqlite(row: &rusqlite::Row, idx: usize, kind: ColumnKind) -> AppResult<Self> {
        let converted = match kind {
            ColumnKind::Integer => row
                .get::<_, Option<i64>>(idx)?
                .map_or(SqlValue::Null, SqlValue::Int),
            ColumnKind::VarChar(_) | ColumnKind::Text => row
                .get::<_, Option<String>>(idx)?
                .map_or(SqlValue::Null, SqlValue::Text),
            ColumnKind::Date => match row.get::<_, Option<String>>(idx)? {
                Some(s) => SqlValue::Date(parse_date(&s)?),
                None => SqlValue::Null,
            },
            ColumnKind::DateTime => match row.get::<_, Option<String>>(idx)? {
                Some(s) => SqlValue::DateTime(parse_datetime(&s)?),
                None => SqlValue::Null,
            },
        };
        Ok(converted)
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Int(n) => ToSqlOutput::Owned(Value::Integer(*n)),
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SqlValue::Date(d) => ToSqlOutput::Owned(Value::Text(format_date(*d))),
            SqlValue::DateTime(dt) => ToSqlOutput::Owned(Value::Text(format_datetime(*dt))),
        })
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(v: NaiveDateTime) -> Self {
        SqlValue::DateTime(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}
