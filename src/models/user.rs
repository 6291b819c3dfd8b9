use crate::db::schema::{TableDef, USERS};
use crate::db::value::SqlValue;

/// Replica-local account. The table exists in every replica but is never
/// filled by `migrate`; rows are created by whatever sits on top.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,                       // ⇔ users.id (INTEGER PK)
    pub username: Option<String>,      // ⇔ users.username (VARCHAR(10), unique)
    pub password_hash: Option<String>, // ⇔ users.password_hash (VARCHAR(256))
}

impl User {
    pub const TABLE: &'static TableDef = &USERS;

    pub fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.username.clone().into(),
            self.password_hash.clone().into(),
        ]
    }
}
