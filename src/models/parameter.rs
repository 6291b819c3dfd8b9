use crate::db::schema::{PARAMETERS, TableDef};
use crate::db::value::SqlValue;

/// Key/value setting of the catw application itself.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub parameter: String, // ⇔ parameters.parameter (VARCHAR(255) PK)
    pub value: String,     // ⇔ parameters.value (VARCHAR(255) NOT NULL)
}

impl Parameter {
    pub const TABLE: &'static TableDef = &PARAMETERS;

    pub fn new(parameter: &str, value: &str) -> Self {
        Self {
            parameter: parameter.to_string(),
            value: value.to_string(),
        }
    }

    pub fn values(&self) -> Vec<SqlValue> {
        vec![self.parameter.clone().into(), self.value.clone().into()]
    }
}
