//! Declarative description of the catw tables.
//!
//! Every table the tool touches is listed here once, as static metadata.
//! DDL for the replica and the SELECT/INSERT statements used by the copy
//! are all rendered from these descriptors, so adding a column is a
//! one-line change.

/// SQL flavor a statement is rendered for. Identifiers are always quoted
/// (`end` is a reserved word in both backends).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Mysql,
}

impl Dialect {
    pub fn quote(&self, ident: &str) -> String {
        match self {
            Dialect::Sqlite => format!("\"{ident}\""),
            Dialect::Mysql => format!("`{ident}`"),
        }
    }
}

/// Declared type of a column. Drives both the replica DDL and the
/// conversion of raw source values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    VarChar(u16),
    Text,
    Date,
    DateTime,
}

impl ColumnKind {
    pub fn sql_type(&self) -> String {
        match self {
            ColumnKind::Integer => "INTEGER".to_string(),
            ColumnKind::VarChar(n) => format!("VARCHAR({n})"),
            ColumnKind::Text => "TEXT".to_string(),
            ColumnKind::Date => "DATE".to_string(),
            ColumnKind::DateTime => "DATETIME".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub not_null: bool,
    pub primary_key: bool,
}

#[derive(Debug)]
pub struct ForeignKeyDef {
    pub column: &'static str,
    pub parent_table: &'static str,
    pub parent_column: &'static str,
}

#[derive(Debug)]
pub struct IndexDef {
    pub name: &'static str,
    pub column: &'static str,
    pub unique: bool,
}

#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    pub foreign_keys: &'static [ForeignKeyDef],
    pub indexes: &'static [IndexDef],
}

impl TableDef {
    /// CREATE TABLE statement for the replica. Primary keys are emitted
    /// as a table constraint so composite keys (timesheet) work too.
    pub fn create_sql(&self) -> String {
        let q = Dialect::Sqlite;

        let mut lines: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let mut line = format!("    {} {}", q.quote(c.name), c.kind.sql_type());
                if c.not_null {
                    line.push_str(" NOT NULL");
                }
                line
            })
            .collect();

        let pk: Vec<String> = self
            .columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| q.quote(c.name))
            .collect();
        if !pk.is_empty() {
            lines.push(format!("    PRIMARY KEY ({})", pk.join(", ")));
        }

        for fk in self.foreign_keys {
            lines.push(format!(
                "    FOREIGN KEY ({}) REFERENCES {} ({})",
                q.quote(fk.column),
                q.quote(fk.parent_table),
                q.quote(fk.parent_column)
            ));
        }

        format!("CREATE TABLE {} (\n{}\n)", q.quote(self.name), lines.join(",\n"))
    }

    /// CREATE INDEX statements for the replica, one per declared index.
    pub fn index_sql(&self) -> Vec<String> {
        let q = Dialect::Sqlite;
        self.indexes
            .iter()
            .map(|ix| {
                let unique = if ix.unique { "UNIQUE " } else { "" };
                format!(
                    "CREATE {}INDEX {} ON {} ({})",
                    unique,
                    q.quote(ix.name),
                    q.quote(self.name),
                    q.quote(ix.column)
                )
            })
            .collect()
    }

    /// Full-table SELECT with the columns in declaration order.
    pub fn select_sql(&self, dialect: Dialect) -> String {
        let cols: Vec<String> = self.columns.iter().map(|c| dialect.quote(c.name)).collect();
        format!("SELECT {} FROM {}", cols.join(", "), dialect.quote(self.name))
    }

    /// INSERT statement with one positional parameter per column.
    pub fn insert_sql(&self) -> String {
        let q = Dialect::Sqlite;
        let cols: Vec<String> = self.columns.iter().map(|c| q.quote(c.name)).collect();
        let params: Vec<String> = (1..=self.columns.len()).map(|i| format!("?{i}")).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            q.quote(self.name),
            cols.join(", "),
            params.join(", ")
        )
    }
}

pub static USERS: TableDef = TableDef {
    name: "users",
    columns: &[
        ColumnDef {
            name: "id",
            kind: ColumnKind::Integer,
            not_null: true,
            primary_key: true,
        },
        ColumnDef {
            name: "username",
            kind: ColumnKind::VarChar(10),
            not_null: false,
            primary_key: false,
        },
        ColumnDef {
            name: "password_hash",
            kind: ColumnKind::VarChar(256),
            not_null: false,
            primary_key: false,
        },
    ],
    foreign_keys: &[],
    indexes: &[IndexDef {
        name: "ix_users_username",
        column: "username",
        unique: true,
    }],
};

pub static PROJECTS: TableDef = TableDef {
    name: "projects",
    columns: &[
        ColumnDef {
            name: "project_id",
            kind: ColumnKind::Integer,
            not_null: true,
            primary_key: true,
        },
        ColumnDef {
            name: "wbs",
            kind: ColumnKind::VarChar(256),
            not_null: false,
            primary_key: false,
        },
        ColumnDef {
            name: "name",
            kind: ColumnKind::VarChar(256),
            not_null: false,
            primary_key: false,
        },
        ColumnDef {
            name: "start",
            kind: ColumnKind::Date,
            not_null: false,
            primary_key: false,
        },
        ColumnDef {
            name: "end",
            kind: ColumnKind::Date,
            not_null: false,
            primary_key: false,
        },
        ColumnDef {
            name: "entered",
            kind: ColumnKind::DateTime,
            not_null: false,
            primary_key: false,
        },
        ColumnDef {
            name: "status",
            kind: ColumnKind::VarChar(256),
            not_null: false,
            primary_key: false,
        },
        ColumnDef {
            name: "billable",
            kind: ColumnKind::VarChar(256),
            not_null: false,
            primary_key: false,
        },
        ColumnDef {
            name: "info",
            kind: ColumnKind::Text,
            not_null: false,
            primary_key: false,
        },
    ],
    foreign_keys: &[],
    indexes: &[],
};

pub static TIMESHEET: TableDef = TableDef {
    name: "timesheet",
    columns: &[
        ColumnDef {
            name: "project_id",
            kind: ColumnKind::Integer,
            not_null: true,
            primary_key: true,
        },
        ColumnDef {
            name: "datestring",
            kind: ColumnKind::Date,
            not_null: true,
            primary_key: true,
        },
        ColumnDef {
            name: "timestring",
            kind: ColumnKind::Integer,
            not_null: false,
            primary_key: false,
        },
    ],
    foreign_keys: &[ForeignKeyDef {
        column: "project_id",
        parent_table: "projects",
        parent_column: "project_id",
    }],
    indexes: &[],
};

pub static PARAMETERS: TableDef = TableDef {
    name: "parameters",
    columns: &[
        ColumnDef {
            name: "parameter",
            kind: ColumnKind::VarChar(255),
            not_null: true,
            primary_key: true,
        },
        ColumnDef {
            name: "value",
            kind: ColumnKind::VarChar(255),
            not_null: true,
            primary_key: false,
        },
    ],
    foreign_keys: &[],
    indexes: &[],
};

/// The full catw table set plus the order bulk copies must run in.
pub struct SchemaRegistry {
    tables: [&'static TableDef; 4],
    copy_order: [&'static TableDef; 3],
}

impl SchemaRegistry {
    /// The catw schema. `users` is created in the replica but never
    /// copied from the source; `projects` must be copied before
    /// `timesheet` so its foreign key has parents to point at.
    pub fn catw() -> Self {
        Self {
            tables: [&USERS, &PROJECTS, &TIMESHEET, &PARAMETERS],
            copy_order: [&PARAMETERS, &PROJECTS, &TIMESHEET],
        }
    }

    /// Every table of the replica schema, in creation order.
    pub fn tables(&self) -> &[&'static TableDef] {
        &self.tables
    }

    /// Tables `migrate` copies, parents before children.
    pub fn copy_order(&self) -> &[&'static TableDef] {
        &self.copy_order
    }
}
