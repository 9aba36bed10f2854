//! Explicit storage schema definitions.
//!
//! Each persisted entity declares a [`TableSchema`]: an ordered list of
//! [`Column`]s with their semantic type, nullability, uniqueness, primary key,
//! default and foreign-key reference. The storage layer renders DDL and insert
//! statements from these definitions; constraint enforcement is left to PostgreSQL.

use std::fmt;

/// Semantic column type, rendered in the PostgreSQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Varchar(u16),
    Boolean,
    Timestamp,
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SqlType::Text => write!(f, "TEXT"),
            SqlType::Varchar(len) => write!(f, "VARCHAR({})", len),
            SqlType::Boolean => write!(f, "BOOLEAN"),
            SqlType::Timestamp => write!(f, "TIMESTAMPTZ"),
        }
    }
}

/// Default applied by the database when an insert omits the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    Text(&'static str),
    Bool(bool),
    CurrentTimestamp,
}

impl fmt::Display for ColumnDefault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColumnDefault::Text(value) => write!(f, "'{}'", value.replace('\'', "''")),
            ColumnDefault::Bool(true) => write!(f, "TRUE"),
            ColumnDefault::Bool(false) => write!(f, "FALSE"),
            ColumnDefault::CurrentTimestamp => write!(f, "CURRENT_TIMESTAMP"),
        }
    }
}

/// A `REFERENCES table(column)` constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
    pub unique: bool,
    pub primary_key: bool,
    pub default: Option<ColumnDefault>,
    pub references: Option<ForeignKey>,
}

impl Column {
    /// A nullable column with no constraints.
    pub const fn new(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            nullable: true,
            unique: false,
            primary_key: false,
            default: None,
            references: None,
        }
    }

    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Primary keys are implicitly `NOT NULL`.
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub const fn default_to(mut self, value: ColumnDefault) -> Self {
        self.default = Some(value);
        self
    }

    pub const fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some(ForeignKey { table, column });
        self
    }

    /// Renders the column definition as it appears inside `CREATE TABLE`.
    pub fn definition(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type);
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        } else if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        if let Some(default) = self.default {
            sql.push_str(&format!(" DEFAULT {}", default));
        }
        if let Some(fk) = self.references {
            sql.push_str(&format!(" REFERENCES {}({})", fk.table, fk.column));
        }
        sql
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn create_table_sql(&self) -> String {
        let defs: Vec<String> = self.columns.iter().map(Column::definition).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.name,
            defs.join(",\n    ")
        )
    }

    /// Parameterised insert of every column in declaration order, returning the stored row.
    pub fn insert_sql(&self) -> String {
        let names = self.column_names().join(", ");
        let params: Vec<String> = (1..=self.columns.len()).map(|i| format!("${}", i)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            self.name,
            names,
            params.join(", "),
            names
        )
    }

    /// `SELECT` of every column, filtered on a single column.
    pub fn select_by_sql(&self, column: &str) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = $1",
            self.column_names().join(", "),
            self.name,
            column
        )
    }
}

/// A persisted record type with a declared schema and a string identity.
pub trait Entity {
    const SCHEMA: &'static TableSchema;

    fn id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WIDGETS: TableSchema = TableSchema {
        name: "widgets",
        columns: &[
            Column::new("id", SqlType::Text).primary_key(),
            Column::new("label", SqlType::Varchar(20)).not_null().unique(),
            Column::new("kind", SqlType::Varchar(10))
                .not_null()
                .default_to(ColumnDefault::Text("it's")),
            Column::new("owner_id", SqlType::Text)
                .not_null()
                .references("owners", "id"),
            Column::new("seen_at", SqlType::Timestamp),
        ],
    };

    #[test]
    fn test_create_table_sql() {
        assert_eq!(
            WIDGETS.create_table_sql(),
            "CREATE TABLE IF NOT EXISTS widgets (\n    \
             id TEXT PRIMARY KEY,\n    \
             label VARCHAR(20) NOT NULL UNIQUE,\n    \
             kind VARCHAR(10) NOT NULL DEFAULT 'it''s',\n    \
             owner_id TEXT NOT NULL REFERENCES owners(id),\n    \
             seen_at TIMESTAMPTZ\n)"
        );
    }

    #[test]
    fn test_insert_sql_binds_every_column_in_order() {
        assert_eq!(
            WIDGETS.insert_sql(),
            "INSERT INTO widgets (id, label, kind, owner_id, seen_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, label, kind, owner_id, seen_at"
        );
    }

    #[test]
    fn test_column_lookup() {
        let label = WIDGETS.column("label").unwrap();
        assert!(label.unique);
        assert!(!label.nullable);
        assert!(WIDGETS.column("missing").is_none());
        assert!(WIDGETS.column("id").unwrap().primary_key);
    }
}
