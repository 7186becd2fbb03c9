//! Schema model: tables and columns as reported by the database catalog.

use crate::error::AppError;
use crate::schema::classify;
use std::collections::BTreeMap;

/// How raw cell text and request values are interpreted for a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoercionKind {
    Integer,
    Float,
    Text,
}

impl CoercionKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, CoercionKind::Integer | CoercionKind::Float)
    }
}

#[derive(Clone, Debug)]
pub struct ColumnMetadata {
    pub name: String,
    /// Type as reported by the driver, e.g. `int(11)` or `varchar(255)`.
    pub raw_type: String,
    pub kind: CoercionKind,
    pub nullable: bool,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
}

impl ColumnMetadata {
    pub fn new(
        name: impl Into<String>,
        raw_type: impl Into<String>,
        nullable: bool,
        is_primary_key: bool,
        is_auto_increment: bool,
    ) -> Self {
        let raw_type = raw_type.into();
        ColumnMetadata {
            name: name.into(),
            kind: classify(&raw_type),
            raw_type,
            nullable,
            is_primary_key,
            is_auto_increment,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TableSchema {
    pub name: String,
    /// Columns in catalog order.
    pub columns: Vec<ColumnMetadata>,
    /// First column flagged as primary key, if any.
    pub primary_key: Option<String>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnMetadata>) -> Self {
        let primary_key = columns.iter().find(|c| c.is_primary_key).map(|c| c.name.clone());
        TableSchema {
            name: name.into(),
            columns,
            primary_key,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key column name, required by every id-based operation.
    pub fn require_primary_key(&self) -> Result<&str, AppError> {
        self.primary_key
            .as_deref()
            .ok_or_else(|| AppError::NoPrimaryKey(self.name.clone()))
    }
}

/// All discovered tables, keyed and ordered by name. Read-only once built.
#[derive(Clone, Debug, Default)]
pub struct SchemaModel {
    tables: BTreeMap<String, TableSchema>,
}

impl SchemaModel {
    pub fn new(tables: impl IntoIterator<Item = TableSchema>) -> Self {
        SchemaModel {
            tables: tables.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_primary_key_wins() {
        let t = TableSchema::new(
            "pairs",
            vec![
                ColumnMetadata::new("a", "int(11)", false, true, false),
                ColumnMetadata::new("b", "int(11)", false, true, false),
            ],
        );
        assert_eq!(t.primary_key.as_deref(), Some("a"));
        assert_eq!(t.require_primary_key().ok(), Some("a"));
    }

    #[test]
    fn keyless_table_rejects_id_operations() {
        let t = TableSchema::new("logs", vec![ColumnMetadata::new("msg", "text", true, false, false)]);
        assert!(t.primary_key.is_none());
        assert!(matches!(t.require_primary_key(), Err(AppError::NoPrimaryKey(name)) if name == "logs"));
    }

    #[test]
    fn kind_is_derived_once_from_raw_type() {
        let c = ColumnMetadata::new("price", "decimal(10,2)", true, false, false);
        assert_eq!(c.kind, CoercionKind::Float);
        assert!(c.kind.is_numeric());
    }

    #[test]
    fn table_names_are_sorted() {
        let model = SchemaModel::new(vec![
            TableSchema::new("users", vec![]),
            TableSchema::new("items", vec![]),
        ]);
        assert_eq!(model.table_names(), vec!["items", "users"]);
        assert!(model.table("users").is_some());
        assert!(model.table("nope").is_none());
    }
}
