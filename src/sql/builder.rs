//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a discovered table.
//!
//! Table and column names come from the schema model only; client values are
//! always bound as parameters. The row id in UPDATE/DELETE is an already
//! parsed `i64` and is written into the statement text.

use crate::error::AppError;
use crate::schema::TableSchema;
use crate::sql::{FieldAssignment, SqlValue};

/// Quote identifier for MySQL (safe: only from the schema model).
fn quoted(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

/// Quote a table name for catalog statements issued before a model exists.
pub fn quote_identifier(s: &str) -> String {
    quoted(s)
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlValue) {
        self.params.push(v);
    }
}

/// SELECT every row. Pagination is applied by the caller after decoding.
pub fn select_all(table: &TableSchema) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT * FROM {}", quoted(&table.name));
    q
}

/// SELECT by primary key, id bound as the sole param.
pub fn select_by_id(table: &TableSchema, id: i64) -> Result<QueryBuf, AppError> {
    let pk = table.require_primary_key()?;
    let mut q = QueryBuf::new();
    q.push_param(SqlValue::Integer(id));
    q.sql = format!("SELECT * FROM {} WHERE {} = ?", quoted(&table.name), quoted(pk));
    Ok(q)
}

/// INSERT with one placeholder per assignment, params in column order.
/// The new key is read back from the execution result, not from a param.
pub fn insert(table: &TableSchema, assignments: &[FieldAssignment]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(assignments.len());
    let mut placeholders = Vec::with_capacity(assignments.len());
    for a in assignments {
        cols.push(quoted(&a.column));
        placeholders.push("?");
        q.push_param(a.value.clone());
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(&table.name),
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// UPDATE by id: SET only the validated assignments. Returns None when there is nothing to set.
pub fn update(
    table: &TableSchema,
    id: i64,
    assignments: &[FieldAssignment],
) -> Result<Option<QueryBuf>, AppError> {
    let pk = table.require_primary_key()?;
    if assignments.is_empty() {
        return Ok(None);
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(assignments.len());
    for a in assignments {
        sets.push(format!("{} = ?", quoted(&a.column)));
        q.push_param(a.value.clone());
    }
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        quoted(&table.name),
        sets.join(", "),
        quoted(pk),
        id
    );
    Ok(Some(q))
}

/// DELETE by id.
pub fn delete(table: &TableSchema, id: i64) -> Result<QueryBuf, AppError> {
    let pk = table.require_primary_key()?;
    let mut q = QueryBuf::new();
    q.sql = format!("DELETE FROM {} WHERE {} = {}", quoted(&table.name), quoted(pk), id);
    Ok(q)
}
