//! Request validation against discovered column metadata.

use crate::error::AppError;
use crate::schema::{CoercionKind, ColumnMetadata, TableSchema};
use crate::sql::{FieldAssignment, SqlValue};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate an insert body. Unknown fields are ignored, auto-increment
    /// columns are never assigned, and omitted NOT NULL columns get a default
    /// (`0` for integer columns, `""` otherwise).
    pub fn validate_for_insert(
        table: &TableSchema,
        body: &Map<String, Value>,
    ) -> Result<Vec<FieldAssignment>, AppError> {
        let mut out = Vec::new();
        for column in &table.columns {
            if column.is_auto_increment {
                continue;
            }
            match body.get(&column.name) {
                Some(raw) => out.push(FieldAssignment::new(column.name.clone(), check_field(column, raw)?)),
                None if !column.nullable => out.push(FieldAssignment::new(column.name.clone(), default_for(column))),
                None => {}
            }
        }
        Ok(out)
    }

    /// Validate an update body. Any write to the primary key is rejected
    /// before type checks run; unknown and auto-increment fields are ignored.
    pub fn validate_for_update(
        table: &TableSchema,
        body: &Map<String, Value>,
    ) -> Result<Vec<FieldAssignment>, AppError> {
        if let Some(pk) = table.primary_key.as_deref() {
            if body.contains_key(pk) {
                return Err(AppError::ImmutableKey(pk.to_string()));
            }
        }
        let mut out = Vec::new();
        for column in &table.columns {
            if column.is_primary_key || column.is_auto_increment {
                continue;
            }
            if let Some(raw) = body.get(&column.name) {
                out.push(FieldAssignment::new(column.name.clone(), check_field(column, raw)?));
            }
        }
        Ok(out)
    }
}

fn check_field(column: &ColumnMetadata, raw: &Value) -> Result<SqlValue, AppError> {
    let mismatch = || AppError::TypeMismatch(column.name.clone());
    let value = SqlValue::from_json(raw).ok_or_else(mismatch)?;
    let ok = match &value {
        SqlValue::Null => column.nullable,
        SqlValue::Text(_) => !column.kind.is_numeric(),
        SqlValue::Integer(_) | SqlValue::Float(_) => column.kind.is_numeric(),
    };
    if ok {
        Ok(value)
    } else {
        Err(mismatch())
    }
}

fn default_for(column: &ColumnMetadata) -> SqlValue {
    match column.kind {
        CoercionKind::Integer => SqlValue::Integer(0),
        CoercionKind::Float | CoercionKind::Text => SqlValue::Text(String::new()),
    }
}
