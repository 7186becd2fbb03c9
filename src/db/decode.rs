//! Turns text cells into typed row values using the table's coercion kinds.

use crate::db::ResultSet;
use crate::error::AppError;
use crate::schema::{CoercionKind, TableSchema};
use crate::sql::SqlValue;
use std::collections::BTreeMap;

/// One decoded row: every result column is present, null cells included.
pub type Row = BTreeMap<String, SqlValue>;

/// Lazy, single-pass decoder over a result set.
///
/// Without a table schema (catalog queries) every non-null cell stays text.
pub struct RowDecoder {
    columns: Vec<String>,
    kinds: Option<Vec<CoercionKind>>,
    rows: std::vec::IntoIter<Vec<Option<String>>>,
}

impl RowDecoder {
    pub fn new(result: ResultSet, table: Option<&TableSchema>) -> Self {
        // Result columns missing from the schema (aliases, expressions) stay text.
        let kinds = table.map(|t| {
            result
                .columns
                .iter()
                .map(|c| t.column(c).map(|m| m.kind).unwrap_or(CoercionKind::Text))
                .collect()
        });
        RowDecoder {
            columns: result.columns,
            kinds,
            rows: result.rows.into_iter(),
        }
    }

    fn decode_row(&self, cells: Vec<Option<String>>) -> Result<Row, AppError> {
        let mut row = Row::new();
        let mut cells = cells.into_iter();
        for (i, column) in self.columns.iter().enumerate() {
            // short rows still yield every column, as null
            let cell = cells.next().flatten();
            let kind = self
                .kinds
                .as_ref()
                .and_then(|k| k.get(i).copied())
                .unwrap_or(CoercionKind::Text);
            row.insert(column.clone(), decode_cell(column, cell, kind)?);
        }
        Ok(row)
    }
}

fn decode_cell(column: &str, cell: Option<String>, kind: CoercionKind) -> Result<SqlValue, AppError> {
    let Some(text) = cell else {
        return Ok(SqlValue::Null);
    };
    let invalid = |text: String| AppError::Decode {
        column: column.to_string(),
        value: text,
    };
    match kind {
        CoercionKind::Integer => match text.trim().parse::<i64>() {
            Ok(n) => Ok(SqlValue::Integer(n)),
            Err(_) => Err(invalid(text)),
        },
        CoercionKind::Float => match text.trim().parse::<f64>() {
            Ok(n) => Ok(SqlValue::Float(n)),
            Err(_) => Err(invalid(text)),
        },
        CoercionKind::Text => Ok(SqlValue::Text(text)),
    }
}

impl Iterator for RowDecoder {
    type Item = Result<Row, AppError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cells = self.rows.next()?;
        Some(self.decode_row(cells))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}
