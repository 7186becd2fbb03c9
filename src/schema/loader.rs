//! Discover tables and columns from the live database catalog, once, at startup.

use crate::db::{Driver, Row, RowDecoder};
use crate::error::IntrospectionError;
use crate::schema::{ColumnMetadata, SchemaModel, TableSchema};
use crate::sql::{quote_identifier, SqlValue};

const LIST_TABLES: &str = "SHOW TABLES";

/// Build the schema model: one `SHOW COLUMNS` per table listed by `SHOW TABLES`.
pub async fn discover(driver: &dyn Driver) -> Result<SchemaModel, IntrospectionError> {
    let listed = driver.query(LIST_TABLES, &[]).await?;
    let mut names = Vec::with_capacity(listed.rows.len());
    // Decoding without a schema keeps every cell as text and cannot fail.
    for row in RowDecoder::new(listed, None).filter_map(Result::ok) {
        // single-column result; the column label varies with the database name
        if let Some(SqlValue::Text(name)) = row.into_values().next() {
            names.push(name);
        }
    }

    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let table = describe(driver, &name).await?;
        if table.primary_key.is_none() {
            tracing::warn!("table {}: no primary key, id-based operations disabled", name);
        }
        tables.push(table);
    }

    let model = SchemaModel::new(tables);
    tracing::info!(tables = model.len(), "schema discovered");
    Ok(model)
}

async fn describe(driver: &dyn Driver, table: &str) -> Result<TableSchema, IntrospectionError> {
    let sql = format!("SHOW COLUMNS FROM {}", quote_identifier(table));
    let described = driver.query(&sql, &[]).await?;
    let mut columns = Vec::with_capacity(described.rows.len());
    for row in RowDecoder::new(described, None).filter_map(Result::ok) {
        columns.push(column_from_row(table, &row)?);
    }
    Ok(TableSchema::new(table, columns))
}

fn column_from_row(table: &str, row: &Row) -> Result<ColumnMetadata, IntrospectionError> {
    let required = |field: &'static str| {
        text(row, field).ok_or_else(|| IntrospectionError::MissingField {
            table: table.to_string(),
            field,
        })
    };
    let name = required("Field")?;
    let raw_type = required("Type")?;
    Ok(ColumnMetadata::new(
        name,
        raw_type,
        text(row, "Null") == Some("YES"),
        text(row, "Key") == Some("PRI"),
        text(row, "Extra") == Some("auto_increment"),
    ))
}

fn text<'a>(row: &'a Row, field: &str) -> Option<&'a str> {
    match row.get(field) {
        Some(SqlValue::Text(s)) => Some(s.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ExecOutcome, ResultSet};
    use crate::schema::CoercionKind;
    use crate::state::AppState;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct Catalog {
        results: HashMap<String, ResultSet>,
        reachable: bool,
    }

    #[async_trait]
    impl Driver for Catalog {
        async fn query(&self, sql: &str, _params: &[SqlValue]) -> Result<ResultSet, sqlx::Error> {
            self.results
                .get(sql)
                .cloned()
                .ok_or_else(|| sqlx::Error::Protocol(format!("unexpected query: {}", sql)))
        }

        async fn execute(&self, _sql: &str, _params: &[SqlValue]) -> Result<ExecOutcome, sqlx::Error> {
            Ok(ExecOutcome::default())
        }

        async fn ping(&self) -> Result<(), sqlx::Error> {
            if self.reachable {
                Ok(())
            } else {
                Err(sqlx::Error::PoolTimedOut)
            }
        }
    }

    fn rs(columns: &[&str], rows: &[&[Option<&str>]]) -> ResultSet {
        ResultSet {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.map(String::from)).collect())
                .collect(),
        }
    }

    const DESCRIBE: &[&str] = &["Field", "Type", "Null", "Key", "Default", "Extra"];

    fn catalog() -> Catalog {
        let mut results = HashMap::new();
        results.insert(
            "SHOW TABLES".to_string(),
            rs(&["Tables_in_shop"], &[&[Some("users")], &[Some("logs")]]),
        );
        results.insert(
            "SHOW COLUMNS FROM `users`".to_string(),
            rs(
                DESCRIBE,
                &[
                    &[Some("id"), Some("int(11)"), Some("NO"), Some("PRI"), None, Some("auto_increment")],
                    &[Some("name"), Some("varchar(255)"), Some("NO"), Some(""), None, Some("")],
                    &[Some("age"), Some("int(11)"), Some("YES"), Some(""), None, Some("")],
                ],
            ),
        );
        results.insert(
            "SHOW COLUMNS FROM `logs`".to_string(),
            rs(DESCRIBE, &[&[Some("msg"), Some("text"), Some("YES"), Some(""), None, Some("")]]),
        );
        Catalog {
            results,
            reachable: true,
        }
    }

    #[tokio::test]
    async fn builds_model_from_catalog() {
        let model = discover(&catalog()).await.unwrap();
        assert_eq!(model.table_names(), vec!["logs", "users"]);

        let users = model.table("users").unwrap();
        assert_eq!(users.primary_key.as_deref(), Some("id"));
        let id = users.column("id").unwrap();
        assert!(id.is_primary_key && id.is_auto_increment && !id.nullable);
        assert_eq!(id.kind, CoercionKind::Integer);
        let name = users.column("name").unwrap();
        assert_eq!(name.kind, CoercionKind::Text);
        assert!(!name.nullable && !name.is_primary_key && !name.is_auto_increment);
        assert!(users.column("age").unwrap().nullable);

        assert!(model.table("logs").unwrap().primary_key.is_none());
    }

    #[tokio::test]
    async fn catalog_query_failure_is_fatal() {
        let mut c = catalog();
        c.results.remove("SHOW COLUMNS FROM `logs`");
        assert!(matches!(discover(&c).await, Err(IntrospectionError::Query(_))));
    }

    #[tokio::test]
    async fn bootstrap_builds_state_from_catalog() {
        let state = AppState::bootstrap(Arc::new(catalog())).await.unwrap();
        assert_eq!(state.schema.table_names(), vec!["logs", "users"]);
    }

    #[tokio::test]
    async fn bootstrap_fails_when_database_unreachable() {
        let mut c = catalog();
        c.reachable = false;
        let err = AppState::bootstrap(Arc::new(c)).await.err().unwrap();
        assert!(matches!(err, IntrospectionError::Query(sqlx::Error::PoolTimedOut)));
    }

    #[tokio::test]
    async fn missing_type_is_rejected() {
        let mut c = catalog();
        c.results.insert(
            "SHOW COLUMNS FROM `logs`".to_string(),
            rs(DESCRIBE, &[&[Some("msg"), None, Some("YES"), Some(""), None, Some("")]]),
        );
        let err = discover(&c).await.unwrap_err();
        assert!(matches!(err, IntrospectionError::MissingField { field: "Type", .. }));
    }
}
