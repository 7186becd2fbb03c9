//! Generic list/read/create/update/delete against any discovered table.

use crate::db::{Driver, Row, RowDecoder};
use crate::error::AppError;
use crate::schema::TableSchema;
use crate::service::{pagination, RequestValidator};
use crate::sql::{delete, insert, select_all, select_by_id, update};
use serde_json::{Map, Value};

pub struct TableService;

impl TableService {
    /// All rows decoded, then sliced by `limit`/`offset` (default 5 / 0).
    pub async fn list(
        driver: &dyn Driver,
        table: &TableSchema,
        limit: Option<&str>,
        offset: Option<&str>,
    ) -> Result<Vec<Row>, AppError> {
        let q = select_all(table);
        let result = driver.query(&q.sql, &q.params).await?;
        let rows = RowDecoder::new(result, Some(table)).collect::<Result<Vec<_>, _>>()?;
        let (limit, offset) = pagination::resolve(limit, offset, rows.len());
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    /// Fetch one row by primary key.
    pub async fn read(driver: &dyn Driver, table: &TableSchema, id: i64) -> Result<Option<Row>, AppError> {
        let q = select_by_id(table, id)?;
        let result = driver.query(&q.sql, &q.params).await?;
        RowDecoder::new(result, Some(table)).next().transpose()
    }

    /// Insert one row. Returns the server-assigned id.
    pub async fn create(driver: &dyn Driver, table: &TableSchema, body: &Map<String, Value>) -> Result<u64, AppError> {
        let assignments = RequestValidator::validate_for_insert(table, body)?;
        let q = insert(table, &assignments);
        let done = driver.execute(&q.sql, &q.params).await?;
        Ok(done.last_insert_id)
    }

    /// Update one row by id. Returns rows affected.
    pub async fn update(
        driver: &dyn Driver,
        table: &TableSchema,
        id: i64,
        body: &Map<String, Value>,
    ) -> Result<u64, AppError> {
        table.require_primary_key()?;
        let assignments = RequestValidator::validate_for_update(table, body)?;
        let Some(q) = update(table, id, &assignments)? else {
            return Ok(0);
        };
        let done = driver.execute(&q.sql, &q.params).await?;
        Ok(done.rows_affected)
    }

    /// Delete one row by id. Returns rows affected; a missing row is not an error.
    pub async fn delete(driver: &dyn Driver, table: &TableSchema, id: i64) -> Result<u64, AppError> {
        let q = delete(table, id)?;
        let done = driver.execute(&q.sql, &q.params).await?;
        Ok(done.rows_affected)
    }
}
