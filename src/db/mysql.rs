//! MySQL/MariaDB driver over an sqlx connection pool.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, Row, ValueRef};
use tracing::debug;

use crate::db::{Driver, ExecOutcome, ResultSet};
use crate::sql::SqlValue;

/// Connection pool timeout.
const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Open the shared pool, capped at `max_connections`.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(POOL_CONNECTION_TIMEOUT)
        .connect(database_url)
        .await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct MySqlDriver {
    pool: MySqlPool,
}

impl MySqlDriver {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Driver for MySqlDriver {
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<ResultSet, sqlx::Error> {
        debug!(sql = %sql, params = ?params, "query");
        let mut query = sqlx::query(sql);
        for p in params {
            query = query.bind(p.clone());
        }
        let rows = query.fetch_all(&self.pool).await?;
        let columns = rows
            .first()
            .map(|r| r.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();
        let rows = rows.iter().map(row_to_text).collect();
        Ok(ResultSet { columns, rows })
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<ExecOutcome, sqlx::Error> {
        debug!(sql = %sql, params = ?params, "execute");
        let mut query = sqlx::query(sql);
        for p in params {
            query = query.bind(p.clone());
        }
        let done = query.execute(&self.pool).await?;
        Ok(ExecOutcome {
            rows_affected: done.rows_affected(),
            last_insert_id: done.last_insert_id(),
        })
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

fn row_to_text(row: &MySqlRow) -> Vec<Option<String>> {
    (0..row.columns().len()).map(|i| cell_to_text(row, i)).collect()
}

/// Render one cell as text regardless of its wire type; typing happens in the decoder.
fn cell_to_text(row: &MySqlRow, idx: usize) -> Option<String> {
    let is_null: bool = row.try_get_raw(idx).map(|r| r.is_null()).unwrap_or(true);
    if is_null {
        return None;
    }
    if let Ok(v) = row.try_get::<i64, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(v) = row.try_get::<u64, _>(idx) {
        return Some(v.to_string());
    }
    // FLOAT before DOUBLE: f64 also accepts FLOAT and would widen the stored value.
    if let Ok(v) = row.try_get::<f32, _>(idx) {
        return Some(float_text(v));
    }
    if let Ok(v) = row.try_get::<f64, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(v) = row.try_get::<String, _>(idx) {
        return Some(v);
    }
    if let Ok(v) = row.try_get::<DateTime<Utc>, _>(idx) {
        return Some(v.format("%Y-%m-%d %H:%M:%S").to_string());
    }
    if let Ok(v) = row.try_get::<NaiveDateTime, _>(idx) {
        return Some(v.format("%Y-%m-%d %H:%M:%S").to_string());
    }
    if let Ok(v) = row.try_get::<NaiveDate, _>(idx) {
        return Some(v.format("%Y-%m-%d").to_string());
    }
    if let Ok(v) = row.try_get::<NaiveTime, _>(idx) {
        return Some(v.format("%H:%M:%S").to_string());
    }
    // DECIMAL and friends arrive as ASCII on the wire.
    if let Ok(v) = row.try_get_unchecked::<String, _>(idx) {
        return Some(v);
    }
    row.try_get_unchecked::<Vec<u8>, _>(idx)
        .ok()
        .map(|b| String::from_utf8_lossy(&b).into_owned())
}

/// Shortest text that reads back as the same single-precision value.
fn float_text(v: f32) -> String {
    v.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_cells_keep_stored_precision() {
        let stored = f32::from_le_bytes(0.1f32.to_le_bytes());
        assert_eq!(float_text(stored), "0.1");
        assert_eq!(float_text(-2.5), "-2.5");
        assert_eq!(float_text(3.0), "3");
        assert_eq!(float_text(stored).parse::<f32>().unwrap(), stored);
    }

    #[test]
    fn widened_float_would_not_round_trip() {
        let widened = (0.1f32 as f64).to_string();
        assert_ne!(widened, float_text(0.1));
    }
}
