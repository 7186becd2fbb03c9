//! Database access boundary: runs parameterized SQL, returns text cells or an execution outcome.

mod decode;
mod mysql;

pub use decode::{RowDecoder, Row};
pub use mysql::{connect, MySqlDriver};

use crate::sql::SqlValue;
use async_trait::async_trait;

/// Result of a query with every cell normalized to nullable text.
#[derive(Clone, Debug, Default)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}

#[async_trait]
pub trait Driver: Send + Sync {
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<ResultSet, sqlx::Error>;

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<ExecOutcome, sqlx::Error>;

    /// Round-trip check that the database is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}
