//! Shared application state for all routes. The schema model is built once before serving.

use crate::db::Driver;
use crate::error::IntrospectionError;
use crate::schema::{discover, SchemaModel};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub driver: Arc<dyn Driver>,
    /// Read-only after startup; no lock needed.
    pub schema: Arc<SchemaModel>,
}

impl AppState {
    pub fn new(driver: Arc<dyn Driver>, schema: SchemaModel) -> Self {
        AppState {
            driver,
            schema: Arc::new(schema),
        }
    }

    /// Check the database answers, then discover the schema. Must finish before serving.
    pub async fn bootstrap(driver: Arc<dyn Driver>) -> Result<Self, IntrospectionError> {
        driver.ping().await?;
        let schema = discover(driver.as_ref()).await?;
        Ok(AppState::new(driver, schema))
    }
}
