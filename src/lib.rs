//! DB Explorer: a schema-driven JSON REST API over any MySQL database.

pub mod db;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;

pub use db::{connect, Driver, MySqlDriver};
pub use error::{AppError, ConfigError, IntrospectionError};
pub use routes::{app, table_routes};
pub use schema::{discover, SchemaModel};
pub use service::TableService;
pub use settings::Settings;
pub use state::AppState;
