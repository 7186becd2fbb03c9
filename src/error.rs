//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Startup-only failure while reading the database catalog. Fatal.
#[derive(Error, Debug)]
pub enum IntrospectionError {
    #[error("catalog query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("table {table}: column description missing '{field}'")]
    MissingField { table: String, field: &'static str },
}

/// Startup-only failure while reading process settings. Fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("unknown table")]
    UnknownTable,
    #[error("record not found")]
    RecordNotFound,
    #[error("incorrect id")]
    IncorrectId,
    #[error("field {0} have invalid type")]
    TypeMismatch(String),
    /// Primary key columns are immutable once a row exists.
    #[error("field {0} have invalid type")]
    ImmutableKey(String),
    #[error("table {0} has no primary key")]
    NoPrimaryKey(String),
    #[error("invalid value in column {column}")]
    Decode { column: String, value: String },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownTable | AppError::RecordNotFound => StatusCode::NOT_FOUND,
            AppError::IncorrectId
            | AppError::TypeMismatch(_)
            | AppError::ImmutableKey(_)
            | AppError::NoPrimaryKey(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            // Constraint violations and truncation come from the request payload.
            AppError::Db(sqlx::Error::Database(_)) => StatusCode::BAD_REQUEST,
            AppError::Db(_) | AppError::Decode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Db(e) => {
                tracing::error!(error = %e, "query execution failed");
                "query execution failed".to_string()
            }
            AppError::Decode { column, value } => {
                tracing::error!(column = %column, value = %value, "cell does not match declared column type");
                self.to_string()
            }
            _ => self.to_string(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
