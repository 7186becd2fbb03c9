//! Standard response envelope: `{"response": ...}` on success.

use crate::db::Row;
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Serialize)]
pub struct TablesBody {
    pub tables: Vec<String>,
}

#[derive(Serialize)]
pub struct RecordsBody {
    pub records: Vec<Row>,
}

#[derive(Serialize)]
pub struct RecordBody {
    pub record: Row,
}

#[derive(Serialize)]
pub struct UpdatedBody {
    pub updated: u64,
}

#[derive(Serialize)]
pub struct DeletedBody {
    pub deleted: u64,
}

pub fn success<T: Serialize>(response: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::OK, Json(Envelope { response }))
}

/// `{"<key_column>": id}` for a freshly inserted row.
pub fn created_id(key_column: &str, id: u64) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert(key_column.to_string(), id.into());
    serde_json::Value::Object(body)
}
