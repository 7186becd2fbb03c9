//! Table handlers: list tables, list/read/create/update/delete records.

use crate::error::AppError;
use crate::response::{created_id, success, DeletedBody, RecordBody, RecordsBody, TablesBody, UpdatedBody};
use crate::schema::TableSchema;
use crate::service::TableService;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Insert responses on key-less tables report the new id under this name.
const FALLBACK_ID_KEY: &str = "id";

fn lookup<'a>(state: &'a AppState, table: &str) -> Result<&'a TableSchema, AppError> {
    state.schema.table(table).ok_or(AppError::UnknownTable)
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::IncorrectId)
}

/// Empty body is an empty object; anything else must be a JSON object.
fn body_to_map(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice(body) {
        Ok(Value::Object(m)) => Ok(m),
        _ => Err(AppError::BadRequest("invalid json body".into())),
    }
}

pub async fn list_tables(State(state): State<AppState>) -> impl IntoResponse {
    let tables = state.schema.table_names().into_iter().map(String::from).collect();
    success(TablesBody { tables })
}

pub async fn list_records(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let table = lookup(&state, &table)?;
    let records = TableService::list(
        state.driver.as_ref(),
        table,
        params.get("limit").map(String::as_str),
        params.get("offset").map(String::as_str),
    )
    .await?;
    Ok(success(RecordsBody { records }))
}

pub async fn read_record(
    State(state): State<AppState>,
    Path((table, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let table = lookup(&state, &table)?;
    let id = parse_id(&id_str)?;
    let record = TableService::read(state.driver.as_ref(), table, id)
        .await?
        .ok_or(AppError::RecordNotFound)?;
    Ok(success(RecordBody { record }))
}

pub async fn create_record(
    State(state): State<AppState>,
    Path(table): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let table = lookup(&state, &table)?;
    let body = body_to_map(&body)?;
    let id = TableService::create(state.driver.as_ref(), table, &body).await?;
    let key = table.primary_key.as_deref().unwrap_or(FALLBACK_ID_KEY);
    Ok(success(created_id(key, id)))
}

pub async fn update_record(
    State(state): State<AppState>,
    Path((table, id_str)): Path<(String, String)>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let table = lookup(&state, &table)?;
    let body = body_to_map(&body)?;
    let updated = TableService::update(state.driver.as_ref(), table, id, &body).await?;
    Ok(success(UpdatedBody { updated }))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path((table, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let table = lookup(&state, &table)?;
    let deleted = TableService::delete(state.driver.as_ref(), table, id).await?;
    Ok(success(DeletedBody { deleted }))
}
