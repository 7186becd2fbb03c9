//! Table routes. Path parameters carry the table name and row id; handlers resolve the table from the schema model.

use crate::handlers::table::{create_record, delete_record, list_records, list_tables, read_record, update_record};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};
use tower_http::limit::RequestBodyLimitLayer;

pub fn table_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_tables))
        .route("/:table", get(list_records))
        .route("/:table/", post(create_record).put(create_record))
        .route(
            "/:table/:id",
            get(read_record).post(update_record).put(update_record).delete(delete_record),
        )
        .with_state(state)
}

/// Full application: table routes with a request body cap.
pub fn app(state: AppState, body_limit: usize) -> Router {
    table_routes(state).layer(RequestBodyLimitLayer::new(body_limit))
}
