//! Task request handlers
//!
//! Thin pass-throughs from query parameters to the task store. Malformed
//! input is a 400; an unknown id on delete/toggle is a silent success.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::daemon::context::DaemonContext;
use crate::error::{Result, TaskpadError};
use crate::store::TaskRecord;

/// Query parameters for `/add`
#[derive(Debug, Default, Deserialize)]
pub struct AddParams {
    pub task: Option<String>,
}

/// Query parameters for `/delete` and `/toggle`
#[derive(Debug, Default, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

impl IntoResponse for TaskpadError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            return (StatusCode::BAD_REQUEST, self.to_string()).into_response();
        }
        log::error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
    }
}

/// Parse a task identifier from its query-string form.
///
/// Missing, empty, negative and non-numeric values are all client errors.
pub fn parse_id(raw: Option<&str>) -> Result<u64> {
    let raw = raw.ok_or_else(|| TaskpadError::InvalidInput("missing id".to_string()))?;
    raw.parse::<u64>()
        .map_err(|_| TaskpadError::InvalidInput(format!("invalid id: {:?}", raw)))
}

/// Handle /add - create a task from `task`
pub async fn handle_add(
    State(ctx): State<Arc<DaemonContext>>,
    Query(params): Query<AddParams>,
) -> Result<StatusCode> {
    let task = params
        .task
        .ok_or_else(|| TaskpadError::InvalidInput("missing task".to_string()))?;

    ctx.with_store(move |store| store.create(&task)).await?;
    Ok(StatusCode::OK)
}

/// Handle /delete - remove the task with `id`, if any
pub async fn handle_delete(
    State(ctx): State<Arc<DaemonContext>>,
    Query(params): Query<IdParams>,
) -> Result<StatusCode> {
    let id = parse_id(params.id.as_deref())?;
    ctx.with_store(move |store| store.delete(id)).await?;
    Ok(StatusCode::OK)
}

/// Handle /toggle - flip the done flag of the task with `id`, if any
pub async fn handle_toggle(
    State(ctx): State<Arc<DaemonContext>>,
    Query(params): Query<IdParams>,
) -> Result<StatusCode> {
    let id = parse_id(params.id.as_deref())?;
    ctx.with_store(move |store| store.toggle(id)).await?;
    Ok(StatusCode::OK)
}

/// Handle /list - all tasks as a JSON array
pub async fn handle_list(State(ctx): State<Arc<DaemonContext>>) -> Result<Json<Vec<TaskRecord>>> {
    Ok(Json(ctx.list().await?))
}
