use std::collections::HashMap;

use axum::extract::{rejection::JsonRejection, Path, Query, State};
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde_json::Value;

use crate::application::todo_service::{ListOptions, TodoService};
use crate::domain::collection::SortOrder;
use crate::domain::todo::{Todo, TodoId};
use crate::domain::validate::{self, TodoFields, ValidationError};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route("/todos/:id", get(get_todo::<S>).patch(update_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

/// `GET /todos?position=asc|desc&completed=true|false`
async fn list_todos<S: TodoService>(
    State(state): State<AppState<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let position = params.get("position").map(|p| Value::String(p.clone()));
    let completed = params.get("completed").map(|c| query_bool(c));
    tracing::info!(?position, ?completed, "get");

    let mut errors = validate::position(position.as_ref());
    errors.extend(validate::completed(completed.as_ref()));
    ApiError::check(errors)?;

    let options = ListOptions {
        completed: completed.as_ref().and_then(Value::as_bool),
        order: position.as_ref().and_then(Value::as_str).and_then(SortOrder::from_directive),
    };
    let todos = state.service.list(options).await?;
    if todos.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(todos))
}

async fn get_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    tracing::info!(id = %raw_id, "get");
    ApiError::check(validate::id(Some(&Value::String(raw_id.clone()))))?;
    let id = to_id(&raw_id)?;
    state.service.get(id).await?.map(Json).ok_or(ApiError::NotFound)
}

async fn create_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    tracing::info!("post");
    let mut fields = todo_fields(body).map_err(|err| ApiError::BadRequest(vec![err]))?;
    fields.post = true;
    ApiError::check(validate::data(&fields))?;

    let input = fields
        .new_todo()
        .ok_or_else(|| anyhow::anyhow!("validated todo has no title"))?;
    let todo = state.service.create(input).await?;
    Ok(Json(todo))
}

async fn update_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    tracing::info!(id = %raw_id, "patch");
    let mut errors = validate::id(Some(&Value::String(raw_id.clone())));
    let fields = todo_fields(body);
    match &fields {
        Ok(fields) => errors.extend(validate::data(fields)),
        Err(err) => errors.push(err.clone()),
    }
    ApiError::check(errors)?;
    let fields = fields.map_err(|err| ApiError::BadRequest(vec![err]))?;

    let id = to_id(&raw_id)?;
    state.service.update(id, fields.changes()).await?.map(Json).ok_or(ApiError::NotFound)
}

async fn delete_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    tracing::info!(id = %raw_id, "delete");
    ApiError::check(validate::id(Some(&Value::String(raw_id.clone()))))?;
    let id = to_id(&raw_id)?;
    if state.service.delete(id).await? { Ok(StatusCode::NO_CONTENT) } else { Err(ApiError::NotFound) }
}

/// Query strings only carry text; `true`/`false` become booleans, anything else stays a string.
fn query_bool(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        other => Value::String(other.to_owned()),
    }
}

/// Digit strings too large for a row id cannot match any row.
fn to_id(raw: &str) -> Result<TodoId, ApiError> {
    raw.parse().map(TodoId).map_err(|_| ApiError::NotFound)
}

/// Accepts only a JSON object; arrays would otherwise map onto the fields by position.
fn todo_fields(body: Result<Json<Value>, JsonRejection>) -> Result<TodoFields, ValidationError> {
    let invalid = ValidationError::new("body", "request body must be a JSON object");
    let value = match body {
        Ok(Json(value)) if value.is_object() => value,
        Ok(Json(value)) => {
            tracing::debug!(%value, "body is not an object");
            return Err(invalid);
        }
        Err(rejection) => {
            tracing::debug!(%rejection, "rejected body");
            return Err(invalid);
        }
    };
    serde_json::from_value(value).map_err(|err| {
        tracing::debug!(%err, "unreadable body");
        invalid
    })
}
