use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tasks_core::{parse_task_id, Completion, NewTask, Task, TaskPatch};

use crate::{error::ApiError, state::ApiState};

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub completed: Option<Completion>,
}

/// Absent or `null` fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub completed: Option<Completion>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// List every stored task
pub async fn list_tasks(State(state): State<ApiState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.repo.list_tasks().await?;
    Ok(Json(tasks))
}

/// Get a single task
pub async fn get_task(
    State(state): State<ApiState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&raw_id)?;

    match state.repo.get_task(id).await? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::NotFound),
    }
}

/// Create a task
pub async fn create_task(
    State(state): State<ApiState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(payload) = payload?;
    let new_task = NewTask::new(payload.title, payload.completed)?;

    let task = state.repo.create_task(new_task).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Partially update a task
pub async fn update_task(
    State(state): State<ApiState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&raw_id)?;
    let payload = update_payload(&headers, &body)?;
    let patch = TaskPatch::new(payload.title, payload.completed)?;

    match state.repo.update_task(id, patch).await? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::NotFound),
    }
}

/// A PUT without body and content type is an empty patch. Anything else must
/// be a JSON body.
fn update_payload(headers: &HeaderMap, body: &Bytes) -> Result<UpdateTaskRequest, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    match content_type {
        None if body.is_empty() => Ok(UpdateTaskRequest::default()),
        Some(ct) if ct.starts_with("application/json") => {
            let Json(payload) = Json::<UpdateTaskRequest>::from_bytes(body)?;
            Ok(payload)
        }
        _ => Err(ApiError::BadRequest(
            "Expected request with `Content-Type: application/json`".to_string(),
        )),
    }
}

/// Delete a task
pub async fn delete_task(
    State(state): State<ApiState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_task_id(&raw_id)?;

    if !state.repo.delete_task(id).await? {
        return Err(ApiError::NotFound);
    }

    Ok(Json(MessageResponse {
        message: "Task deleted".to_string(),
    }))
}
