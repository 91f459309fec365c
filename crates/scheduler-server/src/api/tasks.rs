use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use scheduler_core::error::CoreError;
use scheduler_core::models::{parse_task_id, CompletionResult, Task, TaskFilter, TaskInput};
use scheduler_core::repository::TaskRepository;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

impl IdParams {
    fn task_id(&self) -> Result<i64, CoreError> {
        parse_task_id(self.id.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

fn body(payload: Result<Json<TaskInput>, JsonRejection>) -> Result<TaskInput, ApiError> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let data = body(payload)?.normalize(state.today())?;
    let task = state.repo.add_task(data).await?;
    tracing::info!(id = task.id, date = %task.date, "task created");
    Ok((StatusCode::CREATED, Json(json!({ "id": task.id }))))
}

pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<TaskList>, ApiError> {
    let filter = TaskFilter::from_search(params.search.as_deref());
    let tasks = state.repo.find_tasks(&filter, state.task_list_limit).await?;
    Ok(Json(TaskList { tasks }))
}

pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdParams>,
) -> Result<Json<Task>, ApiError> {
    let id = params.task_id()?;
    let task = state
        .repo
        .find_task_by_id(id)
        .await?
        .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let task = body(payload)?.normalize_existing(state.today())?;
    let task = state.repo.update_task(task).await?;
    tracing::info!(id = task.id, date = %task.date, "task updated");
    Ok(Json(json!({})))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdParams>,
) -> Result<Json<Value>, ApiError> {
    let id = params.task_id()?;
    state.repo.delete_task(id).await?;
    tracing::info!(id, "task deleted");
    Ok(Json(json!({})))
}

pub async fn complete_task(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdParams>,
) -> Result<Json<Value>, ApiError> {
    let id = params.task_id()?;
    match state.repo.complete_task(id, state.today()).await? {
        CompletionResult::Deleted(task) => {
            tracing::info!(id = task.id, "one-off task done, removed");
        }
        CompletionResult::Rescheduled(task) => {
            tracing::info!(id = task.id, next = %task.date, "repeating task rescheduled");
        }
    }
    Ok(Json(json!({})))
}
