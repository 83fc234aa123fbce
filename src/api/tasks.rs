//! Task endpoints.

use super::error::{ApiError, ApiResponse, FieldViolations};
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskLifecycleService, UpdateTaskRequest},
};
use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    routing::{get, patch, put},
};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;

const TITLE_LENGTH: (usize, usize) = (2, 250);
const DESCRIPTION_LENGTH: (usize, usize) = (5, 1000);

/// Shared handler state.
pub(super) type SharedService<R, C> = Arc<TaskLifecycleService<R, C>>;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Builds the `/api/tasks` routes.
pub(super) fn routes<R, C>() -> Router<SharedService<R, C>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/api/tasks",
            get(list_all::<R, C>).post(create_task::<R, C>),
        )
        .route("/api/tasks/new", get(list_new::<R, C>))
        .route("/api/tasks/completed", get(list_completed::<R, C>))
        .route(
            "/api/tasks/{id}",
            put(update_task::<R, C>).delete(delete_task::<R, C>),
        )
        .route("/api/tasks/{id}/done", patch(complete_task::<R, C>))
}

#[derive(Debug, Deserialize)]
struct CreateTaskPayload {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct UpdateTaskPayload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// GET /api/tasks
async fn list_all<R, C>(State(service): State<SharedService<R, C>>) -> ApiResult<Vec<Task>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(ApiResponse::data(service.list_all().await?)))
}

/// GET /api/tasks/new
async fn list_new<R, C>(State(service): State<SharedService<R, C>>) -> ApiResult<Vec<Task>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(ApiResponse::data(service.list_new().await?)))
}

/// GET /api/tasks/completed
async fn list_completed<R, C>(
    State(service): State<SharedService<R, C>>,
) -> ApiResult<Vec<Task>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(ApiResponse::data(service.list_completed().await?)))
}

/// POST /api/tasks
async fn create_task<R, C>(
    State(service): State<SharedService<R, C>>,
    payload: Result<Json<CreateTaskPayload>, JsonRejection>,
) -> ApiResult<Task>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let mut violations = FieldViolations::new();
    check_required(&mut violations, "title", &body.title, TITLE_LENGTH);
    check_required(
        &mut violations,
        "description",
        &body.description,
        DESCRIPTION_LENGTH,
    );
    if !violations.is_empty() {
        return Err(ApiError::Validation(violations));
    }

    let task = service
        .create(CreateTaskRequest::new(body.title, body.description))
        .await?;
    Ok(Json(ApiResponse::data(task)))
}

/// PUT /api/tasks/{id}
async fn update_task<R, C>(
    State(service): State<SharedService<R, C>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateTaskPayload>, JsonRejection>,
) -> ApiResult<Task>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Path(id) = path?;
    let Json(body) = payload?;
    let mut violations = FieldViolations::new();
    check_optional(&mut violations, "title", body.title.as_deref(), TITLE_LENGTH);
    check_optional(
        &mut violations,
        "description",
        body.description.as_deref(),
        DESCRIPTION_LENGTH,
    );
    let unknown_status = body
        .status
        .as_deref()
        .filter(|value| !value.is_empty())
        .is_some_and(|value| TaskStatus::try_from(value).is_err());
    if unknown_status {
        violations.entry("status").or_default().push(format!(
            "the status field must be one of: {}, {}",
            TaskStatus::New,
            TaskStatus::Completed
        ));
    }
    if !violations.is_empty() {
        return Err(ApiError::Validation(violations));
    }

    let mut request = UpdateTaskRequest::new(TaskId::new(id));
    if let Some(title) = body.title {
        request = request.with_title(title);
    }
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(status) = body.status {
        request = request.with_status(status);
    }

    let task = service.update(request).await?;
    Ok(Json(ApiResponse::data(task)))
}

/// PATCH /api/tasks/{id}/done
async fn complete_task<R, C>(
    State(service): State<SharedService<R, C>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Task>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Path(id) = path?;
    let task = service.complete(TaskId::new(id)).await?;
    Ok(Json(ApiResponse::data(task)))
}

/// DELETE /api/tasks/{id}
async fn delete_task<R, C>(
    State(service): State<SharedService<R, C>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<bool>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Path(id) = path?;
    service.delete(TaskId::new(id)).await?;
    Ok(Json(ApiResponse::data(true)))
}

fn check_required(
    violations: &mut FieldViolations,
    field: &'static str,
    value: &str,
    bounds: (usize, usize),
) {
    if value.is_empty() {
        violations
            .entry(field)
            .or_default()
            .push(format!("the {field} field is required"));
        return;
    }
    check_length(violations, field, value, bounds);
}

fn check_optional(
    violations: &mut FieldViolations,
    field: &'static str,
    value: Option<&str>,
    bounds: (usize, usize),
) {
    if let Some(present) = value.filter(|candidate| !candidate.is_empty()) {
        check_length(violations, field, present, bounds);
    }
}

fn check_length(
    violations: &mut FieldViolations,
    field: &'static str,
    value: &str,
    (min, max): (usize, usize),
) {
    let length = value.chars().count();
    if length < min || length > max {
        violations.entry(field).or_default().push(format!(
            "the {field} field must be between {min} and {max} characters"
        ));
    }
}
