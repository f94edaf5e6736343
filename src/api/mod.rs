use std::path::Path;

use axum::Json;
use axum::extract::Path as UrlPath;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::AppError;
use crate::models::{CreateTaskRequest, TaskId, TaskView, UpdateTaskRequest};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/test", get(test))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(state)
}

/// Full application: API routes, optional frontend bundle, CORS and
/// request tracing.
///
/// When `static_dir` is set, unmatched paths are served from it and fall
/// back to its `index.html` so client-side routes resolve.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = router(state);

    if let Some(dir) = static_dir {
        let frontend = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        app = app.fallback_service(frontend);
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(cors).layer(TraceLayer::new_for_http())
}

async fn health(State(state): State<AppState>) -> StatusCode {
    match state.tasks.health().await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            error!("health check failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn test() -> &'static str {
    "Backend is working!"
}

async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskView>>, AppError> {
    let tasks = state.tasks.list().await?;
    Ok(Json(tasks))
}

async fn get_task(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<TaskId>,
) -> Result<Json<TaskView>, AppError> {
    let task = state.tasks.get(id).await?;
    Ok(Json(task))
}

async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskView>), AppError> {
    let task = state.tasks.create(req).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<TaskId>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<TaskView>, AppError> {
    let task = state.tasks.update(id, req).await?;
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<TaskId>,
) -> Result<StatusCode, AppError> {
    state.tasks.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
