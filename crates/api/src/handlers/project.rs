//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_db::models::project::{CreateProject, ProjectRecord, UpdateProject};

use crate::error::AppResult;
use crate::response::MessageResponse;
use crate::state::AppState;
use crate::upload::ProjectForm;

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProjectRecord>>> {
    let projects = state.projects.list().await?;
    Ok(Json(projects))
}

/// POST /api/projects
///
/// Accepts `multipart/form-data` (with an optional `image` file) or JSON.
pub async fn create(
    State(state): State<AppState>,
    form: ProjectForm<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectRecord>)> {
    let project = state.projects.create(form.input, form.image).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProjectRecord>> {
    let project = state.projects.get(&id).await?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: ProjectForm<UpdateProject>,
) -> AppResult<Json<ProjectRecord>> {
    let project = state.projects.update(&id, form.input, form.image).await?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.projects.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Project deleted successfully",
    }))
}
