//! Route definitions for the `/projects` resource.

use axum::routing::{get, MethodRouter};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes for the `/projects` resource, merged into the `/api` tree.
///
/// The collection answers with and without a trailing slash.
///
/// ```text
/// GET    /projects[/]     -> list
/// POST   /projects[/]     -> create
/// GET    /projects/{id}   -> get_by_id
/// PUT    /projects/{id}   -> update
/// DELETE /projects/{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", collection())
        .route("/projects/", collection())
        .route(
            "/projects/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
}

fn collection() -> MethodRouter<AppState> {
    get(project::list).post(project::create)
}
