pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /projects[/]       list, create
/// /projects/{id}     get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(project::router())
}
