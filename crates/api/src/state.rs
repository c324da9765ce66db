use std::sync::Arc;

use crate::config::ServerConfig;
use crate::service::ProjectService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Project CRUD over the record store.
    pub projects: Arc<ProjectService>,
}
