//! Shared response bodies for API handlers.

use serde::Serialize;

/// Plain `{ "message": ... }` confirmation body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
