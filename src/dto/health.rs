use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok").
    pub status: String,
    /// Matches currently on the board.
    pub matches: usize,
    /// Connected SSE clients.
    pub listeners: usize,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(matches: usize, listeners: usize) -> Self {
        Self {
            status: "ok".to_string(),
            matches,
            listeners,
        }
    }
}
