use crate::{dto::health::HealthResponse, state::SharedState};

/// Report liveness together with a few board figures.
pub fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(
        state.matches().snapshot().matches.len(),
        state.events().listeners(),
    )
}
