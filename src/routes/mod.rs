use axum::Router;

use crate::state::SharedState;

pub mod announcements;
pub mod docs;
pub mod health;
pub mod matches;
pub mod playback;
pub mod settings;
pub mod sse;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(sse::router())
        .merge(matches::router())
        .merge(announcements::router())
        .merge(playback::router())
        .merge(settings::router());

    api_router.merge(docs::router()).with_state(state)
}
