use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{dto::sse::PlaybackEvent, services::playback_service, state::SharedState};

/// Announcement playback endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/playback", get(get_playback))
        .route("/playback/stop", post(stop_playback))
}

/// Report whether an announcement is in progress.
#[utoipa::path(
    get,
    path = "/playback",
    tag = "playback",
    responses((status = 200, description = "Playback state", body = PlaybackEvent))
)]
pub async fn get_playback(State(state): State<SharedState>) -> Json<PlaybackEvent> {
    Json(playback_service::playback_status(&state))
}

/// Silence the current announcement.
#[utoipa::path(
    post,
    path = "/playback/stop",
    tag = "playback",
    responses((status = 200, description = "Playback stopped", body = PlaybackEvent))
)]
pub async fn stop_playback(State(state): State<SharedState>) -> Json<PlaybackEvent> {
    Json(playback_service::stop(&state).await)
}
