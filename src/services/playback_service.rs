use crate::{dto::sse::PlaybackEvent, state::SharedState};

/// Whether an announcement is currently in progress.
pub fn playback_status(state: &SharedState) -> PlaybackEvent {
    PlaybackEvent {
        is_playing: state.player().is_playing(),
    }
}

/// Silence the current announcement.
pub async fn stop(state: &SharedState) -> PlaybackEvent {
    state.player().stop().await;
    playback_status(state)
}
