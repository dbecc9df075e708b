use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::matches::MatchSummary;

#[derive(Clone, Debug)]
/// Dispatched payload carried across the SSE channel.
pub struct ServerEvent {
    /// SSE event name; `None` sends an unnamed message.
    pub event: Option<String>,
    /// JSON payload.
    pub data: String,
}

impl ServerEvent {
    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Initial metadata sent to an SSE client when it connects.
pub struct Handshake {
    /// Human-readable message confirming the subscription.
    pub message: String,
    /// Whether an announcement is currently being synthesized or played.
    pub is_playing: bool,
    /// Whether a match fetch is in flight.
    pub loading: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast whenever the match list or its source URL changes.
pub struct MatchesChangedEvent {
    /// Tournament page the board is scraped from.
    pub url: String,
    /// Board rows in display order.
    pub matches: Vec<MatchSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a match fetch starts or ends.
pub struct LoadingEvent {
    /// Whether a fetch is in flight.
    pub loading: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
/// Current transient banners; an empty string means "nothing to show".
pub struct StatusEvent {
    /// Success banner text.
    pub success: String,
    /// Error banner text.
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the announcement player becomes busy or idle.
pub struct PlaybackEvent {
    /// Whether an announcement is being synthesized or played.
    pub is_playing: bool,
}
