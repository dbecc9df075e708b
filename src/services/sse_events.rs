use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::warn;

use crate::{
    dto::{
        matches::MatchSummary,
        sse::{Handshake, LoadingEvent, MatchesChangedEvent, PlaybackEvent, ServerEvent, StatusEvent},
    },
    services::match_store::Board,
    state::{EventHub, SharedState},
};

const EVENT_MATCHES: &str = "matches";
const EVENT_LOADING: &str = "loading";
const EVENT_STATUS: &str = "status";
const EVENT_PLAYBACK: &str = "playback";
const EVENT_INFO: &str = "info";

/// Republish every board, loading, banner and playback change on the event hub.
///
/// The forwarders stop once the corresponding state is dropped.
pub fn spawn_forwarders(state: &SharedState) {
    forward(state.events(), state.matches().subscribe(), |hub, board| {
        broadcast_matches(hub, &board)
    });
    forward(state.events(), state.matches().subscribe_loading(), |hub, loading| {
        send_event(hub, EVENT_LOADING, &LoadingEvent { loading })
    });
    forward(state.events(), state.status().subscribe(), |hub, status| {
        send_event(hub, EVENT_STATUS, &status)
    });
    forward(state.events(), state.player().subscribe(), |hub, is_playing| {
        send_event(hub, EVENT_PLAYBACK, &PlaybackEvent { is_playing })
    });
}

fn forward<T>(hub: &Arc<EventHub>, mut updates: watch::Receiver<T>, publish: fn(&EventHub, T))
where
    T: Clone + Send + Sync + 'static,
{
    let hub = Arc::clone(hub);
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let value = updates.borrow_and_update().clone();
            publish(&hub, value);
        }
    });
}

/// Broadcast the whole board after it was replaced or edited.
pub fn broadcast_matches(hub: &EventHub, board: &Board) {
    let payload = MatchesChangedEvent {
        url: board.url.clone(),
        matches: MatchSummary::list(&board.matches),
    };
    send_event(hub, EVENT_MATCHES, &payload);
}

/// Events a freshly connected client needs to render the current state.
pub fn initial_events(state: &SharedState) -> Vec<ServerEvent> {
    let board = state.matches().snapshot();
    let handshake = Handshake {
        message: "board stream connected".to_string(),
        is_playing: state.player().is_playing(),
        loading: state.matches().is_loading(),
    };
    let matches = MatchesChangedEvent {
        url: board.url,
        matches: MatchSummary::list(&board.matches),
    };
    let status: StatusEvent = state.status().current();

    [
        encode(EVENT_INFO, &handshake),
        encode(EVENT_MATCHES, &matches),
        encode(EVENT_STATUS, &status),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn encode(event: &str, payload: &impl Serialize) -> Option<ServerEvent> {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => Some(event),
        Err(err) => {
            warn!(event, error = %err, "failed to serialize SSE payload");
            None
        }
    }
}

fn send_event(hub: &EventHub, event: &str, payload: &impl Serialize) {
    if let Some(event) = encode(event, payload) {
        hub.publish(event);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::test_support::{RecordingSynthesizer, fixture};

    #[tokio::test]
    async fn state_changes_reach_subscribers() {
        let fx = fixture(RecordingSynthesizer::default()).await;
        spawn_forwarders(&fx.state);
        let mut events = fx.state.events().subscribe();

        fx.state.status().flash_error("Fout: test");
        let event = events.recv().await.unwrap();
        assert_eq!(event.event.as_deref(), Some(EVENT_STATUS));
        let payload: Value = serde_json::from_str(&event.data).unwrap();
        assert_eq!(payload["error"], json!("Fout: test"));

        fx.state
            .matches()
            .modify_match(0, |game| game.court = Some(8))
            .await
            .unwrap();
        let event = events.recv().await.unwrap();
        assert_eq!(event.event.as_deref(), Some(EVENT_MATCHES));
        let payload: Value = serde_json::from_str(&event.data).unwrap();
        assert_eq!(payload["matches"][0]["court"], json!(8));
    }

    #[tokio::test]
    async fn new_clients_get_current_state_first() {
        let fx = fixture(RecordingSynthesizer::default()).await;

        let events = initial_events(&fx.state);
        let names: Vec<_> = events.iter().filter_map(|e| e.event.as_deref()).collect();
        assert_eq!(names, vec![EVENT_INFO, EVENT_MATCHES, EVENT_STATUS]);

        let status: Value = serde_json::from_str(&events[2].data).unwrap();
        assert_eq!(status["success"], json!("2 wedstrijden geladen!"));
    }
}
