pub mod matches;
pub mod playback;
pub mod reconcile;
mod sse;
pub mod status;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    audio::AudioOutput,
    clients::{scrape::MatchSource, tts::SpeechSynthesizer},
    config::{AppConfig, Settings},
    dao::snapshot_store::SnapshotStore,
    services::{audio_player::AudioPlayer, match_store::MatchStore},
};

pub use self::sse::EventHub;
use self::status::StatusBoard;

/// Handle to the state shared by all handlers.
pub type SharedState = Arc<AppState>;

/// Events buffered per SSE subscriber before it starts lagging.
pub const EVENT_BUFFER: usize = 32;

/// External collaborators the board talks to.
pub struct Backends {
    /// Where the board snapshot is persisted.
    pub snapshots: Arc<dyn SnapshotStore>,
    /// Scraping service delivering the schedule.
    pub source: Arc<dyn MatchSource>,
    /// Speech service turning text into audio.
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    /// Device the announcements are played on.
    pub output: Arc<dyn AudioOutput>,
}

/// Central application state shared by every request handler.
pub struct AppState {
    matches: MatchStore,
    player: AudioPlayer,
    status: StatusBoard,
    events: Arc<EventHub>,
    settings: RwLock<Settings>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The board starts empty; restoring the cached snapshot is up to the caller.
    pub fn new(config: AppConfig, backends: Backends) -> SharedState {
        let status = StatusBoard::new();
        let matches = MatchStore::new(
            backends.snapshots,
            backends.source,
            status.clone(),
            config.scrape_url,
        );
        let player = AudioPlayer::new(backends.synthesizer, backends.output);

        Arc::new(Self {
            matches,
            player,
            status,
            events: Arc::new(EventHub::new(EVENT_BUFFER)),
            settings: RwLock::new(config.settings),
        })
    }

    /// Owner of the match list.
    pub fn matches(&self) -> &MatchStore {
        &self.matches
    }

    /// Announcement player.
    pub fn player(&self) -> &AudioPlayer {
        &self.player
    }

    /// Transient operator banners.
    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    /// Broadcast hub feeding the SSE stream.
    pub fn events(&self) -> &Arc<EventHub> {
        &self.events
    }

    /// Copy of the current operator settings.
    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Run `change` on the operator settings while holding the write lock.
    pub async fn update_settings<R>(&self, change: impl FnOnce(&mut Settings) -> R) -> R {
        let mut guard = self.settings.write().await;
        change(&mut *guard)
    }
}
