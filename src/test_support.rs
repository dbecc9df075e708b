//! Shared fakes for service and route tests.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use reqwest::StatusCode;

use crate::{
    audio::silent::SilentOutput,
    clients::{
        scrape::{FetchError, MatchSource},
        tts::{SpeechSynthesizer, SynthesisError},
    },
    config::{AppConfig, Templates, VoiceSettings},
    dao::snapshot_store::memory::MemorySnapshotStore,
    state::{
        AppState, Backends, SharedState,
        matches::{Discipline, Match, Team},
    },
};

/// Scraper that always answers with the same list.
pub struct FixedSource(pub Vec<Match>);

impl MatchSource for FixedSource {
    fn fetch(&self, _url: &str) -> BoxFuture<'static, Result<Vec<Match>, FetchError>> {
        let matches = self.0.clone();
        Box::pin(async move { Ok(matches) })
    }
}

/// Synthesizer that records what it was asked to say.
#[derive(Default)]
pub struct RecordingSynthesizer {
    pub spoken: Mutex<Vec<String>>,
    pub fail_with: Option<StatusCode>,
}

impl RecordingSynthesizer {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn synthesize(
        &self,
        text: &str,
        _voice: &VoiceSettings,
    ) -> BoxFuture<'static, Result<Vec<u8>, SynthesisError>> {
        self.spoken.lock().unwrap().push(text.to_string());
        let result = match self.fail_with {
            Some(status) => Err(SynthesisError::Rejected {
                status,
                message: Some("boom".into()),
            }),
            None => Ok(vec![0xFF, 0xF3]),
        };
        Box::pin(async move { result })
    }
}

/// Everything a test needs to poke at a running board.
pub struct Fixture {
    pub state: SharedState,
    pub snapshots: MemorySnapshotStore,
    pub synthesizer: Arc<RecordingSynthesizer>,
}

/// Templates that make assertions short.
pub fn terse_templates() -> Templates {
    Templates {
        assignment: "Terrein {court}: {discipline} {level}, {teamA} tegen {teamB}".into(),
        commencing: "Terrein {court} mag beginnen".into(),
        recall: "{callCount} oproep terrein {court}: {teamNames}".into(),
    }
}

/// Two scheduled doubles matches, neither on a court.
pub fn schedule() -> Vec<Match> {
    let team = |names: &[&str]| Team {
        names: names.iter().map(|name| name.to_string()).collect(),
        discipline: Some(Discipline::MensDoubles),
        level_label: Some("3-4".into()),
    };
    vec![
        Match {
            id: Some("m1".into()),
            time: "10:00".into(),
            team_a: team(&["Alice", "Bob"]),
            team_b: team(&["Carol", "Dave"]),
            ..Match::default()
        },
        Match {
            id: Some("m2".into()),
            time: "10:30".into(),
            team_a: team(&["Eve"]),
            team_b: Team::default(),
            ..Match::default()
        },
    ]
}

/// Board loaded with [`schedule`] through a regular fetch.
pub async fn fixture(synthesizer: RecordingSynthesizer) -> Fixture {
    let snapshots = MemorySnapshotStore::new();
    let synthesizer = Arc::new(synthesizer);
    let mut config = AppConfig {
        scrape_url: "https://example.org/t/1".into(),
        ..AppConfig::default()
    };
    config.settings.templates = terse_templates();

    let state = AppState::new(
        config,
        Backends {
            snapshots: Arc::new(snapshots.clone()),
            source: Arc::new(FixedSource(schedule())),
            synthesizer: synthesizer.clone(),
            output: Arc::new(SilentOutput),
        },
    );
    state.matches().fetch_matches(None).await.unwrap();

    Fixture {
        state,
        snapshots,
        synthesizer,
    }
}
