use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, oneshot, watch};
use tracing::{debug, info, warn};

use crate::{
    audio::{AudioOutput, OutputError},
    clients::tts::{SpeechSynthesizer, SynthesisError},
    config::VoiceSettings,
    state::playback::{HandleId, PlaybackSlot, RequestId},
};

/// Announcements are played slightly slower than synthesized.
pub const PLAYBACK_SPEED: f32 = 0.9;

/// Why an announcement could not be played.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl PlaybackError {
    /// Banner text shown to the operator.
    pub fn operator_message(&self) -> String {
        format!("Fout bij afspelen: {self}")
    }
}

struct PlayerInner {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    output: Arc<dyn AudioOutput>,
    slot: Mutex<PlaybackSlot>,
    playing: watch::Sender<bool>,
}

impl PlayerInner {
    /// Run `change` on the slot and publish the resulting busy flag.
    async fn update<R>(&self, change: impl FnOnce(&mut PlaybackSlot) -> R) -> R {
        let mut slot = self.slot.lock().await;
        let result = change(&mut *slot);
        self.publish(&slot);
        result
    }

    fn publish(&self, slot: &PlaybackSlot) {
        let now = slot.is_playing();
        self.playing.send_if_modified(|playing| {
            let changed = *playing != now;
            *playing = now;
            changed
        });
    }

    /// Silence the slot, then start `audio` and install it.
    ///
    /// The slot lock is held across the output start so no other utterance
    /// can become audible in between.
    async fn start_exclusive(
        &self,
        request: RequestId,
        audio: Vec<u8>,
    ) -> Result<(HandleId, oneshot::Receiver<()>), OutputError> {
        let mut slot = self.slot.lock().await;
        slot.make_room();
        let started = self.output.start(audio, PLAYBACK_SPEED).await;
        let result = match started {
            Ok(started) => Ok((slot.install(request, started.handle), started.finished)),
            Err(err) => {
                slot.abandon(request);
                Err(err)
            }
        };
        self.publish(&slot);
        result
    }
}

/// Synthesizes announcement text and plays it, one utterance at a time.
#[derive(Clone)]
pub struct AudioPlayer {
    inner: Arc<PlayerInner>,
}

impl AudioPlayer {
    /// Player using `synthesizer` for speech and `output` for sound.
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, output: Arc<dyn AudioOutput>) -> Self {
        let (playing, _rx) = watch::channel(false);
        Self {
            inner: Arc::new(PlayerInner {
                synthesizer,
                output,
                slot: Mutex::new(PlaybackSlot::new()),
                playing,
            }),
        }
    }

    /// Whether an announcement is being synthesized or is audible.
    pub fn is_playing(&self) -> bool {
        *self.inner.playing.borrow()
    }

    /// Observe the busy flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.playing.subscribe()
    }

    /// Speak `text`, replacing whatever is currently playing.
    ///
    /// Returns once playback has started; the utterance finishes in the
    /// background. Blank text is ignored.
    pub async fn play_text(&self, text: &str, voice: &VoiceSettings) -> Result<(), PlaybackError> {
        if text.trim().is_empty() {
            return Ok(());
        }

        let request = self.inner.update(PlaybackSlot::begin).await;
        debug!(chars = text.len(), "synthesizing announcement");

        let audio = match self.inner.synthesizer.synthesize(text, voice).await {
            Ok(audio) => audio,
            Err(err) => {
                warn!(error = %err, "speech synthesis failed");
                self.inner.update(|slot| slot.abandon(request)).await;
                return Err(err.into());
            }
        };

        let (id, finished) = self
            .inner
            .start_exclusive(request, audio)
            .await
            .inspect_err(|err| warn!(error = %err, "audio output failed"))?;

        info!(%text, "announcement playing");
        self.watch_completion(id, finished);
        Ok(())
    }

    /// Silence the current announcement.
    pub async fn stop(&self) {
        self.inner.update(PlaybackSlot::stop).await;
        info!("announcement stopped");
    }

    fn watch_completion(&self, id: HandleId, finished: oneshot::Receiver<()>) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            // A closed channel means the output went away; treat it as the end.
            let _ = finished.await;
            if inner.update(|slot| slot.finish(id)).await {
                debug!("announcement finished");
            }
        });
    }
}
