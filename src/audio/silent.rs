use futures::future::BoxFuture;
use tokio::sync::oneshot;
use tracing::info;

use crate::audio::{AudioOutput, OutputError, PlaybackHandle, StartedPlayback};

/// Output for hosts without a sound card: logs the utterance and finishes at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentOutput;

struct SilentHandle;

impl PlaybackHandle for SilentHandle {
    fn pause(&self) {}

    fn rewind(&self) {}
}

impl AudioOutput for SilentOutput {
    fn start(
        &self,
        audio: Vec<u8>,
        speed: f32,
    ) -> BoxFuture<'static, Result<StartedPlayback, OutputError>> {
        Box::pin(async move {
            info!(bytes = audio.len(), speed, "no speaker attached; skipping audio");
            let (done, finished) = oneshot::channel();
            let _ = done.send(());
            Ok(StartedPlayback {
                handle: Box::new(SilentHandle),
                finished,
            })
        })
    }
}
