//! Audio output devices the announcement player can drive.

#[cfg(feature = "speaker")]
pub mod speaker;
pub mod silent;

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::sync::oneshot;

/// Failure to start playing synthesized audio.
#[derive(Debug, Error)]
pub enum OutputError {
    /// No output device could be opened.
    #[error("audio device unavailable: {0}")]
    Device(String),
    /// The bytes are not in a format the device can decode.
    #[error("unsupported audio data: {0}")]
    Decode(String),
    /// The playback worker went away before reporting back.
    #[error("audio worker stopped before playback started")]
    WorkerGone,
}

/// Control over one utterance that is currently playing.
pub trait PlaybackHandle: Send {
    /// Halt the output without discarding the queued audio.
    fn pause(&self);
    /// Seek back to the start.
    fn rewind(&self);
}

/// An utterance that started playing.
pub struct StartedPlayback {
    /// Controls for the utterance; dropping it releases the output.
    pub handle: Box<dyn PlaybackHandle>,
    /// Resolves (or closes) once the utterance ends on its own or is released.
    pub finished: oneshot::Receiver<()>,
}

/// Something that can play audio bytes.
pub trait AudioOutput: Send + Sync {
    /// Start playing `audio` at `speed` (1.0 is the recorded pace).
    fn start(&self, audio: Vec<u8>, speed: f32)
    -> BoxFuture<'static, Result<StartedPlayback, OutputError>>;
}
