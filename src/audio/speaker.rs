//! Speaker output through `rodio`.
//!
//! The output stream is not `Send`, so every utterance gets its own worker
//! thread that owns the stream and blocks until the sink drains. The async side
//! only ever holds the shared [`Sink`].

use std::{io::Cursor, sync::Arc, thread, time::Duration};

use futures::future::BoxFuture;
use rodio::{Decoder, OutputStream, Sink};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::audio::{AudioOutput, OutputError, PlaybackHandle, StartedPlayback};

/// Plays announcements on the host's default output device.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeakerOutput;

struct SinkHandle {
    sink: Arc<Sink>,
}

impl PlaybackHandle for SinkHandle {
    fn pause(&self) {
        self.sink.pause();
    }

    fn rewind(&self) {
        if let Err(err) = self.sink.try_seek(Duration::ZERO) {
            debug!(error = %err, "rewind not supported for this source");
        }
    }
}

impl Drop for SinkHandle {
    fn drop(&mut self) {
        // Empties the queue so the worker's `sleep_until_end` returns.
        self.sink.stop();
    }
}

impl AudioOutput for SpeakerOutput {
    fn start(
        &self,
        audio: Vec<u8>,
        speed: f32,
    ) -> BoxFuture<'static, Result<StartedPlayback, OutputError>> {
        Box::pin(async move {
            let (ready_tx, ready_rx) = oneshot::channel::<Result<Arc<Sink>, OutputError>>();
            let (done_tx, finished) = oneshot::channel();

            thread::spawn(move || {
                let (_stream, stream_handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(err) => {
                        let _ = ready_tx.send(Err(OutputError::Device(err.to_string())));
                        return;
                    }
                };
                let sink = match Sink::try_new(&stream_handle) {
                    Ok(sink) => Arc::new(sink),
                    Err(err) => {
                        let _ = ready_tx.send(Err(OutputError::Device(err.to_string())));
                        return;
                    }
                };
                let source = match Decoder::new(Cursor::new(audio)) {
                    Ok(source) => source,
                    Err(err) => {
                        let _ = ready_tx.send(Err(OutputError::Decode(err.to_string())));
                        return;
                    }
                };

                sink.set_speed(speed);
                sink.append(source);
                if ready_tx.send(Ok(Arc::clone(&sink))).is_err() {
                    warn!("playback requester went away; dropping utterance");
                    return;
                }

                sink.sleep_until_end();
                let _ = done_tx.send(());
            });

            let sink = ready_rx.await.map_err(|_| OutputError::WorkerGone)??;
            Ok(StartedPlayback {
                handle: Box::new(SinkHandle { sink }),
                finished,
            })
        })
    }
}
