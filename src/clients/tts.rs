use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{clients::error_message, config::VoiceSettings};

const SYNTHESIZE_PATH: &str = "/api";

/// Failure to obtain synthesized audio.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The speech service answered with a non-success status.
    #[error("API error: {} - {}", .status.as_u16(), .message.as_deref().unwrap_or("Unknown error"))]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
    /// The request never got an answer.
    #[error("speech service unreachable")]
    Send {
        #[source]
        source: reqwest::Error,
    },
    /// The audio body could not be read.
    #[error("failed to read synthesized audio")]
    Body {
        #[source]
        source: reqwest::Error,
    },
}

/// Turns announcement text into playable audio bytes.
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with the operator's `voice` settings.
    fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSettings,
    ) -> BoxFuture<'static, Result<Vec<u8>, SynthesisError>>;
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    api_key: &'a str,
    voice_id: &'a str,
}

/// [`SpeechSynthesizer`] backed by the speech service's HTTP API.
#[derive(Clone)]
pub struct HttpSpeechSynthesizer {
    client: Client,
    endpoint: Arc<str>,
}

impl HttpSpeechSynthesizer {
    /// Talk to the speech service under `base_url`.
    pub fn new(client: Client, base_url: &str) -> Self {
        let endpoint = format!("{}{SYNTHESIZE_PATH}", base_url.trim_end_matches('/'));
        Self {
            client,
            endpoint: Arc::from(endpoint),
        }
    }
}

impl SpeechSynthesizer for HttpSpeechSynthesizer {
    fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSettings,
    ) -> BoxFuture<'static, Result<Vec<u8>, SynthesisError>> {
        let request = self
            .client
            .post(self.endpoint.as_ref())
            .json(&SynthesizeRequest {
                text,
                api_key: &voice.api_key,
                voice_id: &voice.voice_id,
            });
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|source| SynthesisError::Send { source })?;

            let status = response.status();
            if !status.is_success() {
                let message = error_message(response).await;
                return Err(SynthesisError::Rejected { status, message });
            }

            let audio = response
                .bytes()
                .await
                .map_err(|source| SynthesisError::Body { source })?;
            debug!(bytes = audio.len(), "speech service answered");
            Ok(audio.to_vec())
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn voice() -> VoiceSettings {
        VoiceSettings {
            api_key: "sk-test".into(),
            voice_id: "JBFqnCBsd6RMkjVDRZzb".into(),
        }
    }

    #[tokio::test]
    async fn sends_text_key_and_voice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SYNTHESIZE_PATH))
            .and(body_json(json!({
                "text": "Terrein 3",
                "api_key": "sk-test",
                "voice_id": "JBFqnCBsd6RMkjVDRZzb"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x49, 0x44, 0x33]))
            .mount(&server)
            .await;

        let tts = HttpSpeechSynthesizer::new(Client::new(), &server.uri());
        let audio = tts.synthesize("Terrein 3", &voice()).await.unwrap();
        assert_eq!(audio, vec![0x49, 0x44, 0x33]);
    }

    #[tokio::test]
    async fn rejection_carries_status_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SYNTHESIZE_PATH))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "error": "No ElevenLabs API key configured" })),
            )
            .mount(&server)
            .await;

        let tts = HttpSpeechSynthesizer::new(Client::new(), &server.uri());
        let err = tts.synthesize("hallo", &voice()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error: 400 - No ElevenLabs API key configured"
        );
    }

    #[tokio::test]
    async fn unparsable_error_body_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SYNTHESIZE_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let tts = HttpSpeechSynthesizer::new(Client::new(), &server.uri());
        let err = tts.synthesize("hallo", &voice()).await.unwrap_err();
        assert_eq!(err.to_string(), "API error: 500 - Unknown error");
    }
}
