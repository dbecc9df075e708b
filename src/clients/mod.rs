//! HTTP collaborators: the match scraper and the speech synthesizer.

/// Client for the match scraping endpoint.
pub mod scrape;
/// Client for the text-to-speech endpoint.
pub mod tts;

use serde::Deserialize;

/// Error payload both services return on failure.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Best-effort extraction of the service's `error` field.
async fn error_message(response: reqwest::Response) -> Option<String> {
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.is_empty())
}
