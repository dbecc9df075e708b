use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{clients::error_message, state::matches::Match};

const SCRAPE_PATH: &str = "/api/scrape-matches";

/// Failure to obtain a match list.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The scraper answered with a non-success status.
    #[error("{}", rejection_text(.status, .message.as_deref()))]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
    /// The request never got an answer.
    #[error("scrape service unreachable")]
    Send {
        #[source]
        source: reqwest::Error,
    },
    /// The answer was not a match list.
    #[error("invalid scrape service response")]
    Decode {
        #[source]
        source: reqwest::Error,
    },
}

fn rejection_text(status: &StatusCode, message: Option<&str>) -> String {
    match message {
        Some(message) => message.to_string(),
        None => format!("API error: {}", status.as_u16()),
    }
}

/// Source of scheduled matches for a tournament page.
pub trait MatchSource: Send + Sync {
    /// Scrape `url` and return its matches in schedule order.
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<Vec<Match>, FetchError>>;
}

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

/// [`MatchSource`] backed by the scraping service's HTTP API.
#[derive(Clone)]
pub struct HttpMatchSource {
    client: Client,
    endpoint: Arc<str>,
}

impl HttpMatchSource {
    /// Talk to the scraper under `base_url`.
    pub fn new(client: Client, base_url: &str) -> Self {
        let endpoint = format!("{}{SCRAPE_PATH}", base_url.trim_end_matches('/'));
        Self {
            client,
            endpoint: Arc::from(endpoint),
        }
    }
}

impl MatchSource for HttpMatchSource {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<Vec<Match>, FetchError>> {
        let request = self.client.post(self.endpoint.as_ref()).json(&ScrapeRequest { url });
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|source| FetchError::Send { source })?;

            let status = response.status();
            if !status.is_success() {
                let message = error_message(response).await;
                return Err(FetchError::Rejected { status, message });
            }

            let payload = response
                .json::<ScrapeResponse>()
                .await
                .map_err(|source| FetchError::Decode { source })?;
            debug!(count = payload.matches.len(), "scrape service answered");
            Ok(payload.matches)
        })
    }
}
