use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::{
    clients::scrape::FetchError,
    services::{audio_player::PlaybackError, match_store::UnknownMatch, template::UnknownPlaceholder},
};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// The scraping service could not deliver matches.
    #[error("fetching matches failed: {0}")]
    Fetch(#[source] FetchError),
    /// The announcement could not be synthesized or played.
    #[error("{}", .0.operator_message())]
    Playback(#[source] PlaybackError),
}

impl From<FetchError> for ServiceError {
    fn from(err: FetchError) -> Self {
        ServiceError::Fetch(err)
    }
}

impl From<PlaybackError> for ServiceError {
    fn from(err: PlaybackError) -> Self {
        ServiceError::Playback(err)
    }
}

impl From<UnknownMatch> for ServiceError {
    fn from(err: UnknownMatch) -> Self {
        ServiceError::NotFound(err.to_string())
    }
}

impl From<UnknownPlaceholder> for ServiceError {
    fn from(err: UnknownPlaceholder) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// An upstream service (scraper, speech, audio) failed.
    #[error("bad gateway: {0}")]
    BadGateway(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            err @ (ServiceError::Fetch(_) | ServiceError::Playback(_)) => {
                AppError::BadGateway(err.to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use reqwest::StatusCode as UpstreamStatus;

    use super::*;

    #[tokio::test]
    async fn fetch_failures_map_to_bad_gateway() {
        let err: AppError = ServiceError::from(FetchError::Rejected {
            status: UpstreamStatus::INTERNAL_SERVER_ERROR,
            message: None,
        })
        .into();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            body,
            r#"{"message":"bad gateway: fetching matches failed: API error: 500"}"#
        );
    }

    #[test]
    fn unknown_match_maps_to_not_found() {
        let err: AppError = ServiceError::from(UnknownMatch(4)).into();
        assert!(matches!(err, AppError::NotFound(ref message) if message == "no match at position 4"));
    }
}
