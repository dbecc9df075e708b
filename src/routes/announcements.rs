use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use validator::Validate;

use crate::{
    dto::matches::{AnnouncementResponse, AssignCourtRequest, RecallRequest},
    error::AppError,
    services::announcement_service,
    state::SharedState,
};

/// Operator actions on a single match, addressed by its board position.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/matches/{index}/court", post(assign_court))
        .route("/matches/{index}/commence", post(commence_match))
        .route("/matches/{index}/recall", post(recall_team))
}

/// Assign a court to the match and announce it.
#[utoipa::path(
    post,
    path = "/matches/{index}/court",
    tag = "announcements",
    params(("index" = usize, Path, description = "Board position of the match")),
    request_body = AssignCourtRequest,
    responses(
        (status = 200, description = "Court assigned and announced", body = AnnouncementResponse),
        (status = 400, description = "Invalid court"),
        (status = 404, description = "No match at this position"),
        (status = 502, description = "Announcement could not be played")
    )
)]
pub async fn assign_court(
    State(state): State<SharedState>,
    Path(index): Path<usize>,
    Json(payload): Json<AssignCourtRequest>,
) -> Result<Json<AnnouncementResponse>, AppError> {
    payload.validate()?;
    let response = announcement_service::assign_court(&state, index, payload.court).await?;
    Ok(Json(response))
}

/// Announce that the match on its court may start.
#[utoipa::path(
    post,
    path = "/matches/{index}/commence",
    tag = "announcements",
    params(("index" = usize, Path, description = "Board position of the match")),
    responses(
        (status = 200, description = "Announced, or nothing to do without a court", body = AnnouncementResponse),
        (status = 404, description = "No match at this position"),
        (status = 502, description = "Announcement could not be played")
    )
)]
pub async fn commence_match(
    State(state): State<SharedState>,
    Path(index): Path<usize>,
) -> Result<Json<AnnouncementResponse>, AppError> {
    let response = announcement_service::match_commencing(&state, index).await?;
    Ok(Json(response))
}

/// Summon one team of the match again.
#[utoipa::path(
    post,
    path = "/matches/{index}/recall",
    tag = "announcements",
    params(("index" = usize, Path, description = "Board position of the match")),
    request_body = RecallRequest,
    responses(
        (status = 200, description = "Recall announced, or nothing to do without a court", body = AnnouncementResponse),
        (status = 404, description = "No match at this position"),
        (status = 502, description = "Announcement could not be played")
    )
)]
pub async fn recall_team(
    State(state): State<SharedState>,
    Path(index): Path<usize>,
    Json(payload): Json<RecallRequest>,
) -> Result<Json<AnnouncementResponse>, AppError> {
    let response = announcement_service::team_recall(&state, index, payload.team).await?;
    Ok(Json(response))
}
