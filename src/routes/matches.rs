use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::matches::{BoardSnapshot, FetchMatchesRequest},
    error::AppError,
    services::board_service,
    state::SharedState,
};

/// Routes reading and reloading the match board.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/matches", get(get_board))
        .route("/matches/fetch", post(fetch_matches))
}

/// Return the board with its banners and loading flag.
#[utoipa::path(
    get,
    path = "/matches",
    tag = "matches",
    responses(
        (status = 200, description = "Current board", body = BoardSnapshot)
    )
)]
pub async fn get_board(State(state): State<SharedState>) -> Json<BoardSnapshot> {
    Json(board_service::board(&state))
}

/// Scrape the tournament page and merge the result into the board.
#[utoipa::path(
    post,
    path = "/matches/fetch",
    tag = "matches",
    request_body = FetchMatchesRequest,
    responses(
        (status = 200, description = "Board after the fetch", body = BoardSnapshot),
        (status = 400, description = "Invalid URL"),
        (status = 502, description = "Scraping service failed")
    )
)]
pub async fn fetch_matches(
    State(state): State<SharedState>,
    Json(payload): Json<FetchMatchesRequest>,
) -> Result<Json<BoardSnapshot>, AppError> {
    payload.validate()?;
    Ok(Json(board_service::fetch_matches(&state, payload).await?))
}
