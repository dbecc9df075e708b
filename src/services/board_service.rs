use tracing::info;

use crate::{
    dto::matches::{BoardSnapshot, FetchMatchesRequest, MatchSummary},
    error::ServiceError,
    services::match_store::FetchOutcome,
    state::SharedState,
};

/// Current board as shown to the operator.
pub fn board(state: &SharedState) -> BoardSnapshot {
    let board = state.matches().snapshot();
    BoardSnapshot {
        url: board.url,
        loading: state.matches().is_loading(),
        status: state.status().current(),
        matches: MatchSummary::list(&board.matches),
    }
}

/// (Re)load the board from the scraping service.
pub async fn fetch_matches(
    state: &SharedState,
    request: FetchMatchesRequest,
) -> Result<BoardSnapshot, ServiceError> {
    match state.matches().fetch_matches(request.url).await? {
        FetchOutcome::Skipped => info!("fetch requested without a tournament url"),
        FetchOutcome::Loaded { count } => info!(count, "board reloaded"),
    }
    Ok(board(state))
}
