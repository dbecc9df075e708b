use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Court Caller Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::board_stream,
        crate::routes::matches::get_board,
        crate::routes::matches::fetch_matches,
        crate::routes::announcements::assign_court,
        crate::routes::announcements::commence_match,
        crate::routes::announcements::recall_team,
        crate::routes::playback::get_playback,
        crate::routes::playback::stop_playback,
        crate::routes::settings::get_settings,
        crate::routes::settings::update_settings,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::matches::BoardSnapshot,
            crate::dto::matches::MatchSummary,
            crate::dto::matches::TeamSummary,
            crate::dto::matches::FetchMatchesRequest,
            crate::dto::matches::AssignCourtRequest,
            crate::dto::matches::RecallRequest,
            crate::dto::matches::AnnouncementResponse,
            crate::dto::settings::SettingsResponse,
            crate::dto::settings::TemplateSet,
            crate::dto::settings::TemplatesUpdate,
            crate::dto::settings::UpdateSettingsRequest,
            crate::dto::sse::Handshake,
            crate::dto::sse::MatchesChangedEvent,
            crate::dto::sse::LoadingEvent,
            crate::dto::sse::StatusEvent,
            crate::dto::sse::PlaybackEvent,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events stream"),
        (name = "matches", description = "Match board"),
        (name = "announcements", description = "Court calls and recalls"),
        (name = "playback", description = "Announcement playback"),
        (name = "settings", description = "Voice and template settings"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_board_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/healthcheck",
            "/sse/events",
            "/matches",
            "/matches/fetch",
            "/matches/{index}/court",
            "/matches/{index}/commence",
            "/matches/{index}/recall",
            "/playback",
            "/playback/stop",
            "/settings",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
