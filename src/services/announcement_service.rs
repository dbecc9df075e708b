use tracing::info;

use crate::{
    config::VoiceSettings,
    dto::matches::{AnnouncementResponse, MatchSummary},
    error::ServiceError,
    services::announcer::AnnouncementBuilder,
    state::{
        SharedState,
        matches::{Match, TeamSide},
    },
};

/// Put match `index` on `court` and announce it.
pub async fn assign_court(
    state: &SharedState,
    index: usize,
    court: u32,
) -> Result<AnnouncementResponse, ServiceError> {
    if court == 0 {
        return Err(ServiceError::InvalidInput("court must be at least 1".into()));
    }

    let settings = state.settings().await;
    let builder = AnnouncementBuilder::new(&settings.templates);
    let (text, game) = state
        .matches()
        .modify_match(index, |game| builder.assign_court(game, court))
        .await?;
    info!(index, court, "court assigned");

    announce(state, &settings.voice, index, Some(text), game).await
}

/// Tell the teams on match `index`'s court to start.
pub async fn match_commencing(
    state: &SharedState,
    index: usize,
) -> Result<AnnouncementResponse, ServiceError> {
    let settings = state.settings().await;
    let builder = AnnouncementBuilder::new(&settings.templates);
    let (text, game) = state
        .matches()
        .modify_match(index, |game| builder.match_commencing(game))
        .await?;

    announce(state, &settings.voice, index, text, game).await
}

/// Summon one team of match `index` again.
pub async fn team_recall(
    state: &SharedState,
    index: usize,
    side: TeamSide,
) -> Result<AnnouncementResponse, ServiceError> {
    let settings = state.settings().await;
    let builder = AnnouncementBuilder::new(&settings.templates);
    let (text, game) = state
        .matches()
        .modify_match(index, |game| builder.team_recall(game, side))
        .await?;
    if text.is_some() {
        info!(index, ?side, call_count = game.call_count, "team recalled");
    }

    announce(state, &settings.voice, index, text, game).await
}

/// Play `text` when there is one. Match edits stay in place when playback fails.
async fn announce(
    state: &SharedState,
    voice: &VoiceSettings,
    index: usize,
    text: Option<String>,
    game: Match,
) -> Result<AnnouncementResponse, ServiceError> {
    if let Some(text) = text.as_deref() {
        if let Err(err) = state.player().play_text(text, voice).await {
            state.status().flash_error(err.operator_message());
            return Err(err.into());
        }
    }

    Ok(AnnouncementResponse {
        text,
        game: MatchSummary::from_match(index, &game),
    })
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::{
        dao::models::{MATCH_CACHE_KEY, MatchCacheSnapshot},
        test_support::{RecordingSynthesizer, fixture},
    };

    #[tokio::test]
    async fn assign_court_persists_and_speaks() {
        let fx = fixture(RecordingSynthesizer::default()).await;

        let response = assign_court(&fx.state, 0, 7).await.unwrap();

        assert_eq!(
            response.text.as_deref(),
            Some("Terrein 7: Heren Dubbel 3-4, Alice en Bob tegen Carol en Dave")
        );
        assert_eq!(response.game.court, Some(7));
        assert_eq!(response.game.call_count, 1);
        assert_eq!(fx.synthesizer.spoken(), vec![response.text.unwrap()]);

        let cached: MatchCacheSnapshot =
            serde_json::from_str(&fx.snapshots.get(MATCH_CACHE_KEY).unwrap()).unwrap();
        assert_eq!(cached.matches[0].court, Some(7));
    }

    #[tokio::test]
    async fn court_zero_is_rejected() {
        let fx = fixture(RecordingSynthesizer::default()).await;

        let err = assign_court(&fx.state, 0, 0).await.unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(fx.synthesizer.spoken().is_empty());
    }

    #[tokio::test]
    async fn unknown_index_is_not_found() {
        let fx = fixture(RecordingSynthesizer::default()).await;

        let err = match_commencing(&fx.state, 12).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn commencing_without_court_says_nothing() {
        let fx = fixture(RecordingSynthesizer::default()).await;

        let response = match_commencing(&fx.state, 1).await.unwrap();

        assert_eq!(response.text, None);
        assert!(fx.synthesizer.spoken().is_empty());
    }

    #[tokio::test]
    async fn recall_counts_up_and_names_the_team() {
        let fx = fixture(RecordingSynthesizer::default()).await;
        assign_court(&fx.state, 1, 4).await.unwrap();

        let first = team_recall(&fx.state, 1, TeamSide::B).await.unwrap();
        let second = team_recall(&fx.state, 1, TeamSide::A).await.unwrap();

        assert_eq!(first.text.as_deref(), Some("tweede oproep terrein 4: Team B"));
        assert_eq!(second.text.as_deref(), Some("derde oproep terrein 4: Eve"));
        assert_eq!(second.game.call_count, 3);
    }

    #[tokio::test]
    async fn playback_failure_flashes_banner_but_keeps_edit() {
        let fx = fixture(RecordingSynthesizer {
            fail_with: Some(StatusCode::INTERNAL_SERVER_ERROR),
            ..RecordingSynthesizer::default()
        })
        .await;

        let err = assign_court(&fx.state, 0, 2).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Fout bij afspelen: API error: 500 - boom"
        );
        assert_eq!(
            fx.state.status().current().error,
            "Fout bij afspelen: API error: 500 - boom"
        );
        assert_eq!(fx.state.matches().snapshot().matches[0].court, Some(2));
        assert!(!fx.state.player().is_playing());
    }
}
