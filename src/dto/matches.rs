//! DTO definitions for the match board endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::{sse::StatusEvent, validation::validate_scrape_url},
    services::announcer::discipline_name,
    state::matches::{Match, Team, TeamSide},
};

/// One team as displayed on the board.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamSummary {
    /// Player names in scrape order.
    pub names: Vec<String>,
    /// Discipline code as scraped (`HD`, `GD`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    /// Spoken/display name of the discipline (`Heren Dubbel`, ...).
    pub discipline_name: String,
    /// Level label such as `Basis` or `A`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_label: Option<String>,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            names: team.names.clone(),
            discipline: team.discipline.as_ref().map(|d| d.code().to_string()),
            discipline_name: discipline_name(team.discipline.as_ref()).to_string(),
            level_label: team.level_label.clone(),
        }
    }
}

/// Board row for one match. `index` addresses the match in action routes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchSummary {
    /// Position on the board.
    pub index: usize,
    /// Identifier assigned by the tournament site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Match number shown in the schedule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_number: Option<String>,
    /// Scheduled start as scraped.
    pub time: String,
    /// Assigned court; absent while unassigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court: Option<u32>,
    /// How often the match has been called.
    pub call_count: u32,
    /// First listed team.
    pub team_a: TeamSummary,
    /// Second listed team.
    pub team_b: TeamSummary,
}

impl MatchSummary {
    /// Project a stored match at position `index`.
    pub fn from_match(index: usize, game: &Match) -> Self {
        Self {
            index,
            id: game.id.clone(),
            match_number: game.match_number.clone(),
            time: game.time.clone(),
            court: game.assigned_court(),
            call_count: game.call_count,
            team_a: TeamSummary::from(&game.team_a),
            team_b: TeamSummary::from(&game.team_b),
        }
    }

    /// Project a whole board in display order.
    pub fn list(matches: &[Match]) -> Vec<Self> {
        matches
            .iter()
            .enumerate()
            .map(|(index, game)| Self::from_match(index, game))
            .collect()
    }
}

/// Full board state returned by `GET /matches` and after a fetch.
#[derive(Debug, Serialize, ToSchema)]
pub struct BoardSnapshot {
    /// Tournament page the board is scraped from.
    pub url: String,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Banners currently shown.
    pub status: StatusEvent,
    /// Board rows in display order.
    pub matches: Vec<MatchSummary>,
}

/// Request to (re)load the board from the scraping service.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct FetchMatchesRequest {
    /// Tournament page to scrape. Defaults to the last used URL; blank skips the fetch.
    #[serde(default)]
    #[validate(custom(function = "validate_scrape_url"))]
    pub url: Option<String>,
}

/// Request to put a match on a court.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AssignCourtRequest {
    /// Court number, starting at 1.
    #[validate(range(min = 1))]
    pub court: u32,
}

/// Request to summon one team of a match again.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecallRequest {
    /// `A` or `B`.
    #[schema(value_type = String, example = "A")]
    pub team: TeamSide,
}

/// Result of an announcement action.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnnouncementResponse {
    /// Text handed to the speech service; absent when the action was a no-op.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// The match after the action.
    #[serde(rename = "match")]
    pub game: MatchSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch(url: &str) -> FetchMatchesRequest {
        FetchMatchesRequest {
            url: Some(url.into()),
        }
    }

    #[test]
    fn blank_fetch_url_passes_validation() {
        assert!(FetchMatchesRequest::default().validate().is_ok());
        assert!(fetch("").validate().is_ok());
        assert!(fetch("  ").validate().is_ok());
    }

    #[test]
    fn malformed_fetch_url_is_rejected() {
        assert!(fetch("toernooi").validate().is_err());
        assert!(fetch("https://www.toernooi.nl/tournament/x").validate().is_ok());
    }
}
