use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DefaultOnError, DisplayFromStr, PickFirst, serde_as};

/// Event category of a match, as encoded by the tournament software.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Discipline {
    /// Heren Enkel.
    MensSingles,
    /// Heren Dubbel.
    MensDoubles,
    /// Dames Enkel.
    WomensSingles,
    /// Dames Dubbel.
    WomensDoubles,
    /// Gemengd Dubbel.
    MixedDoubles,
    /// Any code the board does not know; kept verbatim.
    Other(String),
}

impl Discipline {
    /// Short code as sent by the scraper (`HE`, `HD`, ...).
    pub fn code(&self) -> &str {
        match self {
            Discipline::MensSingles => "HE",
            Discipline::MensDoubles => "HD",
            Discipline::WomensSingles => "DE",
            Discipline::WomensDoubles => "DD",
            Discipline::MixedDoubles => "GD",
            Discipline::Other(code) => code,
        }
    }

    /// Spoken Dutch name; unknown codes pass through unchanged.
    pub fn display_name(&self) -> &str {
        match self {
            Discipline::MensSingles => "Heren Enkel",
            Discipline::MensDoubles => "Heren Dubbel",
            Discipline::WomensSingles => "Dames Enkel",
            Discipline::WomensDoubles => "Dames Dubbel",
            Discipline::MixedDoubles => "Gemengd Dubbel",
            Discipline::Other(code) => code,
        }
    }
}

impl FromStr for Discipline {
    type Err = std::convert::Infallible;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Ok(match code {
            "HE" => Discipline::MensSingles,
            "HD" => Discipline::MensDoubles,
            "DE" => Discipline::WomensSingles,
            "DD" => Discipline::WomensDoubles,
            "GD" => Discipline::MixedDoubles,
            other => Discipline::Other(other.to_string()),
        })
    }
}

impl From<String> for Discipline {
    fn from(code: String) -> Self {
        match code.parse() {
            Ok(discipline) => discipline,
            Err(never) => match never {},
        }
    }
}

impl From<Discipline> for String {
    fn from(discipline: Discipline) -> Self {
        discipline.code().to_string()
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One side of a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Player names in roster order (empty, one for singles, two for doubles).
    #[serde(default)]
    pub names: Vec<String>,
    /// Event category; absent when the scraper could not tell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discipline: Option<Discipline>,
    /// Free-form level shown next to the discipline (e.g. `3-4`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_label: Option<String>,
}

impl Team {
    /// Names joined the way they are spoken, or `fallback` when the roster is empty.
    pub fn spoken_names(&self, fallback: &str) -> String {
        if self.names.is_empty() {
            fallback.to_string()
        } else {
            self.names.join(" en ")
        }
    }
}

/// Which team of a match an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamSide {
    /// The first listed team.
    A,
    /// The second listed team.
    B,
}

impl TeamSide {
    /// Placeholder spoken when the team has no known players.
    pub fn fallback_label(self) -> &'static str {
        match self {
            TeamSide::A => "Team A",
            TeamSide::B => "Team B",
        }
    }
}

/// A scheduled match as listed on the board.
///
/// The scraper owns most fields; the board only writes `court` and
/// `call_count`. Unknown fields are kept in `extra` so they survive
/// reconciliation and caching.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Scraper identifier; not guaranteed to be stable across fetches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display number of the match, when the scraper provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_number: Option<String>,
    /// Planned start time as displayed by the tournament software.
    #[serde(default)]
    pub time: String,
    /// Assigned court; the scraper sends `""` for "none yet".
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub court: Option<u32>,
    /// Number of times the teams were summoned to `court`.
    #[serde(default)]
    pub call_count: u32,
    /// First team.
    #[serde(default)]
    pub team_a: Team,
    /// Second team.
    #[serde(default)]
    pub team_b: Team,
    /// Fields the board does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Match {
    /// Court currently assigned, ignoring the `0` placeholder.
    pub fn assigned_court(&self) -> Option<u32> {
        self.court.filter(|court| *court > 0)
    }

    /// Team record for `side`.
    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::A => &self.team_a,
            TeamSide::B => &self.team_b,
        }
    }

    /// First listed player of team A, used as a fallback identity key.
    pub fn lead_player(&self) -> Option<&str> {
        self.team_a.names.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_scraper_payload_with_empty_court() {
        let raw = json!({
            "id": "10:00-HD-Alice-Bob",
            "matchNumber": "10:00",
            "time": "10:00",
            "court": "",
            "teamA": { "names": ["Alice", "Bob"], "discipline": "HD", "levelLabel": "3-4" },
            "teamB": { "names": ["Carol", "Dave"], "discipline": "HD", "levelLabel": "3-4" }
        });

        let parsed: Match = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.court, None);
        assert_eq!(parsed.call_count, 0);
        assert_eq!(parsed.team_a.discipline, Some(Discipline::MensDoubles));
        assert_eq!(parsed.match_number.as_deref(), Some("10:00"));
    }

    #[test]
    fn parses_numeric_and_string_courts() {
        let numeric: Match = serde_json::from_value(json!({ "time": "9:00", "court": 6 })).unwrap();
        let text: Match = serde_json::from_value(json!({ "time": "9:00", "court": "4" })).unwrap();
        assert_eq!(numeric.court, Some(6));
        assert_eq!(text.court, Some(4));
    }

    #[test]
    fn keeps_unknown_fields_and_codes() {
        let raw = json!({
            "time": "11:30",
            "round": "R16",
            "teamA": { "names": [], "discipline": "XD" }
        });

        let parsed: Match = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.extra.get("round"), Some(&json!("R16")));
        assert_eq!(
            parsed.team_a.discipline,
            Some(Discipline::Other("XD".into()))
        );

        let back = serde_json::to_value(&parsed).unwrap();
        assert_eq!(back["round"], json!("R16"));
        assert_eq!(back["teamA"]["discipline"], json!("XD"));
        assert_eq!(back["callCount"], json!(0));
    }

    #[test]
    fn spoken_names_fall_back_per_side() {
        let team = Team {
            names: vec!["Alice".into(), "Bob".into()],
            ..Team::default()
        };
        assert_eq!(team.spoken_names("Team A"), "Alice en Bob");
        assert_eq!(
            Team::default().spoken_names(TeamSide::B.fallback_label()),
            "Team B"
        );
    }

    #[test]
    fn zero_court_is_not_an_assignment() {
        let game = Match {
            court: Some(0),
            ..Match::default()
        };
        assert_eq!(game.assigned_court(), None);
    }
}
