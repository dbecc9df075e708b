//! Turns operator actions on a match into announcement text.

use crate::{
    config::Templates,
    services::template::{self, Placeholder, TemplateKind},
    state::matches::{Discipline, Match, TeamSide},
};

/// Spoken when a match carries no discipline at all.
const UNKNOWN_DISCIPLINE: &str = "Onbekend";

/// Spoken name of a discipline code.
pub fn discipline_name(discipline: Option<&Discipline>) -> &str {
    discipline.map_or(UNKNOWN_DISCIPLINE, Discipline::display_name)
}

/// Dutch ordinal used in recall announcements ("tweede oproep").
pub fn call_ordinal(count: u32) -> String {
    match count {
        2 => "tweede".to_string(),
        3 => "derde".to_string(),
        4 => "vierde".to_string(),
        other => format!("{other}de"),
    }
}

/// Builds announcements from the operator's templates.
///
/// The builder only touches the match it is handed; persisting the change is
/// up to the owner of the match list.
pub struct AnnouncementBuilder<'a> {
    templates: &'a Templates,
}

impl<'a> AnnouncementBuilder<'a> {
    /// Use `templates` for every announcement built by this instance.
    pub fn new(templates: &'a Templates) -> Self {
        Self { templates }
    }

    /// Put `game` on `court`, restart its call counter and describe the match.
    pub fn assign_court(&self, game: &mut Match, court: u32) -> String {
        game.court = Some(court);
        game.call_count = 1;

        let team_a = game.team_a.spoken_names(TeamSide::A.fallback_label());
        let team_b = game.team_b.spoken_names(TeamSide::B.fallback_label());
        let discipline = discipline_name(game.team_a.discipline.as_ref());
        let level = game.team_a.level_label.as_deref().unwrap_or_default();

        template::render(
            TemplateKind::Assignment,
            &self.templates.assignment,
            |placeholder| match placeholder {
                Placeholder::Court => court.to_string(),
                Placeholder::Discipline => discipline.to_string(),
                Placeholder::Level => level.to_string(),
                Placeholder::TeamA => team_a.clone(),
                Placeholder::TeamB => team_b.clone(),
                _ => String::new(),
            },
        )
    }

    /// Ask the teams on `game`'s court to start playing; `None` without a court.
    pub fn match_commencing(&self, game: &Match) -> Option<String> {
        let court = game.assigned_court()?;
        Some(template::render(
            TemplateKind::Commencing,
            &self.templates.commencing,
            |_| court.to_string(),
        ))
    }

    /// Summon `side` once more; `None` (and no counting) without a court.
    pub fn team_recall(&self, game: &mut Match, side: TeamSide) -> Option<String> {
        let court = game.assigned_court()?;
        game.call_count = game.call_count.saturating_add(1);

        let ordinal = call_ordinal(game.call_count);
        let names = game.team(side).spoken_names(side.fallback_label());

        Some(template::render(
            TemplateKind::Recall,
            &self.templates.recall,
            |placeholder| match placeholder {
                Placeholder::CallCount => ordinal.clone(),
                Placeholder::Court => court.to_string(),
                Placeholder::TeamNames => names.clone(),
                _ => String::new(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::matches::Team;

    fn templates() -> Templates {
        Templates {
            assignment: "Terrein {court}: {discipline} {level}, {teamA} tegen {teamB}".into(),
            commencing: "Terrein {court} mag beginnen".into(),
            recall: "{callCount} oproep terrein {court}: {teamNames}".into(),
        }
    }

    fn doubles() -> Match {
        Match {
            time: "10:00".into(),
            team_a: Team {
                names: vec!["Alice".into(), "Bob".into()],
                discipline: Some(Discipline::MixedDoubles),
                level_label: Some("3-4".into()),
            },
            team_b: Team::default(),
            ..Match::default()
        }
    }

    #[test]
    fn assign_court_sets_state_and_renders() {
        let templates = templates();
        let builder = AnnouncementBuilder::new(&templates);
        let mut game = doubles();
        game.call_count = 3;

        let text = builder.assign_court(&mut game, 7);

        assert_eq!(game.court, Some(7));
        assert_eq!(game.call_count, 1);
        assert_eq!(
            text,
            "Terrein 7: Gemengd Dubbel 3-4, Alice en Bob tegen Team B"
        );
    }

    #[test]
    fn assignment_handles_unknown_and_missing_disciplines() {
        let templates = Templates {
            assignment: "{discipline}|{level}".into(),
            ..self::templates()
        };
        let builder = AnnouncementBuilder::new(&templates);

        let mut unknown = doubles();
        unknown.team_a.discipline = Some(Discipline::Other("XD".into()));
        unknown.team_a.level_label = None;
        assert_eq!(builder.assign_court(&mut unknown, 1), "XD|");

        let mut missing = doubles();
        missing.team_a.discipline = None;
        assert_eq!(builder.assign_court(&mut missing, 1), "Onbekend|3-4");
    }

    #[test]
    fn commencing_requires_a_court() {
        let templates = templates();
        let builder = AnnouncementBuilder::new(&templates);
        let mut game = doubles();
        assert_eq!(builder.match_commencing(&game), None);

        game.court = Some(2);
        game.call_count = 1;
        assert_eq!(
            builder.match_commencing(&game).as_deref(),
            Some("Terrein 2 mag beginnen")
        );
        assert_eq!(game.call_count, 1);
    }

    #[test]
    fn recall_counts_up_with_dutch_ordinals() {
        let templates = Templates {
            recall: "{callCount}".into(),
            ..self::templates()
        };
        let builder = AnnouncementBuilder::new(&templates);
        let mut game = doubles();
        builder.assign_court(&mut game, 4);

        let spoken: Vec<_> = (0..4)
            .filter_map(|_| builder.team_recall(&mut game, TeamSide::A))
            .collect();

        assert_eq!(spoken, vec!["tweede", "derde", "vierde", "5de"]);
        assert_eq!(game.call_count, 5);
    }

    #[test]
    fn recall_count_stops_at_its_ceiling() {
        let templates = Templates {
            recall: "{callCount}".into(),
            ..self::templates()
        };
        let builder = AnnouncementBuilder::new(&templates);
        let mut game = doubles();
        builder.assign_court(&mut game, 2);
        game.call_count = u32::MAX;

        let spoken = builder.team_recall(&mut game, TeamSide::A);

        assert_eq!(spoken, Some(format!("{}de", u32::MAX)));
        assert_eq!(game.call_count, u32::MAX);
    }

    #[test]
    fn recall_without_court_is_a_no_op() {
        let templates = templates();
        let builder = AnnouncementBuilder::new(&templates);
        let mut game = doubles();

        assert_eq!(builder.team_recall(&mut game, TeamSide::B), None);
        assert_eq!(game.call_count, 0);
    }

    #[test]
    fn recall_names_the_requested_team() {
        let templates = templates();
        let builder = AnnouncementBuilder::new(&templates);
        let mut game = doubles();
        game.court = Some(6);
        game.call_count = 1;

        let text = builder.team_recall(&mut game, TeamSide::B).unwrap();
        assert_eq!(text, "tweede oproep terrein 6: Team B");

        let text = builder.team_recall(&mut game, TeamSide::A).unwrap();
        assert_eq!(text, "derde oproep terrein 6: Alice en Bob");
    }
}
