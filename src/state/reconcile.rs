//! Merging of freshly scraped matches with the board's manual court assignments.

use crate::state::matches::Match;

/// Find the cached counterpart of `fresh`.
///
/// Ids are compared first, when both sides carry one. Otherwise the match is
/// recognised by its start time plus the first player of team A. That
/// fallback can pair two unrelated matches sharing a slot and a first name;
/// the tournament software gives nothing better to disambiguate with.
fn find_previous<'a>(previous: &'a [Match], fresh: &Match) -> Option<&'a Match> {
    if let Some(id) = fresh.id.as_deref() {
        if let Some(hit) = previous
            .iter()
            .find(|candidate| candidate.id.as_deref() == Some(id))
        {
            return Some(hit);
        }
    }

    previous
        .iter()
        .find(|candidate| candidate.time == fresh.time && candidate.lead_player() == fresh.lead_player())
}

/// Merge `fetched` into the previously known list.
///
/// The result has exactly one entry per fetched match, in fetched order.
/// A court the operator (or an earlier fetch) assigned wins over whatever the
/// scraper reports now, together with its call counter.
pub fn reconcile(previous: &[Match], fetched: Vec<Match>) -> Vec<Match> {
    fetched
        .into_iter()
        .map(|fresh| {
            let carried = find_previous(previous, &fresh)
                .and_then(|old| old.assigned_court().map(|court| (court, old.call_count)));

            match carried {
                Some((court, call_count)) => Match {
                    court: Some(court),
                    call_count: call_count.max(1),
                    ..fresh
                },
                None => {
                    let call_count = u32::from(fresh.assigned_court().is_some());
                    Match { call_count, ..fresh }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::matches::Team;

    fn game(id: Option<&str>, time: &str, lead: &[&str]) -> Match {
        Match {
            id: id.map(str::to_string),
            time: time.to_string(),
            team_a: Team {
                names: lead.iter().map(|name| name.to_string()).collect(),
                ..Team::default()
            },
            ..Match::default()
        }
    }

    #[test]
    fn id_match_keeps_assigned_court_and_count() {
        let mut cached = game(Some("m1"), "10:00", &["Alice"]);
        cached.court = Some(5);
        cached.call_count = 2;

        let mut fresh = game(Some("m1"), "10:15", &["Alice"]);
        fresh.court = Some(9);

        let merged = reconcile(&[cached], vec![fresh]);
        assert_eq!(merged[0].court, Some(5));
        assert_eq!(merged[0].call_count, 2);
        assert_eq!(merged[0].time, "10:15");
    }

    #[test]
    fn time_and_lead_player_match_without_ids() {
        let mut cached = game(None, "10:00", &["Alice", "Bob"]);
        cached.court = Some(3);
        cached.call_count = 1;

        let fresh = game(None, "10:00", &["Alice", "Carol"]);

        let merged = reconcile(&[cached], vec![fresh]);
        assert_eq!(merged[0].court, Some(3));
        assert_eq!(merged[0].team_a.names, vec!["Alice", "Carol"]);
    }

    #[test]
    fn different_ids_still_fall_back_to_time_and_lead_player() {
        let mut cached = game(Some("old"), "12:00", &["Dana"]);
        cached.court = Some(2);
        cached.call_count = 3;

        let merged = reconcile(&[cached], vec![game(Some("new"), "12:00", &["Dana"])]);
        assert_eq!(merged[0].court, Some(2));
        assert_eq!(merged[0].call_count, 3);
    }

    #[test]
    fn missing_previous_count_defaults_to_one() {
        let mut cached = game(Some("m1"), "10:00", &["Alice"]);
        cached.court = Some(4);

        let merged = reconcile(&[cached], vec![game(Some("m1"), "10:00", &["Alice"])]);
        assert_eq!(merged[0].call_count, 1);
    }

    #[test]
    fn new_match_without_court_starts_uncalled() {
        let merged = reconcile(&[], vec![game(Some("m9"), "14:00", &["Eve"])]);
        assert_eq!(merged[0].court, None);
        assert_eq!(merged[0].call_count, 0);
    }

    #[test]
    fn server_assigned_court_counts_as_first_call() {
        let mut fresh = game(Some("m9"), "14:00", &["Eve"]);
        fresh.court = Some(7);

        let merged = reconcile(&[], vec![fresh]);
        assert_eq!(merged[0].court, Some(7));
        assert_eq!(merged[0].call_count, 1);
    }

    #[test]
    fn previous_without_court_does_not_override() {
        let mut cached = game(Some("m1"), "10:00", &["Alice"]);
        cached.call_count = 4;

        let mut fresh = game(Some("m1"), "10:00", &["Alice"]);
        fresh.court = Some(8);

        let merged = reconcile(&[cached], vec![fresh]);
        assert_eq!(merged[0].court, Some(8));
        assert_eq!(merged[0].call_count, 1);
    }

    #[test]
    fn result_follows_fetched_order_and_drops_stale_entries() {
        let mut stale = game(Some("gone"), "08:00", &["Zed"]);
        stale.court = Some(1);
        let mut kept = game(Some("b"), "09:00", &["Bob"]);
        kept.court = Some(2);

        let merged = reconcile(
            &[stale, kept],
            vec![
                game(Some("c"), "09:30", &["Cas"]),
                game(Some("b"), "09:00", &["Bob"]),
            ],
        );

        let ids: Vec<_> = merged.iter().map(|m| m.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["c", "b"]);
        assert_eq!(merged[1].court, Some(2));
    }
}
