use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::state::matches::Match;

/// Key under which the board snapshot is stored.
pub const MATCH_CACHE_KEY: &str = "courtcaller_matches_cache";

/// Board contents as written to the snapshot store after every change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchCacheSnapshot {
    /// Matches with their operator edits.
    #[serde(default)]
    pub matches: Vec<Match>,
    /// Tournament page the matches were scraped from.
    #[serde(default)]
    pub url: String,
    /// RFC 3339 time of the write.
    #[serde(default)]
    pub timestamp: String,
}

impl MatchCacheSnapshot {
    /// Snapshot of `url` and `matches` stamped with the current UTC time.
    pub fn capture(url: &str, matches: &[Match]) -> Self {
        Self {
            matches: matches.to_vec(),
            url: url.to_string(),
            timestamp: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_else(|_| "invalid-timestamp".into()),
        }
    }
}
