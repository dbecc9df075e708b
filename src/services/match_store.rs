use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use crate::{
    clients::scrape::{FetchError, MatchSource},
    dao::{
        models::{MATCH_CACHE_KEY, MatchCacheSnapshot},
        snapshot_store::SnapshotStore,
        storage::StorageError,
    },
    state::{matches::Match, reconcile::reconcile, status::StatusBoard},
};

/// The match list together with the page it was scraped from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    /// Tournament page the list was scraped from.
    pub url: String,
    /// Matches in scrape order.
    pub matches: Vec<Match>,
}

/// What a fetch request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// No tournament URL was known; nothing was requested.
    Skipped,
    /// The list was replaced with `count` reconciled matches.
    Loaded {
        /// Number of matches now on the board.
        count: usize,
    },
}

/// No match exists at the requested board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no match at position {0}")]
pub struct UnknownMatch(pub usize);

/// Owner of the match list and the only writer of its cached snapshot.
///
/// Readers get copies through [`MatchStore::snapshot`] or a watch receiver.
/// Every write sequence (merge, edit, persist) runs under one async gate so
/// concurrent requests never interleave half-applied lists.
pub struct MatchStore {
    snapshots: Arc<dyn SnapshotStore>,
    source: Arc<dyn MatchSource>,
    status: StatusBoard,
    board: watch::Sender<Board>,
    loading: watch::Sender<bool>,
    fetches_in_flight: AtomicUsize,
    write_gate: Mutex<()>,
}

/// Keeps the loading flag raised until the last overlapping fetch ends.
struct FetchInFlight<'a> {
    store: &'a MatchStore,
}

impl<'a> FetchInFlight<'a> {
    fn enter(store: &'a MatchStore) -> Self {
        store.publish_loading(|fetches| fetches.fetch_add(1, Ordering::SeqCst) + 1);
        Self { store }
    }
}

impl Drop for FetchInFlight<'_> {
    fn drop(&mut self) {
        self.store
            .publish_loading(|fetches| fetches.fetch_sub(1, Ordering::SeqCst) - 1);
    }
}

impl MatchStore {
    /// Empty store scraping `initial_url` until told otherwise.
    pub fn new(
        snapshots: Arc<dyn SnapshotStore>,
        source: Arc<dyn MatchSource>,
        status: StatusBoard,
        initial_url: String,
    ) -> Self {
        let (board, _rx) = watch::channel(Board {
            url: initial_url,
            matches: Vec::new(),
        });
        let (loading, _rx) = watch::channel(false);
        Self {
            snapshots,
            source,
            status,
            board,
            loading,
            fetches_in_flight: AtomicUsize::new(0),
            write_gate: Mutex::new(()),
        }
    }

    /// Copy of the current board.
    pub fn snapshot(&self) -> Board {
        self.board.borrow().clone()
    }

    /// Observe board replacements and edits.
    pub fn subscribe(&self) -> watch::Receiver<Board> {
        self.board.subscribe()
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Observe the loading flag.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Scrape the tournament page and merge the result into the board.
    ///
    /// `url`, when given, becomes the remembered page first. A blank page is a
    /// silent no-op and leaves the remembered page alone. Failures are shown on
    /// the status board and returned.
    pub async fn fetch_matches(&self, url: Option<String>) -> Result<FetchOutcome, FetchError> {
        let url = match url {
            Some(url) if url.trim().is_empty() => String::new(),
            Some(url) => {
                self.board.send_if_modified(|board| {
                    let changed = board.url != url;
                    board.url = url;
                    changed
                });
                self.board.borrow().url.clone()
            }
            None => self.board.borrow().url.clone(),
        };
        if url.trim().is_empty() {
            debug!("no tournament url; skipping fetch");
            return Ok(FetchOutcome::Skipped);
        }

        let _in_flight = FetchInFlight::enter(self);
        self.status.clear();
        self.fetch_and_merge(&url).await
    }

    /// Adjust the in-flight count and publish whether any fetch remains.
    fn publish_loading(&self, adjust: impl FnOnce(&AtomicUsize) -> usize) {
        // Counted under the channel lock so overlapping fetches publish in order.
        self.loading.send_if_modified(|loading| {
            let now = adjust(&self.fetches_in_flight) > 0;
            let changed = *loading != now;
            *loading = now;
            changed
        });
    }

    async fn fetch_and_merge(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        info!(%url, "fetching matches");
        let fetched = match self.source.fetch(url).await {
            Ok(fetched) => fetched,
            Err(err) => {
                warn!(%url, error = %err, "fetching matches failed");
                self.status.flash_error(format!("Fout: {err}"));
                return Err(err);
            }
        };

        let _gate = self.write_gate.lock().await;
        let previous = self.snapshot();
        let board = Board {
            url: url.to_string(),
            matches: reconcile(&previous.matches, fetched),
        };
        self.persist(&board).await;
        let count = board.matches.len();
        self.board.send_replace(board);

        info!(count, "matches loaded");
        self.status.flash_success(format!("{count} wedstrijden geladen!"));
        Ok(FetchOutcome::Loaded { count })
    }

    /// Restore the board from the cached snapshot. Returns the number of matches restored.
    ///
    /// A missing or unreadable snapshot leaves the board untouched.
    pub async fn load_cached_matches(&self) -> usize {
        let raw = match self.snapshots.load(MATCH_CACHE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no cached matches");
                return 0;
            }
            Err(err) => {
                warn!(error = %err, "failed to load cached matches");
                return 0;
            }
        };
        let snapshot: MatchCacheSnapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(source) => {
                let err = StorageError::Malformed {
                    key: MATCH_CACHE_KEY.to_string(),
                    source,
                };
                warn!(error = %err, "failed to load cached matches");
                return 0;
            }
        };

        let _gate = self.write_gate.lock().await;
        let count = snapshot.matches.len();
        self.board.send_modify(|board| {
            board.matches = snapshot.matches;
            if !snapshot.url.is_empty() {
                board.url = snapshot.url;
            }
        });

        info!(count, cached_at = %snapshot.timestamp, "restored cached matches");
        if count > 0 {
            self.status
                .flash_success(format!("{count} wedstrijden geladen uit cache"));
        }
        count
    }

    /// Write the current board to the snapshot store; failures are logged only.
    pub async fn save_cache_matches(&self) {
        let _gate = self.write_gate.lock().await;
        let board = self.snapshot();
        self.persist(&board).await;
    }

    /// Edit the match at `index` in place.
    ///
    /// The board is persisted and republished only when `edit` actually changed
    /// the match. Returns the closure's result and the match as it is now.
    pub async fn modify_match<R, F>(&self, index: usize, edit: F) -> Result<(R, Match), UnknownMatch>
    where
        F: FnOnce(&mut Match) -> R,
    {
        let _gate = self.write_gate.lock().await;
        let mut board = self.snapshot();
        let game = board.matches.get_mut(index).ok_or(UnknownMatch(index))?;

        let before = game.clone();
        let result = edit(game);
        let after = game.clone();

        if after != before {
            self.persist(&board).await;
            self.board.send_replace(board);
        }
        Ok((result, after))
    }

    async fn persist(&self, board: &Board) {
        let snapshot = MatchCacheSnapshot::capture(&board.url, &board.matches);
        let encoded = match serde_json::to_string(&snapshot) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "failed to encode match cache");
                return;
            }
        };
        match self.snapshots.store(MATCH_CACHE_KEY, encoded).await {
            Ok(()) => debug!(count = board.matches.len(), "match cache saved"),
            Err(err) => warn!(error = %err, "failed to save match cache"),
        }
    }
}
