use std::collections::BTreeSet;

use crate::audio::PlaybackHandle;

/// Whether the announcement player is busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Nothing requested and nothing audible.
    Idle,
    /// A request is being synthesized or an utterance is audible.
    Playing,
}

/// Identifies one call to play text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(u64);

/// Identifies one utterance handed to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleId(u64);

/// Single-slot bookkeeping for announcement playback.
///
/// At most one handle is held. Requests are tracked until they either install
/// a handle or are abandoned; the slot reports [`PlaybackPhase::Playing`] while
/// any request is outstanding or a handle is held. Whichever request installs
/// last owns the slot, so a completion for an older handle is ignored.
#[derive(Default)]
pub struct PlaybackSlot {
    latest_request: u64,
    pending: BTreeSet<RequestId>,
    next_handle: u64,
    active: Option<(HandleId, Box<dyn PlaybackHandle>)>,
}

impl PlaybackSlot {
    /// Empty, idle slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> PlaybackPhase {
        if self.active.is_some() || !self.pending.is_empty() {
            PlaybackPhase::Playing
        } else {
            PlaybackPhase::Idle
        }
    }

    /// Shorthand for `phase() == Playing`.
    pub fn is_playing(&self) -> bool {
        self.phase() == PlaybackPhase::Playing
    }

    /// Register a new play request; the slot turns busy immediately.
    pub fn begin(&mut self) -> RequestId {
        self.latest_request += 1;
        let request = RequestId(self.latest_request);
        self.pending.insert(request);
        request
    }

    /// Forget a request that failed before producing audio.
    ///
    /// When it was the most recent request the current utterance is silenced
    /// too, so the slot never reports an utterance the operator did not ask
    /// for last.
    pub fn abandon(&mut self, request: RequestId) {
        self.pending.remove(&request);
        if request.0 == self.latest_request {
            self.release_active();
        }
    }

    /// Silence the current utterance ahead of starting a new one.
    ///
    /// Pending requests are kept, so the slot keeps reporting busy.
    pub fn make_room(&mut self) {
        self.release_active();
    }

    /// Hand the slot to a freshly started utterance, releasing the previous one.
    pub fn install(&mut self, request: RequestId, handle: Box<dyn PlaybackHandle>) -> HandleId {
        self.pending.remove(&request);
        self.release_active();
        self.next_handle += 1;
        let id = HandleId(self.next_handle);
        self.active = Some((id, handle));
        id
    }

    /// Record that utterance `id` ended. Returns `false` when it was already superseded.
    pub fn finish(&mut self, id: HandleId) -> bool {
        match &self.active {
            Some((current, _)) if *current == id => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// Silence the current utterance and go idle.
    ///
    /// Requests still waiting on synthesis are forgotten but not cancelled: if
    /// one completes later it still installs and plays.
    pub fn stop(&mut self) {
        self.pending.clear();
        self.release_active();
    }

    fn release_active(&mut self) {
        if let Some((_, handle)) = self.active.take() {
            handle.pause();
            handle.rewind();
        }
    }
}
