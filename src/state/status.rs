use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{sync::watch, time::sleep};

use crate::dto::sse::StatusEvent;

/// How long a banner stays up unless replaced.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy)]
enum Banner {
    Success,
    Error,
}

impl Banner {
    fn text(self, status: &mut StatusEvent) -> &mut String {
        match self {
            Banner::Success => &mut status.success,
            Banner::Error => &mut status.error,
        }
    }
}

struct Shared {
    banners: watch::Sender<StatusEvent>,
    success_generation: AtomicU64,
    error_generation: AtomicU64,
}

impl Shared {
    fn generation(&self, banner: Banner) -> &AtomicU64 {
        match banner {
            Banner::Success => &self.success_generation,
            Banner::Error => &self.error_generation,
        }
    }
}

/// Operator-facing success and error banners that clear themselves.
///
/// Each banner has its own timer. A banner written again before its timer
/// fires keeps the newer text for a full [`STATUS_TTL`].
#[derive(Clone)]
pub struct StatusBoard {
    shared: Arc<Shared>,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBoard {
    /// Board with both banners empty.
    pub fn new() -> Self {
        let (banners, _rx) = watch::channel(StatusEvent::default());
        Self {
            shared: Arc::new(Shared {
                banners,
                success_generation: AtomicU64::new(0),
                error_generation: AtomicU64::new(0),
            }),
        }
    }

    /// Banners as currently shown.
    pub fn current(&self) -> StatusEvent {
        self.shared.banners.borrow().clone()
    }

    /// Observe banner changes.
    pub fn subscribe(&self) -> watch::Receiver<StatusEvent> {
        self.shared.banners.subscribe()
    }

    /// Show `message` as the success banner for [`STATUS_TTL`].
    pub fn flash_success(&self, message: impl Into<String>) {
        self.flash(Banner::Success, message.into());
    }

    /// Show `message` as the error banner for [`STATUS_TTL`].
    pub fn flash_error(&self, message: impl Into<String>) {
        self.flash(Banner::Error, message.into());
    }

    /// Drop both banners now.
    pub fn clear(&self) {
        self.shared.success_generation.fetch_add(1, Ordering::SeqCst);
        self.shared.error_generation.fetch_add(1, Ordering::SeqCst);
        self.shared.banners.send_if_modified(|status| {
            let changed = *status != StatusEvent::default();
            *status = StatusEvent::default();
            changed
        });
    }

    fn flash(&self, banner: Banner, message: String) {
        let generation = self.shared.generation(banner).fetch_add(1, Ordering::SeqCst) + 1;
        self.shared
            .banners
            .send_modify(|status| *banner.text(status) = message);

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            sleep(STATUS_TTL).await;
            shared.banners.send_if_modified(|status| {
                // Checked under the channel lock so a concurrent flash is never wiped.
                if shared.generation(banner).load(Ordering::SeqCst) != generation {
                    return false;
                }
                let text = banner.text(status);
                let changed = !text.is_empty();
                text.clear();
                changed
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn banner_clears_after_ttl() {
        let board = StatusBoard::new();
        board.flash_success("12 wedstrijden geladen!");
        assert_eq!(board.current().success, "12 wedstrijden geladen!");

        sleep(STATUS_TTL - Duration::from_millis(100)).await;
        assert_eq!(board.current().success, "12 wedstrijden geladen!");

        sleep(Duration::from_millis(200)).await;
        assert_eq!(board.current(), StatusEvent::default());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_message_survives_older_timer() {
        let board = StatusBoard::new();
        board.flash_error("Fout: eerste");
        sleep(Duration::from_secs(2)).await;
        board.flash_error("Fout: tweede");

        sleep(Duration::from_millis(1500)).await;
        assert_eq!(board.current().error, "Fout: tweede");

        sleep(Duration::from_secs(2)).await;
        assert_eq!(board.current().error, "");
    }

    #[tokio::test(start_paused = true)]
    async fn banners_expire_independently() {
        let board = StatusBoard::new();
        board.flash_success("geladen");
        sleep(Duration::from_secs(2)).await;
        board.flash_error("Fout bij afspelen: stuk");

        sleep(Duration::from_millis(1500)).await;
        let status = board.current();
        assert_eq!(status.success, "");
        assert_eq!(status.error, "Fout bij afspelen: stuk");
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_pending_expiry() {
        let board = StatusBoard::new();
        let mut updates = board.subscribe();
        board.flash_success("geladen");
        board.clear();
        assert_eq!(board.current(), StatusEvent::default());

        updates.borrow_and_update();
        sleep(STATUS_TTL * 2).await;
        assert!(!updates.has_changed().unwrap());
    }
}
