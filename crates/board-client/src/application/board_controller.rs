//! MessageBoardController: connects user actions and the poll timer to the
//! board service, and keeps the view up to date.
//!
//! The controller owns two pieces of presentation state that do not belong
//! in the protocol channel:
//!
//! - the username every post is sent as, and
//! - a [`StatusTimer`] that clears the status line a few polls after it was
//!   last set.

use board_core::MessageRecord;
use tracing::{debug, info, warn};

use crate::application::board_service::BoardService;

/// The two calls the presentation layer has to offer.
///
/// Infrastructure implementations render to a terminal; tests use a mock.
#[cfg_attr(test, mockall::automock)]
pub trait MessageBoardView: Send + Sync {
    /// Replaces the displayed message list.
    fn set_list_items(&self, items: &[String]);

    /// Replaces the status line.  An empty string clears it.
    fn set_status(&self, status: &str);
}

/// Counts polls since the status line was last set.
///
/// `hold_ticks == 0` disables clearing: a status then stays until replaced.
#[derive(Debug, Clone)]
pub struct StatusTimer {
    hold_ticks: u32,
    remaining: Option<u32>,
}

impl StatusTimer {
    pub fn new(hold_ticks: u32) -> Self {
        Self {
            hold_ticks,
            remaining: None,
        }
    }

    /// Starts the countdown after a status was shown.
    pub fn arm(&mut self) {
        if self.hold_ticks > 0 {
            self.remaining = Some(self.hold_ticks);
        }
    }

    /// Advances by one poll.  Returns `true` exactly once, on the tick the
    /// status should be cleared.
    pub fn tick(&mut self) -> bool {
        match self.remaining {
            Some(n) if n <= 1 => {
                self.remaining = None;
                true
            }
            Some(n) => {
                self.remaining = Some(n - 1);
                false
            }
            None => false,
        }
    }

    /// `true` while a status is being held.
    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }
}

/// The message board controller.
pub struct MessageBoardController<S, V> {
    name: String,
    service: S,
    view: V,
    status_timer: StatusTimer,
}

impl<S: BoardService, V: MessageBoardView> MessageBoardController<S, V> {
    /// Creates a controller posting as `name`.
    pub fn new(name: impl Into<String>, service: S, view: V, status_hold_ticks: u32) -> Self {
        Self {
            name: name.into(),
            service,
            view,
            status_timer: StatusTimer::new(status_hold_ticks),
        }
    }

    /// The username posts are sent as.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access to the underlying service (used by tests and diagnostics).
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Takes the controller apart into its name, service, and view.
    pub fn into_parts(self) -> (String, S, V) {
        (self.name, self.service, self.view)
    }

    /// The periodic poll: fetch the board and refresh the view.
    ///
    /// A failed fetch leaves the previous list on screen and shows the
    /// failure on the status line.
    pub async fn retrieve_messages(&mut self) {
        if self.status_timer.tick() {
            self.view.set_status("");
        }

        match self.service.fetch_messages().await {
            Ok(records) => {
                debug!(count = records.len(), "fetched messages");
                let lines: Vec<String> = records.iter().map(MessageRecord::to_string).collect();
                self.view.set_list_items(&lines);
            }
            Err(e) => {
                warn!(kind = ?e.kind(), "fetch failed: {e}");
                self.show_status(&e.to_string());
            }
        }
    }

    /// Called when the user enters a line.  Empty lines are ignored.
    ///
    /// Returns the status text that was shown, if any.
    pub async fn post_message(&mut self, text: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }

        let status = match self.service.post_message(&self.name, text).await {
            Ok(status) => {
                info!(user = %self.name, "message posted");
                status.to_string()
            }
            Err(e) => {
                warn!(kind = ?e.kind(), "post failed: {e}");
                e.to_string()
            }
        };
        self.show_status(&status);
        Some(status)
    }

    fn show_status(&mut self, status: &str) {
        self.view.set_status(status);
        self.status_timer.arm();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
