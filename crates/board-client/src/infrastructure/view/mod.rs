//! Terminal presentation of the message board.
//!
//! [`TerminalView`] implements
//! [`MessageBoardView`](crate::application::board_controller::MessageBoardView)
//! for a line-oriented terminal.  The board is polled every second, so
//! redrawing the whole list each time would scroll the screen endlessly.
//! Instead the view remembers the lines it last printed and writes only the
//! ones that are new.
//!
//! # Detecting new lines
//!
//! The server returns the whole board, oldest first, and may drop old
//! entries from the front.  The view looks for the longest tail of what it
//! already printed that is also the head of the new list; everything after
//! that overlap is new.
//!
//! ```text
//! shown:  a b c d
//! items:      c d e f     overlap = 2  ─▶ print "e", "f"
//! ```

use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::application::board_controller::MessageBoardView;

struct ViewState<W> {
    out: W,
    shown: Vec<String>,
    status: String,
}

/// Writes message lines and status changes to a terminal.
pub struct TerminalView<W: Write + Send = Stdout> {
    state: Mutex<ViewState<W>>,
    max_messages: usize,
}

impl TerminalView<Stdout> {
    /// A view printing to stdout that keeps at most `max_messages` lines.
    pub fn new(max_messages: usize) -> Self {
        Self::with_writer(io::stdout(), max_messages)
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn with_writer(out: W, max_messages: usize) -> Self {
        Self {
            state: Mutex::new(ViewState {
                out,
                shown: Vec::new(),
                status: String::new(),
            }),
            max_messages: max_messages.max(1),
        }
    }

    /// Consumes the view and returns the writer.
    pub fn into_writer(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .out
    }

    /// Prints a prompt without a trailing newline.
    pub fn prompt(&self, text: &str) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = write!(state.out, "{text}").and_then(|()| state.out.flush()) {
            warn!("terminal write failed: {e}");
        }
    }
}

/// Length of the longest suffix of `shown` that is a prefix of `items`.
fn overlap(shown: &[String], items: &[String]) -> usize {
    let longest = shown.len().min(items.len());
    (1..=longest)
        .rev()
        .find(|&k| shown[shown.len() - k..] == items[..k])
        .unwrap_or(0)
}

impl<W: Write + Send> MessageBoardView for TerminalView<W> {
    fn set_list_items(&self, items: &[String]) {
        let start = items.len().saturating_sub(self.max_messages);
        let visible = &items[start..];

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let skip = overlap(&state.shown, visible);

        let result = visible[skip..]
            .iter()
            .try_for_each(|line| writeln!(state.out, "{line}"))
            .and_then(|()| state.out.flush());
        if let Err(e) = result {
            warn!("terminal write failed: {e}");
        }
        state.shown = visible.to_vec();
    }

    fn set_status(&self, status: &str) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.status == status {
            return;
        }
        state.status = status.to_string();
        if status.is_empty() {
            return;
        }
        if let Err(e) = writeln!(state.out, "[status] {status}").and_then(|()| state.out.flush()) {
            warn!("terminal write failed: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
