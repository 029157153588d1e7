//! board-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does board-client do? (for beginners)
//!
//! The client talks to a message board server over UDP.  About once per
//! second it asks the server for the current list of messages, and whenever
//! the user types a line it posts that line as a new message.
//!
//! UDP gives no delivery guarantees, so every request goes through a
//! stop-and-wait channel:
//!
//! 1. The request is framed with a sequence bit and a checksum.
//! 2. The frame is sent and the client waits a bounded time for an answer.
//! 3. A missing, corrupted, or stale answer causes the *identical* frame to be
//!    sent again, up to a retry limit.
//! 4. The first answer with the right sequence bit and a valid checksum
//!    completes the request and flips the sequence bit.
//!
//! The answer body is then interpreted as a message list, an acceptance, or a
//! rejection, and turned into something the terminal view can display.

/// Application layer: the board service seam, error taxonomy, and controller.
pub mod application;

/// Infrastructure layer: UDP channel, configuration file, and terminal view.
pub mod infrastructure;
