//! Application layer use cases for the client application.
//!
//! # What use cases does the client have?
//!
//! - **`board_service`** – The two operations the board offers (fetch the
//!   message list, post a message) expressed as a trait, together with the
//!   failure taxonomy every caller sees.  The UDP implementation lives in the
//!   infrastructure layer and is injected at construction time.
//!
//! - **`board_controller`** – Drives the board service on behalf of the user:
//!   the periodic poll, the post-on-enter action, and the status line that
//!   clears itself after a few polls.

pub mod board_controller;
pub mod board_service;
