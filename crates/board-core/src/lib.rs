//! # board-core
//!
//! Shared library for the message board client containing the datagram wire
//! protocol, the checksum, and the rules a post must satisfy.
//!
//! It has zero dependencies on sockets, async runtimes, or terminal I/O.
//!
//! # Architecture overview (for beginners)
//!
//! The message board server speaks a tiny text protocol over UDP.  Because UDP
//! may drop, duplicate, or corrupt datagrams, every request is wrapped in a
//! *frame* carrying a one-bit sequence number and a one-byte checksum, and the
//! client retransmits until it sees a matching acknowledgment.
//!
//! This crate (`board-core`) is the shared foundation.  It defines:
//!
//! - **`protocol`** – How bytes travel over the network.  Frames are encoded
//!   as `[tag][sequence bit][checksum][body]`, and response bodies are
//!   classified into message lists, acceptances, and rejections.
//!
//! - **`domain`** – Pure business rules with no I/O.  The most important
//!   piece is post validation: message and username limits and the `::`
//!   field delimiter that may never appear inside a field.

// Declare the two top-level modules.  Rust will look for each in a
// subdirectory with the same name (e.g., src/protocol/mod.rs).
pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `board_core::Frame` instead of `board_core::protocol::frame::Frame`.
pub use domain::post::{explain_rejection, validate_post, validate_username, PostRejection};
pub use domain::record::MessageRecord;
pub use protocol::checksum::lrc;
pub use protocol::frame::{Frame, FrameError};
pub use protocol::messages::{GetResponse, PostResponse, Request, RequestKind};
pub use protocol::sequence::SequenceBit;
