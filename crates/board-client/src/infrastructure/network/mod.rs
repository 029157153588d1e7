//! Network infrastructure for the client application.
//!
//! Architecture:
//! - [`DatagramTransport`] is the seam between protocol logic and the OS.
//!   [`UdpTransport`] implements it over a `tokio::net::UdpSocket` bound to
//!   an ephemeral local port.
//! - [`ReliableRequestChannel`] owns a transport, the alternating sequence
//!   bit, and the retry policy.  It implements
//!   [`crate::application::board_service::BoardService`].
//!
//! # Per-request state machine
//!
//! ```text
//! IDLE ─▶ SENT ─▶ awaiting ─┬─ ACK_VALID ──▶ SUCCEEDED (toggle sequence bit)
//!          ▲                ├─ ACK_STALE ──┐
//!          │                ├─ ACK_CORRUPT ┤
//!          │                └─ TIMEOUT ────┤
//!          └──── attempts remain ◀─────────┘
//!                attempts exhausted ─────────▶ FAILED (sequence bit unchanged)
//! ```

pub mod channel;
pub mod transport;

pub use channel::{AttemptOutcome, ChannelConfig, ReliableRequestChannel};
pub use transport::{DatagramTransport, UdpTransport};
