//! BoardService: the operations the message board offers, and how they fail.
//!
//! The trait is implemented in the infrastructure layer by
//! `ReliableRequestChannel`; tests provide scripted stand-ins.
//!
//! # Failure taxonomy
//!
//! Every caller-visible outcome is a status string plus a [`FailureKind`]:
//!
//! | Kind                   | Raised when                                       |
//! |------------------------|---------------------------------------------------|
//! | `TransportFailure`     | no valid acknowledgment within the retry budget   |
//! | `ServerRejection`      | the server (or the local pre-check) refused a post, or answered a GET with `ERROR` |
//! | `ProtocolViolation`    | a validated body matches no known response shape  |
//! | `ConfigurationFailure` | the socket could not be opened or settings are invalid |
//!
//! Timeouts, corruption, and stale acknowledgments are recovered inside the
//! channel by retransmitting; only exhausting the retry budget reaches the
//! caller.  Rejections and protocol violations are never retried.

use async_trait::async_trait;
use board_core::{MessageRecord, PostRejection};
use thiserror::Error;

/// Distinguishes the four classes of caller-visible failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    TransportFailure,
    ServerRejection,
    ProtocolViolation,
    ConfigurationFailure,
}

/// Error type for board operations.
///
/// The `Display` text is the status line shown to the user.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Every attempt timed out or produced a stale or corrupted acknowledgment.
    #[error("server never responded")]
    Transport { attempts: u32 },

    /// A post was refused, either locally or by the server.
    #[error("{0}")]
    Rejected(#[from] PostRejection),

    /// The server answered a GET with `ERROR`; carries the server's text.
    #[error("{0}")]
    ServerError(String),

    /// The acknowledged body is not a recognizable response.
    #[error("invalid response")]
    Protocol { body: String },

    /// The channel could not be set up.
    #[error("configuration failure: {detail}")]
    Configuration {
        detail: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl RequestError {
    /// Which of the four failure classes this error belongs to.
    pub fn kind(&self) -> FailureKind {
        match self {
            RequestError::Transport { .. } => FailureKind::TransportFailure,
            RequestError::Rejected(_) | RequestError::ServerError(_) => {
                FailureKind::ServerRejection
            }
            RequestError::Protocol { .. } => FailureKind::ProtocolViolation,
            RequestError::Configuration { .. } => FailureKind::ConfigurationFailure,
        }
    }

    pub(crate) fn configuration(detail: impl Into<String>) -> Self {
        RequestError::Configuration {
            detail: detail.into(),
            source: None,
        }
    }
}

/// Outcome of a successful post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    Sent,
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Sent => write!(f, "message sent"),
        }
    }
}

/// The two operations a message board offers.
///
/// Implementations must not run two requests at once on the same underlying
/// channel; both methods take `&mut self` so the borrow checker enforces it.
#[async_trait]
pub trait BoardService: Send {
    /// Fetches the current message list in server order.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the server never responds, answers with
    /// `ERROR`, or sends an unrecognizable body.
    async fn fetch_messages(&mut self) -> Result<Vec<MessageRecord>, RequestError>;

    /// Posts `text` as `user`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Rejected`] when the post breaks a rule, plus
    /// the same transport and protocol failures as [`Self::fetch_messages`].
    async fn post_message(&mut self, user: &str, text: &str) -> Result<PostStatus, RequestError>;
}

// ── Tests ─────────────────────────────────────────────────────────────────────
