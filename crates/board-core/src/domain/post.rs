//! Rules a post must satisfy before the server will accept it.
//!
//! The server enforces the same rules but answers a violation with a bare
//! `ERROR`, without saying which rule failed.  [`explain_rejection`] therefore
//! re-checks the original input to produce a specific reason.  If the server's
//! rules ever diverge from these, the re-derived reason can be wrong, and an
//! `ERROR` that no local rule explains is reported as
//! [`PostRejection::Unspecified`].

use thiserror::Error;

/// Separator between fields on the wire.  May never appear inside a field.
pub const FIELD_DELIMITER: &str = "::";

/// Longest accepted message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 60;

/// Longest accepted username, in characters.
pub const MAX_USERNAME_CHARS: usize = 8;

/// A single delimiter character.  One on either side of the user/message
/// boundary merges with the joining `::` into a longer colon run.
const DELIMITER_CHAR: char = ':';

/// Why a post was refused.
///
/// The `Display` text is the status line shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostRejection {
    #[error("message too long")]
    MessageTooLong,

    #[error("message invalid, contains delimiter")]
    MessageContainsDelimiter,

    #[error("username invalid, contains delimiter")]
    UsernameContainsDelimiter,

    #[error("username too long")]
    UsernameTooLong,

    /// The server said `ERROR` but every local rule passes.
    #[error("message rejected by server{}", format_detail(.0))]
    Unspecified(String),
}

fn format_detail(detail: &str) -> String {
    if detail.is_empty() {
        String::new()
    } else {
        format!(": {detail}")
    }
}

/// Checks a post against every rule, in a fixed order.
///
/// Order: message length, delimiter in message, delimiter in username,
/// username length.  The first failing rule wins.
///
/// A message starting with `:` or a username ending in `:` counts as
/// containing the delimiter, since joining them with `::` would put a
/// colon run at the boundary and shift the field split.
///
/// # Errors
///
/// Returns the [`PostRejection`] for the first rule that fails.
///
/// # Examples
///
/// ```rust
/// use board_core::{validate_post, PostRejection};
///
/// assert_eq!(validate_post("alice", "hello"), Ok(()));
/// assert_eq!(
///     validate_post("alice", &"x".repeat(61)),
///     Err(PostRejection::MessageTooLong)
/// );
/// ```
pub fn validate_post(user: &str, text: &str) -> Result<(), PostRejection> {
    if text.chars().count() > MAX_MESSAGE_CHARS {
        return Err(PostRejection::MessageTooLong);
    }
    if text.contains(FIELD_DELIMITER) || text.starts_with(DELIMITER_CHAR) {
        return Err(PostRejection::MessageContainsDelimiter);
    }
    validate_username(user)
}

/// Checks a username on its own (used by the interactive prompt).
///
/// # Errors
///
/// Returns [`PostRejection::UsernameContainsDelimiter`] or
/// [`PostRejection::UsernameTooLong`].
pub fn validate_username(user: &str) -> Result<(), PostRejection> {
    if user.contains(FIELD_DELIMITER) || user.ends_with(DELIMITER_CHAR) {
        return Err(PostRejection::UsernameContainsDelimiter);
    }
    if user.chars().count() > MAX_USERNAME_CHARS {
        return Err(PostRejection::UsernameTooLong);
    }
    Ok(())
}

/// Re-derives why the server answered a post with `ERROR`.
///
/// `server_detail` is whatever followed the `ERROR` marker; it is only used
/// when no local rule explains the rejection.
pub fn explain_rejection(user: &str, text: &str, server_detail: &str) -> PostRejection {
    match validate_post(user, text) {
        Err(reason) => reason,
        Ok(()) => PostRejection::Unspecified(server_detail.to_string()),
    }
}
