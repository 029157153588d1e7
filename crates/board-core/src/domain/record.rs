use std::fmt;

/// One message on the board, as returned by a GET.
///
/// Displays as `"timestamp username text"`, the line shown in the message
/// list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub timestamp: String,
    pub username: String,
    pub text: String,
}

impl MessageRecord {
    pub fn new(
        timestamp: impl Into<String>,
        username: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            username: username.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for MessageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.timestamp, self.username, self.text)
    }
}
