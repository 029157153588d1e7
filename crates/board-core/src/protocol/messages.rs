//! Request bodies and response body classification.
//!
//! A request body is `"GET"` or `"POST <user>::<text>"`.  A response body is
//! `"OK"`, `"OK <fields>"` (GET only), or `"ERROR"` followed by optional
//! detail text.  Anything else is unrecognized and surfaces to the caller as
//! a protocol violation.

use crate::domain::post::FIELD_DELIMITER;
use crate::domain::record::MessageRecord;

/// Body of a successful response.
pub const OK_MARKER: &str = "OK";

/// Prefix of a rejection response.
pub const ERROR_MARKER: &str = "ERROR";

// ── Requests ──────────────────────────────────────────────────────────────────

/// The two request types the server understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Fetch the current message list.
    Get,
    /// Append one message.
    Post,
}

impl RequestKind {
    /// The verb at the start of the body.
    pub fn verb(self) -> &'static str {
        match self {
            RequestKind::Get => "GET",
            RequestKind::Post => "POST",
        }
    }
}

/// A transient request value; lives for one logical exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub kind: RequestKind,
    /// Empty for GET, `user::text` for POST.
    pub payload: String,
}

impl Request {
    /// A GET request with an empty payload.
    pub fn get() -> Self {
        Self {
            kind: RequestKind::Get,
            payload: String::new(),
        }
    }

    /// A POST request for `text` authored by `user`.
    ///
    /// No validation happens here; see [`crate::validate_post`].
    pub fn post(user: &str, text: &str) -> Self {
        Self {
            kind: RequestKind::Post,
            payload: format!("{user}{FIELD_DELIMITER}{text}"),
        }
    }

    /// The frame body for this request.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use board_core::Request;
    ///
    /// assert_eq!(Request::get().body(), "GET");
    /// assert_eq!(Request::post("bob", "hi").body(), "POST bob::hi");
    /// ```
    pub fn body(&self) -> String {
        match self.kind {
            RequestKind::Get => self.kind.verb().to_string(),
            RequestKind::Post => format!("{} {}", self.kind.verb(), self.payload),
        }
    }
}

// ── Responses ─────────────────────────────────────────────────────────────────

/// Classified body of a GET acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetResponse {
    /// `"OK"` or `"OK <fields>"`, parsed into records in server order.
    Messages(Vec<MessageRecord>),
    /// `"ERROR..."`; carries the full body text.
    Rejected(String),
    /// Neither of the above.
    Unrecognized,
}

impl GetResponse {
    /// Classifies a validated GET response body.
    ///
    /// The field list is split on `::` and read in non-overlapping triples
    /// `(timestamp, username, text)`.  A trailing group with fewer than three
    /// fields is dropped.
    pub fn classify(body: &str) -> Self {
        if body == OK_MARKER {
            return GetResponse::Messages(Vec::new());
        }
        if let Some(fields) = body.strip_prefix("OK ") {
            return GetResponse::Messages(parse_records(fields));
        }
        if body.starts_with(ERROR_MARKER) {
            return GetResponse::Rejected(body.to_string());
        }
        GetResponse::Unrecognized
    }
}

/// Classified body of a POST acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostResponse {
    /// Exactly `"OK"`.
    Accepted,
    /// `"ERROR..."`; carries any detail after the marker, trimmed.
    Rejected(String),
    /// Neither of the above.
    Unrecognized,
}

impl PostResponse {
    /// Classifies a validated POST response body.
    pub fn classify(body: &str) -> Self {
        if body == OK_MARKER {
            return PostResponse::Accepted;
        }
        if let Some(detail) = body.strip_prefix(ERROR_MARKER) {
            return PostResponse::Rejected(detail.trim().to_string());
        }
        PostResponse::Unrecognized
    }
}

fn parse_records(fields: &str) -> Vec<MessageRecord> {
    let fields: Vec<&str> = fields.split(FIELD_DELIMITER).collect();
    fields
        .chunks_exact(3)
        .map(|triple| MessageRecord::new(triple[0], triple[1], triple[2]))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(response: GetResponse) -> Vec<String> {
        match response {
            GetResponse::Messages(records) => records.iter().map(ToString::to_string).collect(),
            other => panic!("expected messages, got {other:?}"),
        }
    }

    #[test]
    fn test_get_request_has_empty_payload_and_bare_verb() {
        let req = Request::get();
        assert_eq!(req.kind, RequestKind::Get);
        assert!(req.payload.is_empty());
        assert_eq!(req.body(), "GET");
    }

    #[test]
    fn test_post_request_joins_user_and_text_with_delimiter() {
        // Arrange / Act
        let req = Request::post("alice", "hello there");

        // Assert
        assert_eq!(req.payload, "alice::hello there");
        assert_eq!(req.body(), "POST alice::hello there");
    }

    #[test]
    fn test_get_response_parses_triples_in_server_order() {
        // Arrange
        let body = "OK 12:01::alice::hello::12:02::bob::hi";

        // Act
        let response = GetResponse::classify(body);

        // Assert
        assert_eq!(lines(response), vec!["12:01 alice hello", "12:02 bob hi"]);
    }

    #[test]
    fn test_get_response_single_colons_do_not_split_fields() {
        // Arrange – only "::" separates fields, so "12:01 alice" is one field
        // and the four fields form one triple plus a dropped tail
        let body = "OK 12:01 alice::hello::12:02 bob::hi";

        // Act
        let response = GetResponse::classify(body);

        // Assert
        assert_eq!(lines(response), vec!["12:01 alice hello 12:02 bob"]);
    }

    #[test]
    fn test_get_response_drops_incomplete_trailing_group() {
        // Arrange – seven fields: two complete triples and one stray field
        let body = "OK t1::u1::m1::t2::u2::m2::t3";

        // Act
        let response = GetResponse::classify(body);

        // Assert
        assert_eq!(lines(response), vec!["t1 u1 m1", "t2 u2 m2"]);
    }

    #[test]
    fn test_get_response_bare_ok_is_empty_list() {
        assert_eq!(GetResponse::classify("OK"), GetResponse::Messages(Vec::new()));
    }

    #[test]
    fn test_get_response_ok_with_empty_field_list_is_empty() {
        assert_eq!(GetResponse::classify("OK "), GetResponse::Messages(Vec::new()));
    }

    #[test]
    fn test_get_response_error_is_rejection_with_full_text() {
        assert_eq!(
            GetResponse::classify("ERROR bad request"),
            GetResponse::Rejected("ERROR bad request".to_string())
        );
    }

    #[test]
    fn test_get_response_unknown_body_is_unrecognized() {
        assert_eq!(GetResponse::classify("HELLO"), GetResponse::Unrecognized);
        assert_eq!(GetResponse::classify("OKAY"), GetResponse::Unrecognized);
        assert_eq!(GetResponse::classify(""), GetResponse::Unrecognized);
    }

    #[test]
    fn test_post_response_ok_is_accepted() {
        assert_eq!(PostResponse::classify("OK"), PostResponse::Accepted);
    }

    #[test]
    fn test_post_response_error_carries_trimmed_detail() {
        assert_eq!(
            PostResponse::classify("ERROR message too long"),
            PostResponse::Rejected("message too long".to_string())
        );
        assert_eq!(
            PostResponse::classify("ERROR"),
            PostResponse::Rejected(String::new())
        );
    }

    #[test]
    fn test_post_response_ok_with_trailing_text_is_unrecognized() {
        assert_eq!(PostResponse::classify("OK then"), PostResponse::Unrecognized);
        assert_eq!(PostResponse::classify("ok"), PostResponse::Unrecognized);
    }
}
