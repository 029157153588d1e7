//! The reliable request channel: stop-and-wait ARQ over a datagram transport.
//!
//! # How one request is carried (for beginners)
//!
//! 1. The request body is framed with the current sequence bit and its LRC.
//! 2. The frame is sent and the channel waits up to `timeout` for an answer.
//! 3. Each attempt ends in one of four [`AttemptOutcome`]s.  Only
//!    `Valid` ends the request; the other three send the *identical* bytes
//!    again while attempts remain.
//! 4. On success the sequence bit flips, so the next request can be told
//!    apart from a retransmission of this one.  On failure it stays put.
//!
//! The worst-case latency of one request is therefore
//! `retry_limit × timeout` plus the send time.

use std::time::Duration;

use async_trait::async_trait;
use board_core::{
    explain_rejection, validate_post, Frame, GetResponse, MessageRecord, PostResponse, Request,
    SequenceBit,
};
use tracing::{debug, warn};

use crate::application::board_service::{BoardService, PostStatus, RequestError};
use crate::infrastructure::network::transport::{DatagramTransport, UdpTransport};

/// Settings for a [`ReliableRequestChannel`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelConfig {
    /// Server hostname or IP address.
    pub host: String,
    /// Server UDP port (1–65535).
    pub port: u16,
    /// Maximum number of transmissions per request.
    pub retry_limit: u32,
    /// How long each attempt waits for an acknowledgment.
    pub timeout: Duration,
}

impl Default for ChannelConfig {
    /// | Field       | Default     |
    /// |-------------|-------------|
    /// | host        | `localhost` |
    /// | port        | `1111`      |
    /// | retry_limit | 3           |
    /// | timeout     | 100 ms      |
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1111,
            retry_limit: 3,
            timeout: Duration::from_millis(100),
        }
    }
}

impl ChannelConfig {
    /// Checks every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Configuration`] naming the first bad field.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.host.is_empty() {
            return Err(RequestError::configuration("server host must not be empty"));
        }
        if self.port == 0 {
            return Err(RequestError::configuration(
                "server port must be between 1 and 65535",
            ));
        }
        if self.retry_limit == 0 {
            return Err(RequestError::configuration("retry limit must be at least 1"));
        }
        if self.timeout.is_zero() {
            return Err(RequestError::configuration("timeout must be positive"));
        }
        Ok(())
    }
}

/// How a single transmission attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Matching sequence bit and checksum; carries the body.
    Valid(String),
    /// The acknowledgment belongs to an earlier round trip.
    Stale,
    /// The datagram was undecodable or its checksum did not match.
    Corrupt,
    /// Nothing arrived within the timeout.
    Timeout,
}

/// Owns the transport, the sequence bit, and the retry policy.
///
/// Only one request may be outstanding at a time; every request method takes
/// `&mut self`.
pub struct ReliableRequestChannel<T> {
    transport: T,
    config: ChannelConfig,
    sequence: SequenceBit,
}

impl ReliableRequestChannel<UdpTransport> {
    /// Validates `config` and opens a UDP socket on an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Configuration`] for invalid settings or when
    /// the socket cannot be opened.  This failure is fatal for the client.
    pub async fn connect(config: ChannelConfig) -> Result<Self, RequestError> {
        config.validate()?;
        let transport = UdpTransport::bind(&config.host, config.port).await?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: DatagramTransport> ReliableRequestChannel<T> {
    /// Wraps an existing transport.  The sequence bit starts at `'0'`.
    pub fn with_transport(config: ChannelConfig, transport: T) -> Self {
        Self {
            transport,
            config,
            sequence: SequenceBit::default(),
        }
    }

    /// The sequence bit the next request will carry.
    pub fn sequence_bit(&self) -> SequenceBit {
        self.sequence
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `request` until a valid acknowledgment arrives or the retry
    /// budget runs out, and returns the acknowledged body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Transport`] when every attempt failed.  The
    /// sequence bit is left unchanged in that case.
    pub async fn perform_request(&mut self, request: &Request) -> Result<String, RequestError> {
        let datagram = Frame::request(self.sequence, request.body()).encode();
        let retry_limit = self.config.retry_limit;

        for attempt in 1..=retry_limit {
            match self.attempt(&datagram).await {
                AttemptOutcome::Valid(body) => {
                    debug!(
                        kind = ?request.kind,
                        sequence = %self.sequence,
                        attempt,
                        "request acknowledged"
                    );
                    self.sequence.toggle();
                    return Ok(body);
                }
                outcome => {
                    warn!(
                        kind = ?request.kind,
                        sequence = %self.sequence,
                        attempt,
                        retry_limit,
                        ?outcome,
                        "attempt failed"
                    );
                }
            }
        }

        warn!(kind = ?request.kind, attempts = retry_limit, "server never responded");
        Err(RequestError::Transport {
            attempts: retry_limit,
        })
    }

    /// One send followed by one bounded wait.
    ///
    /// I/O errors on either side are logged and count as a timeout.
    async fn attempt(&self, datagram: &[u8]) -> AttemptOutcome {
        if let Err(e) = self.transport.send(datagram).await {
            warn!("send failed: {e}");
        }

        let received = match self.transport.recv_timeout(self.config.timeout).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return AttemptOutcome::Timeout,
            Err(e) => {
                warn!("receive failed: {e}");
                return AttemptOutcome::Timeout;
            }
        };

        self.classify(&received)
    }

    fn classify(&self, received: &[u8]) -> AttemptOutcome {
        let frame = match Frame::decode(received) {
            Ok(frame) => frame,
            Err(e) => {
                debug!("undecodable acknowledgment: {e}");
                return AttemptOutcome::Corrupt;
            }
        };

        if frame.sequence != self.sequence {
            return AttemptOutcome::Stale;
        }
        if !frame.checksum_matches() {
            debug!(
                carried = frame.checksum,
                computed = frame.computed_checksum(),
                "checksum mismatch"
            );
            return AttemptOutcome::Corrupt;
        }
        AttemptOutcome::Valid(frame.body)
    }
}

#[async_trait]
impl<T: DatagramTransport> BoardService for ReliableRequestChannel<T> {
    async fn fetch_messages(&mut self) -> Result<Vec<MessageRecord>, RequestError> {
        let body = self.perform_request(&Request::get()).await?;
        match GetResponse::classify(&body) {
            GetResponse::Messages(records) => Ok(records),
            GetResponse::Rejected(text) => Err(RequestError::ServerError(text)),
            GetResponse::Unrecognized => Err(RequestError::Protocol { body }),
        }
    }

    async fn post_message(&mut self, user: &str, text: &str) -> Result<PostStatus, RequestError> {
        validate_post(user, text)?;

        let body = self.perform_request(&Request::post(user, text)).await?;
        match PostResponse::classify(&body) {
            PostResponse::Accepted => Ok(PostStatus::Sent),
            PostResponse::Rejected(detail) => {
                warn!(user, "server rejected a post that passed local validation");
                Err(explain_rejection(user, text, &detail).into())
            }
            PostResponse::Unrecognized => Err(RequestError::Protocol { body }),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::board_service::FailureKind;
    use board_core::{lrc, PostRejection};
    use std::collections::VecDeque;
    use std::io;
    use std::sync::Mutex;

    // ── Test doubles ──────────────────────────────────────────────────────────

    /// Records every sent datagram and replays a script of receive results.
    #[derive(Default)]
    struct ScriptedTransport {
        sent: Mutex<Vec<Vec<u8>>>,
        replies: Mutex<VecDeque<io::Result<Option<Vec<u8>>>>>,
        fail_sends: bool,
    }

    impl ScriptedTransport {
        fn with_replies(replies: Vec<Option<Vec<u8>>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().map(Ok).collect()),
                ..Default::default()
            }
        }

        fn sent(&self) -> Vec<Vec<u8>> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DatagramTransport for ScriptedTransport {
        async fn send(&self, datagram: &[u8]) -> io::Result<()> {
            self.sent.lock().unwrap().push(datagram.to_vec());
            if self.fail_sends {
                return Err(io::Error::new(io::ErrorKind::Other, "injected failure"));
            }
            Ok(())
        }

        async fn recv_timeout(&self, _wait: Duration) -> io::Result<Option<Vec<u8>>> {
            self.replies.lock().unwrap().pop_front().unwrap_or(Ok(None))
        }
    }

    fn ack(sequence: SequenceBit, body: &str) -> Option<Vec<u8>> {
        Some(Frame::request(sequence, body).encode())
    }

    fn corrupt_ack(sequence: SequenceBit, body: &str) -> Option<Vec<u8>> {
        let mut bytes = Frame::request(sequence, body).encode();
        bytes[2] ^= 0xFF;
        Some(bytes)
    }

    fn channel(replies: Vec<Option<Vec<u8>>>) -> ReliableRequestChannel<ScriptedTransport> {
        ReliableRequestChannel::with_transport(
            ChannelConfig::default(),
            ScriptedTransport::with_replies(replies),
        )
    }

    // ── ChannelConfig ─────────────────────────────────────────────────────────

    #[test]
    fn test_default_config_values() {
        let cfg = ChannelConfig::default();
        assert_eq!(cfg.host, "localhost");
        assert_eq!(cfg.port, 1111);
        assert_eq!(cfg.retry_limit, 3);
        assert_eq!(cfg.timeout, Duration::from_millis(100));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_out_of_range_values() {
        let bad = [
            ChannelConfig {
                port: 0,
                ..Default::default()
            },
            ChannelConfig {
                retry_limit: 0,
                ..Default::default()
            },
            ChannelConfig {
                timeout: Duration::ZERO,
                ..Default::default()
            },
            ChannelConfig {
                host: String::new(),
                ..Default::default()
            },
        ];
        for cfg in bad {
            let err = cfg.validate().expect_err("must be rejected");
            assert_eq!(err.kind(), FailureKind::ConfigurationFailure, "{cfg:?}");
        }
    }

    // ── perform_request ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_first_attempt_success_toggles_sequence_bit() {
        // Arrange
        let mut ch = channel(vec![ack(SequenceBit::Zero, "OK")]);

        // Act
        let body = ch.perform_request(&Request::get()).await.expect("success");

        // Assert
        assert_eq!(body, "OK");
        assert_eq!(ch.sequence_bit(), SequenceBit::One);
        assert_eq!(ch.transport().sent(), vec![b"C0VGET".to_vec()]);
    }

    #[tokio::test]
    async fn test_two_timeouts_then_valid_ack_sends_three_identical_datagrams() {
        // Arrange
        let mut ch = channel(vec![None, None, ack(SequenceBit::Zero, "OK")]);

        // Act
        let result = ch.perform_request(&Request::get()).await;

        // Assert
        assert_eq!(result.expect("third attempt succeeds"), "OK");
        let sent = ch.transport().sent();
        assert_eq!(sent.len(), 3);
        assert!(sent.iter().all(|d| d == &sent[0]), "retransmissions must be identical");
        assert_eq!(ch.sequence_bit(), SequenceBit::One, "bit toggles exactly once");
    }

    #[tokio::test]
    async fn test_stale_ack_is_rejected_and_retried() {
        // Arrange – an ack carrying the other bit, then the real one
        let mut ch = channel(vec![
            ack(SequenceBit::One, "OK"),
            ack(SequenceBit::Zero, "OK 1::a::b"),
        ]);

        // Act
        let body = ch.perform_request(&Request::get()).await.expect("success");

        // Assert
        assert_eq!(body, "OK 1::a::b");
        assert_eq!(ch.transport().sent().len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_ack_triggers_identical_retransmission() {
        // Arrange
        let mut ch = channel(vec![
            corrupt_ack(SequenceBit::Zero, "OK"),
            ack(SequenceBit::Zero, "OK"),
        ]);

        // Act
        ch.perform_request(&Request::post("bob", "hi"))
            .await
            .expect("success");

        // Assert
        let sent = ch.transport().sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], sent[1]);
        assert_eq!(sent[0][1], b'0');
    }

    #[tokio::test]
    async fn test_undecodable_ack_counts_as_corrupt() {
        let mut ch = channel(vec![Some(b"C".to_vec()), ack(SequenceBit::Zero, "OK")]);
        assert!(ch.perform_request(&Request::get()).await.is_ok());
        assert_eq!(ch.transport().sent().len(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_retries_fail_and_leave_bit_unchanged() {
        // Arrange – three bad answers of every kind
        let mut ch = channel(vec![
            None,
            ack(SequenceBit::One, "OK"),
            corrupt_ack(SequenceBit::Zero, "OK"),
            ack(SequenceBit::Zero, "OK"), // would succeed, but the budget is spent
        ]);

        // Act
        let err = ch
            .perform_request(&Request::get())
            .await
            .expect_err("must fail");

        // Assert
        assert!(matches!(err, RequestError::Transport { attempts: 3 }));
        assert_eq!(ch.sequence_bit(), SequenceBit::Zero);
        assert_eq!(ch.transport().sent().len(), 3);
    }

    #[tokio::test]
    async fn test_io_errors_are_recovered_by_retry() {
        // Arrange
        let transport = ScriptedTransport {
            replies: Mutex::new(VecDeque::from([
                Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused")),
                Ok(ack(SequenceBit::Zero, "OK")),
            ])),
            ..Default::default()
        };
        let mut ch = ReliableRequestChannel::with_transport(ChannelConfig::default(), transport);

        // Act / Assert
        assert!(ch.perform_request(&Request::get()).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_failures_exhaust_into_transport_failure() {
        let transport = ScriptedTransport {
            fail_sends: true,
            ..Default::default()
        };
        let mut ch = ReliableRequestChannel::with_transport(ChannelConfig::default(), transport);

        let err = ch.perform_request(&Request::get()).await.expect_err("fail");

        assert_eq!(err.kind(), FailureKind::TransportFailure);
        assert_eq!(ch.transport().sent().len(), 3);
    }

    #[tokio::test]
    async fn test_sequence_bit_tracks_successful_round_trips() {
        // Arrange – five successes with alternating bits, one failure in between
        let mut replies = Vec::new();
        let mut bit = SequenceBit::Zero;
        for _ in 0..5 {
            replies.push(ack(bit, "OK"));
            bit.toggle();
        }
        let mut ch = channel(replies);

        // Act
        for _ in 0..5 {
            ch.perform_request(&Request::get()).await.expect("success");
        }
        let before_failure = ch.sequence_bit();
        let _ = ch.perform_request(&Request::get()).await;

        // Assert – 5 mod 2 = 1
        assert_eq!(before_failure, SequenceBit::One);
        assert_eq!(ch.sequence_bit(), SequenceBit::One);
    }

    // ── fetch_messages ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_fetch_messages_returns_records_in_order() {
        // Arrange
        let mut ch = channel(vec![ack(
            SequenceBit::Zero,
            "OK 12:01::alice::hello::12:02::bob::hi::12:03",
        )]);

        // Act
        let records = ch.fetch_messages().await.expect("fetch");

        // Assert
        let lines: Vec<String> = records.iter().map(ToString::to_string).collect();
        assert_eq!(lines, vec!["12:01 alice hello", "12:02 bob hi"]);
    }

    #[tokio::test]
    async fn test_fetch_messages_error_body_is_server_rejection() {
        let mut ch = channel(vec![ack(SequenceBit::Zero, "ERROR unavailable")]);

        let err = ch.fetch_messages().await.expect_err("rejection");

        assert_eq!(err.kind(), FailureKind::ServerRejection);
        assert_eq!(err.to_string(), "ERROR unavailable");
    }

    #[tokio::test]
    async fn test_fetch_messages_unknown_body_is_protocol_violation_not_retried() {
        // Arrange
        let mut ch = channel(vec![ack(SequenceBit::Zero, "WHAT")]);

        // Act
        let err = ch.fetch_messages().await.expect_err("violation");

        // Assert
        assert_eq!(err.kind(), FailureKind::ProtocolViolation);
        assert_eq!(err.to_string(), "invalid response");
        assert_eq!(ch.transport().sent().len(), 1);
        assert_eq!(ch.sequence_bit(), SequenceBit::One, "the round trip itself succeeded");
    }

    #[tokio::test]
    async fn test_fetch_messages_timeout_is_transport_failure() {
        let mut ch = channel(vec![]);
        let err = ch.fetch_messages().await.expect_err("timeout");
        assert_eq!(err.to_string(), "server never responded");
    }

    // ── post_message ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_post_message_success_then_get_uses_next_bit() {
        // Arrange
        let mut ch = channel(vec![ack(SequenceBit::Zero, "OK"), ack(SequenceBit::One, "OK")]);

        // Act
        let status = ch.post_message("alice", "hello").await.expect("post");
        ch.fetch_messages().await.expect("fetch");

        // Assert
        assert_eq!(status, PostStatus::Sent);
        let sent = ch.transport().sent();
        let expected_post = Frame::request(SequenceBit::Zero, "POST alice::hello").encode();
        assert_eq!(sent[0], expected_post);
        assert_eq!(&sent[1][..2], b"C1");
    }

    #[tokio::test]
    async fn test_post_message_too_long_is_refused_without_sending() {
        // Arrange
        let mut ch = channel(vec![]);

        // Act
        let err = ch
            .post_message("alice", &"a".repeat(61))
            .await
            .expect_err("too long");

        // Assert
        assert_eq!(err.to_string(), "message too long");
        assert!(ch.transport().sent().is_empty());
        assert_eq!(ch.sequence_bit(), SequenceBit::Zero);
    }

    #[tokio::test]
    async fn test_post_message_delimiter_rules() {
        let mut ch = channel(vec![]);

        let in_text = ch.post_message("alice", "a::b").await.expect_err("text");
        let in_user = ch.post_message("al::ce", "ab").await.expect_err("user");

        assert_eq!(in_text.to_string(), "message invalid, contains delimiter");
        assert_eq!(in_user.to_string(), "username invalid, contains delimiter");
        assert!(ch.transport().sent().is_empty());
    }

    #[tokio::test]
    async fn test_post_message_colon_at_field_boundary_is_refused_without_sending() {
        // Arrange
        let mut ch = channel(vec![ack(SequenceBit::Zero, "OK")]);

        // Act
        let trailing_user = ch.post_message("bob:", "hi").await.expect_err("user");
        let leading_text = ch.post_message("bob", ":hi").await.expect_err("text");

        // Assert
        assert_eq!(trailing_user.to_string(), "username invalid, contains delimiter");
        assert_eq!(leading_text.to_string(), "message invalid, contains delimiter");
        assert!(ch.transport().sent().is_empty());
        assert_eq!(ch.sequence_bit(), SequenceBit::Zero);
    }

    #[tokio::test]
    async fn test_post_message_server_error_without_local_cause_is_unspecified() {
        // Arrange
        let mut ch = channel(vec![ack(SequenceBit::Zero, "ERROR board full")]);

        // Act
        let err = ch.post_message("alice", "hello").await.expect_err("rejected");

        // Assert
        assert!(matches!(
            err,
            RequestError::Rejected(PostRejection::Unspecified(ref d)) if d == "board full"
        ));
        assert_eq!(err.kind(), FailureKind::ServerRejection);
    }

    #[tokio::test]
    async fn test_post_message_unknown_body_is_protocol_violation() {
        let mut ch = channel(vec![ack(SequenceBit::Zero, "OK OK")]);
        let err = ch.post_message("alice", "hello").await.expect_err("bad body");
        assert_eq!(err.kind(), FailureKind::ProtocolViolation);
    }

    #[test]
    fn test_ack_helper_produces_valid_checksum() {
        let bytes = ack(SequenceBit::One, "OK").unwrap();
        assert_eq!(bytes[2], lrc(b"OK"));
    }
}
