//! Frame codec for message board datagrams.
//!
//! Wire format (one UDP datagram, ASCII text):
//! ```text
//! [tag:1][sequence:1][checksum:1][body:N]
//! ```
//! - `tag` is `'C'` for every request the client sends.
//! - `sequence` is the ASCII digit `'0'` or `'1'`.
//! - `checksum` is the raw LRC byte of `body` (not hex-encoded).
//! - `body` is the request or response text, without a terminator.
//!
//! Responses use the same framing.  Decoding never validates the checksum;
//! the caller compares [`Frame::checksum`] against [`Frame::computed_checksum`]
//! so that a corrupted datagram can be counted as a failed attempt rather
//! than an error.

use thiserror::Error;
use tracing::trace;

use crate::protocol::checksum::lrc;
use crate::protocol::sequence::SequenceBit;

/// Tag byte marking a frame sent by the client.
pub const CLIENT_TAG: u8 = b'C';

/// Number of bytes preceding the body.
pub const FRAME_HEADER_SIZE: usize = 3;

/// Errors that can occur while decoding a received datagram.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The datagram is shorter than the three-byte header.
    #[error("datagram too short: need at least {FRAME_HEADER_SIZE} bytes, got {0}")]
    TooShort(usize),

    /// The sequence byte is neither `'0'` nor `'1'`.
    #[error("invalid sequence byte: 0x{0:02X}")]
    InvalidSequenceBit(u8),

    /// The body is not valid UTF-8.
    #[error("body is not valid UTF-8")]
    InvalidUtf8,
}

/// One request or response attempt as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tag: u8,
    pub sequence: SequenceBit,
    /// Checksum byte as carried in the frame.  For frames built with
    /// [`Frame::request`] this always equals the computed value.
    pub checksum: u8,
    pub body: String,
}

impl Frame {
    /// Builds a client frame for `body`, computing its checksum.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use board_core::{Frame, SequenceBit};
    ///
    /// let frame = Frame::request(SequenceBit::Zero, "GET");
    /// assert_eq!(frame.encode(), vec![b'C', b'0', 0x56, b'G', b'E', b'T']);
    /// ```
    pub fn request(sequence: SequenceBit, body: impl Into<String>) -> Self {
        let body = body.into();
        let checksum = lrc(body.as_bytes());
        Self {
            tag: CLIENT_TAG,
            sequence,
            checksum,
            body,
        }
    }

    /// Serializes the frame into a single datagram payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(FRAME_HEADER_SIZE + self.body.len());
        buf.push(self.tag);
        buf.push(self.sequence.as_ascii());
        buf.push(self.checksum);
        buf.extend_from_slice(self.body.as_bytes());
        buf
    }

    /// Decodes a received datagram.
    ///
    /// The tag byte is carried through unchanged and the checksum is not
    /// verified here.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError`] if the datagram is too short, carries an
    /// unknown sequence byte, or has a non-UTF-8 body.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < FRAME_HEADER_SIZE {
            return Err(FrameError::TooShort(bytes.len()));
        }

        let tag = bytes[0];
        let sequence = SequenceBit::try_from(bytes[1]).map_err(FrameError::InvalidSequenceBit)?;
        let checksum = bytes[2];
        let body = std::str::from_utf8(&bytes[FRAME_HEADER_SIZE..])
            .map_err(|_| FrameError::InvalidUtf8)?
            .to_string();

        trace!(tag, %sequence, checksum, body_len = body.len(), "decoded frame");

        Ok(Self {
            tag,
            sequence,
            checksum,
            body,
        })
    }

    /// Recomputes the LRC over the body.
    pub fn computed_checksum(&self) -> u8 {
        lrc(self.body.as_bytes())
    }

    /// `true` when the carried checksum matches the body.
    pub fn checksum_matches(&self) -> bool {
        self.checksum == self.computed_checksum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
