//! Longitudinal redundancy check (LRC) used to detect corrupted frames.
//!
//! # What is an LRC? (for beginners)
//!
//! An LRC is the simplest possible checksum: XOR every byte of the message
//! together and keep the single resulting byte.  XOR has two useful
//! properties here:
//!
//! - **Determinism** – the same body always yields the same byte, so the
//!   receiver can recompute it and compare.
//! - **Single-bit detection** – flipping any one bit of the body flips the
//!   same bit of the checksum, so every single-bit error is caught.
//!
//! It does *not* catch two errors that cancel out in the same bit column, but
//! it matches what the message board server computes, which is what matters
//! for interoperability.

/// Computes the XOR of every byte in `bytes`.
///
/// An empty slice yields `0`.
///
/// # Examples
///
/// ```rust
/// use board_core::protocol::checksum::lrc;
///
/// assert_eq!(lrc(b"GET"), 0x56);
/// assert_eq!(lrc(b""), 0);
/// ```
pub fn lrc(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc ^ b)
}
