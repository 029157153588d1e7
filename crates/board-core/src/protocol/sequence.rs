//! The alternating sequence bit carried by every frame.
//!
//! # What is an alternating bit? (for beginners)
//!
//! In a stop-and-wait protocol only one request is ever outstanding.  The
//! receiver then only needs to tell two situations apart:
//!
//! - **A fresh request** – the client has moved on to the next exchange.
//! - **A retransmission** – the client did not see the previous answer and
//!   is asking again.
//!
//! One bit is enough for that.  The client starts at `0`, keeps the bit fixed
//! while it retransmits, and flips it after each successful round trip.  An
//! acknowledgment carrying the *other* bit must belong to an earlier exchange
//! and is ignored.
//!
//! If requests were ever pipelined on one channel, a single bit would no
//! longer be enough and the sequence space would have to grow.

use std::fmt;

/// A one-bit sequence number, rendered on the wire as ASCII `'0'` or `'1'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SequenceBit {
    /// ASCII `'0'`; the value every new channel starts with.
    #[default]
    Zero,
    /// ASCII `'1'`.
    One,
}

impl SequenceBit {
    /// Returns the opposite bit.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SequenceBit::Zero => SequenceBit::One,
            SequenceBit::One => SequenceBit::Zero,
        }
    }

    /// Flips the bit in place.
    pub fn toggle(&mut self) {
        *self = self.toggled();
    }

    /// The ASCII byte written into the frame.
    pub fn as_ascii(self) -> u8 {
        match self {
            SequenceBit::Zero => b'0',
            SequenceBit::One => b'1',
        }
    }
}

impl TryFrom<u8> for SequenceBit {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            b'0' => Ok(SequenceBit::Zero),
            b'1' => Ok(SequenceBit::One),
            other => Err(other),
        }
    }
}

impl fmt::Display for SequenceBit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(self.as_ascii()))
    }
}
