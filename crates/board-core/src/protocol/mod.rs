//! Protocol module containing the checksum, sequence bit, frame codec, and
//! request/response body types.

pub mod checksum;
pub mod frame;
pub mod messages;
pub mod sequence;

pub use checksum::lrc;
pub use frame::{Frame, FrameError};
pub use messages::*;
pub use sequence::SequenceBit;
