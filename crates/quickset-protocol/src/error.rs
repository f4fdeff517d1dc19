//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when assembling or decoding packets.
///
/// Every failure is surfaced to the caller; nothing is retried or recovered
/// at this layer. A failed call leaves the codec fully usable for the next
/// one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// No command with this name exists in the command set.
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    /// Unknown opcode in a received packet.
    #[error("unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    /// A command argument is outside its allowed range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Integer does not fit in the 16-bit wire representation.
    #[error("value {value} does not fit in a 16-bit signed integer")]
    OutOfRange {
        /// The value that overflowed.
        value: i32,
    },

    /// Wrong number of bytes for a fixed-width field.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },

    /// Frame delimiters are missing or misplaced.
    #[error("invalid framing: {0}")]
    InvalidFraming(String),

    /// Packet ends in the middle of an escape sequence.
    #[error("truncated escape sequence at end of packet")]
    TruncatedEscape,

    /// Received checksum does not match the one computed over the packet.
    #[error("checksum mismatch: computed 0x{expected:02X}, packet claims 0x{actual:02X}")]
    ChecksumMismatch {
        /// Checksum computed over the received bytes.
        expected: u8,
        /// Checksum carried by the packet.
        actual: u8,
    },

    /// The response body layout for this command is not defined yet.
    #[error("response parsing for {0:?} is not implemented")]
    NotImplemented(&'static str),
}
