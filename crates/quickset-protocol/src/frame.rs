//! Stream framing for received bytes.
//!
//! The mount answers a command with a single ACK (or NACK) byte followed by
//! a response frame:
//!
//! ```text
//! +-----+-----+--------------------+-----+
//! | ACK | STX | escaped body bytes | ETX |
//! +-----+-----+--------------------+-----+
//! ```
//!
//! A serial read hands back arbitrary chunks of that stream. [`FrameReader`]
//! accumulates chunks and yields acknowledgements and complete STX..ETX
//! frames as they become available; a yielded frame can go straight into
//! [`Protocol::decode_packet`].
//!
//! [`Protocol::decode_packet`]: crate::Protocol::decode_packet

use bytes::{Buf, BytesMut};

use crate::constants::{ACK, ETX, NACK, STX};

/// Initial capacity of the accumulation buffer.
const READ_BUFFER_CAPACITY: usize = 64;

/// Events produced by the frame reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireEvent {
    /// The mount acknowledged the last packet.
    Ack,
    /// The mount rejected the last packet.
    Nack,
    /// A complete frame, delimiters included.
    Frame(Vec<u8>),
}

/// Accumulates received bytes and splits out acknowledgements and frames.
///
/// Bytes that arrive outside a frame and are not ACK, NACK, or STX are line
/// noise and get discarded. Escaping guarantees a body never contains a raw
/// ETX, so the end-of-frame scan cannot cut a frame short.
#[derive(Debug, Default)]
pub struct FrameReader {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
}

impl FrameReader {
    /// Create a new frame reader.
    pub fn new() -> Self {
        FrameReader {
            buffer: BytesMut::with_capacity(READ_BUFFER_CAPACITY),
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to take the next event from the buffer.
    ///
    /// Returns `None` when more data is needed.
    pub fn next_event(&mut self) -> Option<WireEvent> {
        // Drop garbage until a byte we can act on.
        let mut discarded = 0;
        while !self.buffer.is_empty() && !matches!(self.buffer[0], ACK | NACK | STX) {
            self.buffer.advance(1);
            discarded += 1;
        }
        if discarded > 0 {
            log::debug!("discarded {discarded} bytes of line noise");
        }

        match self.buffer.first() {
            Some(&ACK) => {
                self.buffer.advance(1);
                Some(WireEvent::Ack)
            }
            Some(&NACK) => {
                self.buffer.advance(1);
                Some(WireEvent::Nack)
            }
            Some(&STX) => {
                let end = self.buffer.iter().position(|&byte| byte == ETX)?;
                let frame = self.buffer.split_to(end + 1).to_vec();
                Some(WireEvent::Frame(frame))
            }
            _ => None,
        }
    }

    /// Number of buffered bytes not yet consumed.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Drop any buffered bytes.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_then_frame() {
        let mut reader = FrameReader::new();
        reader.push(&[0x06, 0x02, 0x31, 0x31, 0x03]);

        assert_eq!(reader.next_event(), Some(WireEvent::Ack));
        assert_eq!(
            reader.next_event(),
            Some(WireEvent::Frame(vec![0x02, 0x31, 0x31, 0x03]))
        );
        assert_eq!(reader.next_event(), None);
    }

    #[test]
    fn test_nack() {
        let mut reader = FrameReader::new();
        reader.push(&[0x15]);
        assert_eq!(reader.next_event(), Some(WireEvent::Nack));
    }

    #[test]
    fn test_partial_frame_waits_for_etx() {
        let mut reader = FrameReader::new();

        reader.push(&[0x02, 0x35]);
        assert_eq!(reader.next_event(), None);
        assert_eq!(reader.buffered_len(), 2);

        reader.push(&[0x35, 0x03]);
        assert_eq!(
            reader.next_event(),
            Some(WireEvent::Frame(vec![0x02, 0x35, 0x35, 0x03]))
        );
        assert_eq!(reader.buffered_len(), 0);
    }

    #[test]
    fn test_garbage_before_sync_is_discarded() {
        let mut reader = FrameReader::new();
        reader.push(&[0xFF, 0x00, 0x06, 0x02, 0x35, 0x35, 0x03]);

        assert_eq!(reader.next_event(), Some(WireEvent::Ack));
        assert_eq!(
            reader.next_event(),
            Some(WireEvent::Frame(vec![0x02, 0x35, 0x35, 0x03]))
        );
    }

    #[test]
    fn test_multiple_frames_in_one_push() {
        let mut reader = FrameReader::new();
        reader.push(&[0x02, 0x35, 0x35, 0x03, 0x02, 0x31, 0x31, 0x03]);

        assert_eq!(
            reader.next_event(),
            Some(WireEvent::Frame(vec![0x02, 0x35, 0x35, 0x03]))
        );
        assert_eq!(
            reader.next_event(),
            Some(WireEvent::Frame(vec![0x02, 0x31, 0x31, 0x03]))
        );
        assert_eq!(reader.next_event(), None);
    }

    #[test]
    fn test_escaped_etx_does_not_end_a_frame() {
        // Body byte 0x03 goes over the wire as 1B 83, so the scan only
        // stops at the real delimiter.
        let mut reader = FrameReader::new();
        reader.push(&[0x02, 0x34, 0x1B, 0x83, 0x37, 0x03]);

        assert_eq!(
            reader.next_event(),
            Some(WireEvent::Frame(vec![0x02, 0x34, 0x1B, 0x83, 0x37, 0x03]))
        );
    }

    #[test]
    fn test_clear() {
        let mut reader = FrameReader::new();
        reader.push(&[0x02, 0x35]);
        reader.clear();
        assert_eq!(reader.buffered_len(), 0);
        assert_eq!(reader.next_event(), None);
    }
}
