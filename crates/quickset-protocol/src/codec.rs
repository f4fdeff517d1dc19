//! Low-level byte transforms shared by both protocol variants.
//!
//! Three independent pieces live here: the 16-bit integer codec used for
//! pan/tilt coordinates, the XOR longitudinal redundancy check, and the
//! control-character escape codec. Each function takes its input by
//! reference and returns a fresh buffer, so the packet pipeline composes
//! from pure stages.

use crate::constants::*;
use crate::error::ProtocolError;

/// Encode an integer as 16-bit signed two's-complement little-endian bytes.
///
/// Coordinates travel in tenths of a degree, so the full pan range of
/// ±3600 tenths fits comfortably. Values outside `i16` are rejected rather
/// than truncated.
pub fn encode_int(value: i32) -> Result<[u8; 2], ProtocolError> {
    let value = i16::try_from(value).map_err(|_| ProtocolError::OutOfRange { value })?;
    Ok(value.to_le_bytes())
}

/// Decode exactly two little-endian bytes as a signed integer.
pub fn decode_int(bytes: &[u8]) -> Result<i16, ProtocolError> {
    match bytes {
        [lo, hi] => Ok(i16::from_le_bytes([*lo, *hi])),
        _ => Err(ProtocolError::InvalidLength {
            expected: 2,
            actual: bytes.len(),
        }),
    }
}

/// Compute the XOR longitudinal redundancy check over a byte range.
///
/// The checksummed range starts at the opcode and ends with the last data
/// byte; the identity byte and the frame delimiters are never included.
/// An empty range yields 0.
pub fn compute_lrc(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |lrc, byte| lrc ^ byte)
}

/// Check a byte range against its claimed checksum.
pub fn verify_lrc(bytes: &[u8], claimed: u8) -> bool {
    compute_lrc(bytes) == claimed
}

/// Whether a byte collides with one of the reserved control characters.
pub fn is_control_char(byte: u8) -> bool {
    CONTROL_CHARS.contains(&byte)
}

/// Escape control-character collisions in a packet body.
///
/// Every byte equal to a control character is replaced with [`ESC`]
/// followed by the byte with bit 7 set, so nothing between the frame
/// delimiters can be mistaken for one.
pub fn escape(payload: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(payload.len());

    for &byte in payload {
        if is_control_char(byte) {
            escaped.push(ESC);
            escaped.push(byte | ESCAPE_MASK);
        } else {
            escaped.push(byte);
        }
    }

    escaped
}

/// Remove escape sequences from a received packet body.
///
/// A bare [`ESC`] is consumed and the next byte is emitted with bit 7
/// cleared; the escape state covers exactly one byte. A body ending on a
/// bare [`ESC`] is malformed.
pub fn unescape(payload: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let mut unescaped = Vec::with_capacity(payload.len());
    let mut found_esc = false;

    for &byte in payload {
        if byte == ESC && !found_esc {
            // Drop the ESC itself and unescape the byte that follows.
            found_esc = true;
            continue;
        }

        if found_esc {
            unescaped.push(byte & !ESCAPE_MASK);
            found_esc = false;
        } else {
            unescaped.push(byte);
        }
    }

    if found_esc {
        return Err(ProtocolError::TruncatedEscape);
    }

    Ok(unescaped)
}
