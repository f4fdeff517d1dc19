//! Packet framing for the two protocol variants.
//!
//! Both variants assemble the same `opcode + data + LRC` body and differ
//! only in identity handling:
//!
//! ```text
//! PTHR-90:  STX | escaped( opcode data... lrc )          | ETX
//! PTCR-20:  STX | escaped( identity opcode data... lrc ) | ETX
//! ```
//!
//! The identity byte is inserted after the LRC is computed and before the
//! body is escaped, so it is never checksummed but is escaped like any
//! other body byte.

use crate::codec::{compute_lrc, escape, unescape, verify_lrc};
use crate::commands::{Command, CommandKind};
use crate::constants::{ETX, STX};
use crate::error::ProtocolError;
use crate::responses::{parse_response, DecodedPacket};

/// A QuickSet protocol variant: turns commands into wire frames and
/// received frames back into parsed responses.
///
/// The codec holds no session state. Every call stands alone, and a failed
/// call leaves the variant fully usable for the next one.
pub trait Protocol {
    /// Assemble the complete wire frame for a command.
    fn assemble_packet(&self, command: &Command) -> Result<Vec<u8>, ProtocolError>;

    /// Decode a complete received frame into the command it answers and
    /// the parsed response payload.
    fn decode_packet(&self, frame: &[u8]) -> Result<DecodedPacket, ProtocolError>;
}

/// The PTHR-90 protocol variant (unaddressed).
///
/// Frames carry no device identity, so only one mount can sit on the link.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pthr90;

impl Pthr90 {
    /// Create a new PTHR-90 codec.
    pub fn new() -> Self {
        Pthr90
    }
}

impl Protocol for Pthr90 {
    fn assemble_packet(&self, command: &Command) -> Result<Vec<u8>, ProtocolError> {
        let body = assemble_body(command)?;
        Ok(wrap_frame(&body))
    }

    fn decode_packet(&self, frame: &[u8]) -> Result<DecodedPacket, ProtocolError> {
        let body = unwrap_frame(frame)?;
        decode_body(&body)
    }
}

/// The PTCR-20 protocol variant (addressed).
///
/// Every frame carries a one-byte device identity between STX and the
/// opcode, letting several mounts share one physical link.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ptcr20 {
    identity: u8,
}

impl Ptcr20 {
    /// Create a codec addressing the mount with the given identity.
    pub fn new(identity: u8) -> Self {
        Ptcr20 { identity }
    }

    /// The device identity this codec addresses.
    pub fn identity(&self) -> u8 {
        self.identity
    }
}

impl Protocol for Ptcr20 {
    fn assemble_packet(&self, command: &Command) -> Result<Vec<u8>, ProtocolError> {
        let mut body = assemble_body(command)?;
        body.insert(0, self.identity);
        Ok(wrap_frame(&body))
    }

    fn decode_packet(&self, frame: &[u8]) -> Result<DecodedPacket, ProtocolError> {
        let body = unwrap_frame(frame)?;
        let (identity, rest) = body.split_first().ok_or_else(|| {
            ProtocolError::InvalidFraming("body too short for identity byte".to_string())
        })?;

        if *identity != self.identity {
            log::debug!(
                "response identity 0x{identity:02X} does not match ours (0x{:02X})",
                self.identity
            );
        }

        decode_body(rest)
    }
}

/// Assemble the shared `opcode + data + lrc` body for a command.
fn assemble_body(command: &Command) -> Result<Vec<u8>, ProtocolError> {
    let data = command.encode_data()?;

    let mut body = Vec::with_capacity(2 + data.len());
    body.push(command.opcode());
    body.extend_from_slice(&data);

    let lrc = compute_lrc(&body);
    body.push(lrc);

    Ok(body)
}

/// Escape a body and wrap it in the frame delimiters.
fn wrap_frame(body: &[u8]) -> Vec<u8> {
    let escaped = escape(body);

    let mut frame = Vec::with_capacity(escaped.len() + 2);
    frame.push(STX);
    frame.extend_from_slice(&escaped);
    frame.push(ETX);
    frame
}

/// Strip the frame delimiters and undo escaping.
fn unwrap_frame(frame: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    match frame {
        [STX, body @ .., ETX] => unescape(body),
        [] => Err(ProtocolError::InvalidFraming("empty frame".to_string())),
        [first, ..] if *first != STX => Err(ProtocolError::InvalidFraming(format!(
            "frame does not start with STX (got 0x{first:02X})"
        ))),
        _ => Err(ProtocolError::InvalidFraming(
            "frame does not end with ETX".to_string(),
        )),
    }
}

/// Decode an unescaped `opcode + data + lrc` body into a response.
fn decode_body(body: &[u8]) -> Result<DecodedPacket, ProtocolError> {
    let (lrc, checked) = match body {
        [checked @ .., lrc] if !checked.is_empty() => (*lrc, checked),
        _ => {
            return Err(ProtocolError::InvalidFraming(format!(
                "body too short for opcode and checksum ({} bytes)",
                body.len()
            )))
        }
    };

    if !verify_lrc(checked, lrc) {
        return Err(ProtocolError::ChecksumMismatch {
            expected: compute_lrc(checked),
            actual: lrc,
        });
    }

    let (opcode, data) = (checked[0], &checked[1..]);
    let command = CommandKind::from_opcode(opcode, data)?;
    let response = parse_response(command, data)?;

    Ok(DecodedPacket { command, response })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::Response;

    #[test]
    fn test_home_frame_unaddressed() {
        // Opcode 0x35, no data, LRC = 0x35, nothing to escape.
        let frame = Pthr90::new().assemble_packet(&Command::Home).unwrap();
        assert_eq!(frame, [0x02, 0x35, 0x35, 0x03]);
    }

    #[test]
    fn test_move_delta_frame() {
        let frame = Pthr90::new()
            .assemble_packet(&Command::MoveDelta {
                pan: Some(10.0),
                tilt: None,
            })
            .unwrap();
        // Body 34 64 00 00 00 with LRC 0x50.
        assert_eq!(frame, [0x02, 0x34, 0x64, 0x00, 0x00, 0x00, 0x50, 0x03]);
    }

    #[test]
    fn test_body_bytes_are_escaped() {
        let frame = Pthr90::new()
            .assemble_packet(&Command::MoveDelta {
                pan: Some(0.2),
                tilt: None,
            })
            .unwrap();
        // The pan byte 0x02 collides with STX and goes out as 1B 82.
        assert_eq!(
            frame,
            [0x02, 0x34, 0x1B, 0x82, 0x00, 0x00, 0x00, 0x36, 0x03]
        );
    }

    #[test]
    fn test_identity_placement() {
        let unaddressed = Pthr90::new().assemble_packet(&Command::Home).unwrap();
        let addressed = Ptcr20::new(5).assemble_packet(&Command::Home).unwrap();

        // The identity sits right after STX and stays out of the LRC; the
        // rest of the frame matches the unaddressed form byte for byte.
        assert_eq!(addressed, [0x02, 0x05, 0x35, 0x35, 0x03]);
        assert_eq!(addressed[0], unaddressed[0]);
        assert_eq!(addressed[2..], unaddressed[1..]);
    }

    #[test]
    fn test_identity_is_escaped_when_it_collides() {
        // Identity 0x02 collides with STX, so it goes out as 1B 82.
        let frame = Ptcr20::new(0x02).assemble_packet(&Command::Home).unwrap();
        assert_eq!(frame, [0x02, 0x1B, 0x82, 0x35, 0x35, 0x03]);
    }

    #[test]
    fn test_default_identity_is_zero() {
        let frame = Ptcr20::default().assemble_packet(&Command::Home).unwrap();
        assert_eq!(frame, [0x02, 0x00, 0x35, 0x35, 0x03]);
    }

    #[test]
    fn test_assemble_rejects_invalid_arguments() {
        let result = Pthr90::new().assemble_packet(&Command::SetCommTimeout { timeout: 200 });
        assert!(matches!(result, Err(ProtocolError::InvalidArgument(_))));
    }

    #[test]
    fn test_decode_empty_acknowledgement() {
        // A fault-reset acknowledgement: opcode 0x31, no data, LRC 0x31.
        let decoded = Pthr90::new()
            .decode_packet(&[0x02, 0x31, 0x31, 0x03])
            .unwrap();
        assert_eq!(decoded.command, CommandKind::FaultReset);
        assert_eq!(decoded.response, Response::Empty);
    }

    #[test]
    fn test_decode_home_round_trip() {
        let protocol = Pthr90::new();
        let frame = protocol.assemble_packet(&Command::Home).unwrap();
        let decoded = protocol.decode_packet(&frame).unwrap();
        assert_eq!(decoded.command, CommandKind::Home);
        assert_eq!(decoded.response, Response::Empty);
    }

    #[test]
    fn test_decode_addressed_round_trip() {
        let protocol = Ptcr20::new(5);
        let frame = protocol.assemble_packet(&Command::Home).unwrap();
        let decoded = protocol.decode_packet(&frame).unwrap();
        assert_eq!(decoded.command, CommandKind::Home);
    }

    #[test]
    fn test_decode_unescapes_before_verifying() {
        // Identity 0x02 arrives escaped; decoding must still find the
        // opcode and checksum behind it.
        let protocol = Ptcr20::new(0x02);
        let frame = protocol.assemble_packet(&Command::Home).unwrap();
        let decoded = protocol.decode_packet(&frame).unwrap();
        assert_eq!(decoded.command, CommandKind::Home);
    }

    #[test]
    fn test_decode_status_response_is_not_implemented() {
        // Opcode 0x31 with data resolves to get_status, whose layout is
        // still undocumented.
        let body = [0x31, 0x40, 0x00];
        let lrc = compute_lrc(&body);
        let frame = [0x02, 0x31, 0x40, 0x00, lrc, 0x03];
        assert_eq!(
            Pthr90::new().decode_packet(&frame),
            Err(ProtocolError::NotImplemented("get_status"))
        );
    }

    #[test]
    fn test_decode_rejects_bad_checksum() {
        assert_eq!(
            Pthr90::new().decode_packet(&[0x02, 0x35, 0x36, 0x03]),
            Err(ProtocolError::ChecksumMismatch {
                expected: 0x35,
                actual: 0x36
            })
        );
    }

    #[test]
    fn test_decode_rejects_bad_framing() {
        let protocol = Pthr90::new();

        assert!(matches!(
            protocol.decode_packet(&[]),
            Err(ProtocolError::InvalidFraming(_))
        ));
        assert!(matches!(
            protocol.decode_packet(&[0x35, 0x35, 0x03]),
            Err(ProtocolError::InvalidFraming(_))
        ));
        assert!(matches!(
            protocol.decode_packet(&[0x02, 0x35, 0x35]),
            Err(ProtocolError::InvalidFraming(_))
        ));
        // Delimiters with nothing between them.
        assert!(matches!(
            protocol.decode_packet(&[0x02, 0x03]),
            Err(ProtocolError::InvalidFraming(_))
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_escape() {
        assert_eq!(
            Pthr90::new().decode_packet(&[0x02, 0x35, 0x1B, 0x03]),
            Err(ProtocolError::TruncatedEscape)
        );
    }

    #[test]
    fn test_decode_rejects_unknown_opcode() {
        let body = [0x7F, 0x01];
        let lrc = compute_lrc(&body);
        let frame = [0x02, 0x7F, 0x01, lrc, 0x03];
        assert_eq!(
            Pthr90::new().decode_packet(&frame),
            Err(ProtocolError::UnknownOpcode(0x7F))
        );
    }
}
