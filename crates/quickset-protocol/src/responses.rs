//! Responses from the pan-tilt mount.

use crate::commands::CommandKind;
use crate::error::ProtocolError;

/// Parsed response payloads.
///
/// Only the empty acknowledgement body is wire-specified today. The status,
/// move, and timeout response layouts remain undocumented; parsing one fails
/// with [`ProtocolError::NotImplemented`] so a caller cannot mistake "layout
/// unknown" for "successfully parsed empty response".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Command acknowledged; the response carries no data.
    Empty,
}

/// A decoded response packet: the command it answers and its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPacket {
    /// The command this response belongs to.
    pub command: CommandKind,
    /// The parsed response payload.
    pub response: Response,
}

/// Parse the response body for a command.
pub fn parse_response(command: CommandKind, data: &[u8]) -> Result<Response, ProtocolError> {
    match command {
        CommandKind::Home | CommandKind::FaultReset => {
            if !data.is_empty() {
                log::debug!(
                    "ignoring {} unexpected data bytes in {} response",
                    data.len(),
                    command.name()
                );
            }
            Ok(Response::Empty)
        }

        CommandKind::GetStatus
        | CommandKind::MoveAbsolute
        | CommandKind::MoveDelta
        | CommandKind::GetCommTimeout
        | CommandKind::SetCommTimeout => Err(ProtocolError::NotImplemented(command.name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_acknowledgements_parse() {
        assert_eq!(
            parse_response(CommandKind::Home, &[]).unwrap(),
            Response::Empty
        );
        assert_eq!(
            parse_response(CommandKind::FaultReset, &[]).unwrap(),
            Response::Empty
        );
    }

    #[test]
    fn test_unspecified_layouts_are_not_implemented() {
        assert_eq!(
            parse_response(CommandKind::GetStatus, &[0x01, 0x02]),
            Err(ProtocolError::NotImplemented("get_status"))
        );
        assert_eq!(
            parse_response(CommandKind::MoveAbsolute, &[0x00; 4]),
            Err(ProtocolError::NotImplemented("move_absolute"))
        );
        assert_eq!(
            parse_response(CommandKind::GetCommTimeout, &[0x1E]),
            Err(ProtocolError::NotImplemented("get_comm_timeout"))
        );
    }
}
