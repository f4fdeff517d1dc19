//! Commands understood by the pan-tilt mount.

use crate::codec::encode_int;
use crate::constants::*;
use crate::error::ProtocolError;

/// Commands that can be sent to the pan-tilt mount.
///
/// The PTHR-90 and PTCR-20 share this command set; the variants differ only
/// in how the command bytes are framed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Query the mount's general, pan, and tilt status.
    GetStatus,

    /// Move to absolute coordinates.
    MoveAbsolute {
        /// Pan destination in degrees, -360.0..=360.0, 0.1° resolution.
        /// `None` (or the literal 999.9) holds the current pan position.
        pan: Option<f64>,
        /// Tilt destination in degrees, -180.0..=180.0, 0.1° resolution.
        /// `None` (or the literal 999.9) holds the current tilt position.
        tilt: Option<f64>,
    },

    /// Move by a delta from the current coordinates.
    MoveDelta {
        /// Pan increment in degrees. `None` keeps the pan axis still.
        pan: Option<f64>,
        /// Tilt increment in degrees. `None` keeps the tilt axis still.
        tilt: Option<f64>,
    },

    /// Move to (0, 0).
    Home,

    /// Clear timeout, direction, and over-current hard faults.
    FaultReset,

    /// Query the communication timeout.
    GetCommTimeout,

    /// Set the communication timeout.
    SetCommTimeout {
        /// Timeout in seconds, 0..=120. 0 disables the timeout.
        timeout: u8,
    },
}

impl Command {
    /// Get the command kind (the fieldless name/opcode mirror).
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::GetStatus => CommandKind::GetStatus,
            Command::MoveAbsolute { .. } => CommandKind::MoveAbsolute,
            Command::MoveDelta { .. } => CommandKind::MoveDelta,
            Command::Home => CommandKind::Home,
            Command::FaultReset => CommandKind::FaultReset,
            Command::GetCommTimeout => CommandKind::GetCommTimeout,
            Command::SetCommTimeout { .. } => CommandKind::SetCommTimeout,
        }
    }

    /// Get the wire opcode for this command.
    pub fn opcode(&self) -> u8 {
        self.kind().opcode()
    }

    /// Assemble the data bytes for this command.
    ///
    /// Commands without arguments produce an empty buffer. Argument
    /// validation happens here, before any bytes are committed to a frame.
    pub fn encode_data(&self) -> Result<Vec<u8>, ProtocolError> {
        match self {
            Command::GetStatus | Command::Home => Ok(Vec::new()),

            Command::MoveAbsolute { pan, tilt } => {
                let pan = pan.unwrap_or(HOLD_POSITION);
                let tilt = tilt.unwrap_or(HOLD_POSITION);
                check_degrees("pan", pan, PAN_DEGREES_MIN, PAN_DEGREES_MAX, true)?;
                check_degrees("tilt", tilt, TILT_DEGREES_MIN, TILT_DEGREES_MAX, true)?;
                encode_coordinates(pan, tilt)
            }

            Command::MoveDelta { pan, tilt } => {
                let pan = pan.unwrap_or(0.0);
                let tilt = tilt.unwrap_or(0.0);
                check_degrees("pan", pan, PAN_DEGREES_MIN, PAN_DEGREES_MAX, false)?;
                check_degrees("tilt", tilt, TILT_DEGREES_MIN, TILT_DEGREES_MAX, false)?;
                encode_coordinates(pan, tilt)
            }

            Command::FaultReset => {
                // Reset flag high, all four jog speeds (pan, tilt, zoom,
                // focus) zeroed.
                Ok(vec![FAULT_RESET_FLAG, 0, 0, 0, 0])
            }

            Command::GetCommTimeout => Ok(vec![COMM_TIMEOUT_QUERY]),

            Command::SetCommTimeout { timeout } => {
                if *timeout > COMM_TIMEOUT_MAX_SECS {
                    return Err(ProtocolError::InvalidArgument(format!(
                        "timeout must be 0..={COMM_TIMEOUT_MAX_SECS} seconds, got {timeout}"
                    )));
                }
                Ok(vec![*timeout])
            }
        }
    }
}

/// Validate a coordinate against its axis limits.
///
/// The hold sentinel sits outside the limits and is only legal where the
/// command defines it (absolute moves).
fn check_degrees(
    axis: &'static str,
    value: f64,
    min: f64,
    max: f64,
    allow_hold: bool,
) -> Result<(), ProtocolError> {
    if (min..=max).contains(&value) || (allow_hold && value == HOLD_POSITION) {
        Ok(())
    } else {
        Err(ProtocolError::InvalidArgument(format!(
            "{axis} must be {min}..={max} degrees, got {value}"
        )))
    }
}

/// Convert pan/tilt degrees to wire bytes, pan first then tilt.
///
/// Coordinates are sent in tenths of a degree, truncated toward zero.
fn encode_coordinates(pan: f64, tilt: f64) -> Result<Vec<u8>, ProtocolError> {
    let pan_bytes = encode_int(degrees_to_tenths(pan))?;
    let tilt_bytes = encode_int(degrees_to_tenths(tilt))?;

    let mut data = Vec::with_capacity(4);
    data.extend_from_slice(&pan_bytes);
    data.extend_from_slice(&tilt_bytes);
    Ok(data)
}

fn degrees_to_tenths(degrees: f64) -> i32 {
    (degrees * 10.0) as i32
}

/// Fieldless command identifiers: the name/opcode table both variants share.
///
/// [`Command`] carries the per-command arguments; this type is the registry
/// surface for code that addresses commands by name or resolves them from a
/// received opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `get_status` (0x31).
    GetStatus,
    /// `move_absolute` (0x33).
    MoveAbsolute,
    /// `move_delta` (0x34).
    MoveDelta,
    /// `home` (0x35).
    Home,
    /// `fault_reset` (0x31).
    FaultReset,
    /// `get_comm_timeout` (0x96).
    GetCommTimeout,
    /// `set_comm_timeout` (0x96).
    SetCommTimeout,
}

impl CommandKind {
    /// Every command in the set.
    pub const ALL: [CommandKind; 7] = [
        CommandKind::GetStatus,
        CommandKind::MoveAbsolute,
        CommandKind::MoveDelta,
        CommandKind::Home,
        CommandKind::FaultReset,
        CommandKind::GetCommTimeout,
        CommandKind::SetCommTimeout,
    ];

    /// Look up a command by its registry name.
    pub fn from_name(name: &str) -> Result<CommandKind, ProtocolError> {
        match name {
            "get_status" => Ok(CommandKind::GetStatus),
            "move_absolute" => Ok(CommandKind::MoveAbsolute),
            "move_delta" => Ok(CommandKind::MoveDelta),
            "home" => Ok(CommandKind::Home),
            "fault_reset" => Ok(CommandKind::FaultReset),
            "get_comm_timeout" => Ok(CommandKind::GetCommTimeout),
            "set_comm_timeout" => Ok(CommandKind::SetCommTimeout),
            _ => Err(ProtocolError::UnknownCommand(name.to_string())),
        }
    }

    /// Resolve a received opcode to the command it answers.
    ///
    /// Opcode 0x31 is shared between get-status and fault-reset; the two are
    /// told apart by the body, since a fault-reset acknowledgement carries no
    /// data. 0x96 responses report the current timeout either way, so they
    /// resolve to the query form.
    pub fn from_opcode(opcode: u8, data: &[u8]) -> Result<CommandKind, ProtocolError> {
        match opcode {
            CMD_GET_STATUS if data.is_empty() => Ok(CommandKind::FaultReset),
            CMD_GET_STATUS => Ok(CommandKind::GetStatus),
            CMD_MOVE_ABSOLUTE => Ok(CommandKind::MoveAbsolute),
            CMD_MOVE_DELTA => Ok(CommandKind::MoveDelta),
            CMD_HOME => Ok(CommandKind::Home),
            CMD_COMM_TIMEOUT => Ok(CommandKind::GetCommTimeout),
            _ => Err(ProtocolError::UnknownOpcode(opcode)),
        }
    }

    /// The registry name for this command.
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::GetStatus => "get_status",
            CommandKind::MoveAbsolute => "move_absolute",
            CommandKind::MoveDelta => "move_delta",
            CommandKind::Home => "home",
            CommandKind::FaultReset => "fault_reset",
            CommandKind::GetCommTimeout => "get_comm_timeout",
            CommandKind::SetCommTimeout => "set_comm_timeout",
        }
    }

    /// The wire opcode for this command.
    pub fn opcode(&self) -> u8 {
        match self {
            CommandKind::GetStatus => CMD_GET_STATUS,
            CommandKind::MoveAbsolute => CMD_MOVE_ABSOLUTE,
            CommandKind::MoveDelta => CMD_MOVE_DELTA,
            CommandKind::Home => CMD_HOME,
            CommandKind::FaultReset => CMD_FAULT_RESET,
            CommandKind::GetCommTimeout | CommandKind::SetCommTimeout => CMD_COMM_TIMEOUT,
        }
    }
}
