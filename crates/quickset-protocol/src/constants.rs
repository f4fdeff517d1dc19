//! Protocol constants
//!
//! These constants define the control characters, command opcodes, and
//! argument limits used by the QuickSet pan-tilt serial protocols. The
//! values come from the QPT communication reference; the PTHR-90 and
//! PTCR-20 variants share all of them.

// ============================================================================
// Control Characters
// ============================================================================

/// Start-of-frame delimiter.
pub const STX: u8 = 0x02;
/// End-of-frame delimiter.
pub const ETX: u8 = 0x03;
/// Acknowledge byte sent by the mount before a response frame.
pub const ACK: u8 = 0x06;
/// Negative acknowledge; the mount rejected the last packet.
pub const NACK: u8 = 0x15;
/// Escape byte prefixing any body byte that collides with a control value.
pub const ESC: u8 = 0x1B;

/// The reserved control characters. Body bytes equal to any of these must
/// be escaped before transmission.
pub const CONTROL_CHARS: [u8; 5] = [STX, ETX, ACK, NACK, ESC];

/// Bit set on (and cleared from) the byte following an [`ESC`].
/// Bit indexing starts at 0 in the QuickSet documentation, so this is
/// "bit 7".
pub const ESCAPE_MASK: u8 = 0b1000_0000;

// ============================================================================
// Command Opcodes
// ============================================================================

/// Query the mount's general, pan, and tilt status.
pub const CMD_GET_STATUS: u8 = 0x31;
/// Clear hard faults. Shares 0x31 with get-status per the QPT reference:
/// the mount tells the two apart by the data bytes, not the opcode.
pub const CMD_FAULT_RESET: u8 = 0x31;
/// Move to absolute pan/tilt coordinates.
pub const CMD_MOVE_ABSOLUTE: u8 = 0x33;
/// Move by a pan/tilt delta from the current coordinates.
pub const CMD_MOVE_DELTA: u8 = 0x34;
/// Move to (0, 0).
pub const CMD_HOME: u8 = 0x35;
/// Get or set the communication timeout; the query flag selects which.
pub const CMD_COMM_TIMEOUT: u8 = 0x96;

// ============================================================================
// Command Arguments
// ============================================================================

/// Minimum pan coordinate, in degrees.
pub const PAN_DEGREES_MIN: f64 = -360.0;
/// Maximum pan coordinate, in degrees.
pub const PAN_DEGREES_MAX: f64 = 360.0;
/// Minimum tilt coordinate, in degrees.
pub const TILT_DEGREES_MIN: f64 = -180.0;
/// Maximum tilt coordinate, in degrees.
pub const TILT_DEGREES_MAX: f64 = 180.0;
/// Coordinate sentinel meaning "hold this axis where it is".
pub const HOLD_POSITION: f64 = 999.9;
/// Maximum communication timeout, in seconds. 0 disables the timeout.
pub const COMM_TIMEOUT_MAX_SECS: u8 = 120;
/// Query flag (bit 7) for the communication-timeout command.
pub const COMM_TIMEOUT_QUERY: u8 = 0b1000_0000;
/// Reset flag for the first fault-reset data byte.
pub const FAULT_RESET_FLAG: u8 = 0b0000_0001;
