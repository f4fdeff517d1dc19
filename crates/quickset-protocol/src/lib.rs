//! QuickSet Pan-Tilt Serial Protocol
//!
//! This crate provides types and utilities for assembling and decoding the
//! framed packets used by QuickSet QPT-series pan-tilt mounts over a serial
//! link. Two protocol variants are supported:
//!
//! - [`Pthr90`]: the PTHR-90 variant, which frames packets without a device
//!   address (one mount per link)
//! - [`Ptcr20`]: the PTCR-20 variant, which carries a one-byte device
//!   identity so several mounts can share one link
//!
//! Both variants share the same command set and differ only in framing.
//! Transport concerns (opening the serial port, read timeouts, command
//! retries) are left to the caller; the codec exchanges complete byte
//! frames, and [`FrameReader`] splits a raw receive stream into them.
//!
//! # Example
//!
//! ```rust
//! use quickset_protocol::{Command, Protocol, Pthr90};
//!
//! let protocol = Pthr90::new();
//! let frame = protocol.assemble_packet(&Command::Home).unwrap();
//! assert_eq!(frame, [0x02, 0x35, 0x35, 0x03]);
//! ```

mod codec;
mod commands;
mod constants;
mod error;
mod frame;
mod protocol;
mod responses;

pub use codec::*;
pub use commands::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use protocol::*;
pub use responses::*;
