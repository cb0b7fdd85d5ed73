// sscp-rs/sscp/src/prelude.rs

pub use crate::context::Coupler;
pub use crate::context::{Plain, Secure, Statistics};
pub use crate::secure::{GuardGate, Mode, SelfTestVectors, SessionKeys};
pub use crate::transport::{MockTransport, Transport};
#[cfg(feature = "serial")]
pub use crate::transport::SerialTransport;
pub use crate::{
    Ats, Baudrate, CommandHeader, Error, ReaderInfo, Result, TagInfo, Uid,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, parse_hex};
