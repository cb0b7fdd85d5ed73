// sscp-rs/sscp/src/transport/traits.rs

use std::time::Duration;

use crate::types::Baudrate;
use crate::Result;

/// Transport trait abstracts the byte stream away from protocol logic.
///
/// SSCP receive timing is two-level: the budget for the *first* byte of
/// a read is distinct from the budget for every byte after it, so both
/// are passed per call rather than configured once.
pub trait Transport {
    /// Send raw bytes to the coupler
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Read exactly `buf.len()` bytes.
    ///
    /// Returns `CommRecvMute` when no byte at all arrived within
    /// `first_byte`, and `CommRecvStopped` when the stream went silent
    /// for `inter_byte` after delivering part of the data.
    fn receive_exact(
        &mut self,
        buf: &mut [u8],
        first_byte: Duration,
        inter_byte: Duration,
    ) -> Result<()>;

    /// Reconfigure the line speed. Default is an error so test doubles
    /// that never reconfigure don't have to implement it.
    fn set_baudrate(&mut self, _baudrate: Baudrate) -> Result<()> {
        Err(crate::Error::CommNotOpen)
    }
}
