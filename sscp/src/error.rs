// sscp-rs/sscp/src/error.rs

use thiserror::Error;

/// Crate-wide error type. One flat taxonomy: local validation errors,
/// transport errors, protocol errors, and statuses reported by the
/// coupler itself all travel through the same channel.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("command too long: {actual} bytes (max {max})")]
    CommandTooLong { actual: usize, max: usize },
    #[error("response too long: header declares {actual} bytes (max {max})")]
    ResponseTooLong { actual: usize, max: usize },

    #[error("internal failure: {0}")]
    InternalFailure(&'static str),

    // Serial backend is an optional dependency, same pattern as the
    // protocol/crypto layers being usable without a tty stack.
    #[cfg(feature = "serial")]
    #[error("port not available: {0}")]
    CommNotAvailable(#[from] serialport::Error),
    #[cfg(not(feature = "serial"))]
    #[error("port not available: {0}")]
    CommNotAvailable(String),

    #[error("port not open")]
    CommNotOpen,
    #[error("failed to configure the port: {0}")]
    CommControlFailed(std::io::Error),
    #[error("failed to send: {0}")]
    CommSendFailed(std::io::Error),
    #[error("failed to receive: {0}")]
    CommRecvFailed(std::io::Error),
    #[error("device stopped transmitting mid-frame")]
    CommRecvStopped,
    #[error("no response from device")]
    CommRecvMute,

    #[error("wrong response length: {0} bytes")]
    WrongResponseLength(usize),
    #[error("wrong CRC in response: expected {expected:#06x}, got {actual:#06x}")]
    WrongResponseCrc { expected: u16, actual: u16 },
    #[error("wrong HMAC in response")]
    WrongResponseSignature,
    #[error("response counter {received} not above current {current}")]
    WrongResponseCounter { current: u32, received: u32 },
    #[error("type in response footer does not match command")]
    WrongResponseType { expected: u8, actual: u8 },
    #[error("command echo in response does not match: expected {expected:#06x}, got {actual:#06x}")]
    WrongResponseCommand { expected: u16, actual: u16 },
    #[error("response length header does not match response size")]
    WrongResponseFormat,

    #[error("unsupported response status {0:#04x}")]
    UnsupportedResponseStatus(u8),
    #[error("unsupported value in response")]
    UnsupportedResponseValue,
    #[error("unsupported response length: {0} bytes")]
    UnsupportedResponseLength(usize),

    /// Nonzero status byte reported by the coupler in a secure response.
    /// This is the "device said no" channel: the exchange itself was
    /// well-formed, the reader rejected the operation.
    #[error("coupler returned status {0:#04x}")]
    ReaderStatus(u8),

    #[error("session counter exhausted, re-authenticate")]
    CounterExhausted,

    #[error("no card in field")]
    NfcCardAbsent,
    #[error("card mute or removed")]
    NfcCardMuteOrRemoved,
    #[error("card communication error")]
    NfcCardCommError,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for the two transport timeouts the secure exchanger is
    /// allowed to recover from by resending.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::CommRecvMute | Error::CommRecvStopped)
    }
}
