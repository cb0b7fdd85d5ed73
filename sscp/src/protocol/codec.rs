// sscp-rs/sscp/src/protocol/codec.rs

use crate::constants::MAX_PAYLOAD_LEN;
use crate::protocol::frame::{Frame, HEADER_LEN};
use crate::transport::Transport;
use crate::utils::{bytes_to_hex, first_byte_timeout, inter_byte_timeout};
use crate::{Error, Result};

/// Send one framed command and read back one framed response, returning
/// the response payload. This is the raw exchange both the authenticate
/// handshake and the secure pipeline sit on.
///
/// Receive timing is two-phase: the 5-byte header is awaited under the
/// generous first-byte timeout (the coupler may think before it talks),
/// after which payload and CRC must flow under the inter-byte timeout.
/// A mute port after the header has arrived is reported as
/// `CommRecvStopped`, not `CommRecvMute`, since data was already in
/// hand; the retry policy upstream relies on that distinction.
pub fn exchange_raw(
    transport: &mut dyn Transport,
    address: u8,
    protocol: u8,
    command: &[u8],
    max_response_sz: usize,
) -> Result<Vec<u8>> {
    if command.len() > MAX_PAYLOAD_LEN {
        return Err(Error::CommandTooLong {
            actual: command.len(),
            max: MAX_PAYLOAD_LEN,
        });
    }

    let frame = Frame::encode(address, protocol, command)?;
    log::trace!(target: "sscp::exchange", "> {}", bytes_to_hex(&frame));
    transport.send(&frame)?;

    // Header phase: long wait for the first byte
    let mut header = [0u8; HEADER_LEN];
    transport.receive_exact(&mut header, first_byte_timeout(), inter_byte_timeout())?;

    let parsed = Frame::parse_header(&header)?;
    if parsed.payload_len > max_response_sz || parsed.payload_len > MAX_PAYLOAD_LEN {
        return Err(Error::ResponseTooLong {
            actual: parsed.payload_len,
            max: max_response_sz.min(MAX_PAYLOAD_LEN),
        });
    }

    // Payload and CRC phases: the link must not stall now. We already
    // have the header, so a mute port is an upgrade to "stopped".
    let mut payload = vec![0u8; parsed.payload_len];
    transport
        .receive_exact(&mut payload, inter_byte_timeout(), inter_byte_timeout())
        .map_err(upgrade_mute)?;

    let mut crc_bytes = [0u8; 2];
    transport
        .receive_exact(&mut crc_bytes, inter_byte_timeout(), inter_byte_timeout())
        .map_err(upgrade_mute)?;

    Frame::check_crc(&header, &payload, &crc_bytes)?;

    log::trace!(
        target: "sscp::exchange",
        "< {}{}{}",
        bytes_to_hex(&header),
        bytes_to_hex(&payload),
        bytes_to_hex(&crc_bytes)
    );

    Ok(payload)
}

fn upgrade_mute(err: Error) -> Error {
    match err {
        Error::CommRecvMute => Error::CommRecvStopped,
        other => other,
    }
}
