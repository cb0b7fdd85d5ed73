// sscp-rs/sscp/src/protocol/frame.rs

use crate::constants::{MAX_PAYLOAD_LEN, SOF};
use crate::protocol::crc::crc16_parts;
use crate::{Error, Result};

/// SSCP frame helper. Provides encode/decode of the wire frame.
/// Format: [SOF(1)=0x02] [LEN(2 be)] [ADDR(1)] [PROTO(1)] [payload(n)] [CRC(2 be)]
/// CRC-16/CCITT-FALSE over LEN ‖ ADDR ‖ PROTO ‖ payload.
pub struct Frame;

/// Length of the fixed frame header (SOF + LEN + ADDR + PROTO)
pub const HEADER_LEN: usize = 5;

/// Parsed frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub payload_len: usize,
    pub address: u8,
    pub protocol: u8,
}

/// Fully decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub address: u8,
    pub protocol: u8,
    pub payload: Vec<u8>,
}

impl Frame {
    /// Encode a payload into a full SSCP frame
    pub fn encode(address: u8, protocol: u8, payload: &[u8]) -> Result<Vec<u8>> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(Error::CommandTooLong {
                actual: payload.len(),
                max: MAX_PAYLOAD_LEN,
            });
        }

        let len = payload.len() as u16;
        let mut out = Vec::with_capacity(HEADER_LEN + payload.len() + 2);
        out.push(SOF);
        out.extend_from_slice(&len.to_be_bytes());
        out.push(address);
        out.push(protocol);
        out.extend_from_slice(payload);
        let crc = crc16_parts(&[&out[1..HEADER_LEN], payload]);
        out.extend_from_slice(&crc.to_be_bytes());
        Ok(out)
    }

    /// Parse and validate the 5-byte header of an incoming frame.
    ///
    /// A wrong SOF means we are not even looking at an SSCP response.
    pub fn parse_header(header: &[u8; HEADER_LEN]) -> Result<FrameHeader> {
        if header[0] != SOF {
            return Err(Error::WrongResponseCommand {
                expected: SOF as u16,
                actual: header[0] as u16,
            });
        }
        let payload_len = u16::from_be_bytes([header[1], header[2]]) as usize;
        Ok(FrameHeader {
            payload_len,
            address: header[3],
            protocol: header[4],
        })
    }

    /// Verify the CRC of a received frame body against its header.
    pub fn check_crc(header: &[u8; HEADER_LEN], payload: &[u8], crc_bytes: &[u8; 2]) -> Result<()> {
        let expected = crc16_parts(&[&header[1..HEADER_LEN], payload]);
        let actual = u16::from_be_bytes(*crc_bytes);
        if expected != actual {
            return Err(Error::WrongResponseCrc { expected, actual });
        }
        Ok(())
    }

    /// Decode a complete frame held in one buffer. The receive path
    /// parses incrementally through `parse_header`/`check_crc`; this is
    /// for tests and captured traces.
    pub fn decode(frame: &[u8]) -> Result<DecodedFrame> {
        if frame.len() < HEADER_LEN + 2 {
            return Err(Error::WrongResponseLength(frame.len()));
        }
        let mut header = [0u8; HEADER_LEN];
        header.copy_from_slice(&frame[..HEADER_LEN]);
        let parsed = Frame::parse_header(&header)?;
        if parsed.payload_len > MAX_PAYLOAD_LEN {
            return Err(Error::ResponseTooLong {
                actual: parsed.payload_len,
                max: MAX_PAYLOAD_LEN,
            });
        }
        let expected_total = HEADER_LEN + parsed.payload_len + 2;
        if frame.len() != expected_total {
            return Err(Error::WrongResponseLength(frame.len()));
        }
        let payload = &frame[HEADER_LEN..HEADER_LEN + parsed.payload_len];
        let mut crc_bytes = [0u8; 2];
        crc_bytes.copy_from_slice(&frame[expected_total - 2..]);
        Frame::check_crc(&header, payload, &crc_bytes)?;
        Ok(DecodedFrame {
            address: parsed.address,
            protocol: parsed.protocol,
            payload: payload.to_vec(),
        })
    }
}
