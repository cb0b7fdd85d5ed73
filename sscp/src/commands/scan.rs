// sscp-rs/sscp/src/commands/scan.rs

use crate::constants::{CMD_SCAN_A_RAW, CMD_SCAN_GLOBAL};
use crate::context::{Coupler, Secure};
use crate::types::{Ats, CommandHeader, TagInfo, Uid};
use crate::{Error, Result};

impl Coupler<Secure> {
    /// Poll for a tag of any supported type. Guard-gated: consecutive
    /// scans are spaced out because the reader handles them slowly.
    pub fn scan_nfc(&mut self) -> Result<TagInfo> {
        self.guard_scan();
        // Filter: all ISO types
        let data = self.exchange(CommandHeader::new(CMD_SCAN_GLOBAL), &[0x00, 0x07])?;
        parse_scan_global(&data)
    }

    /// Poll for an ISO A tag only, requesting the raw ATS. Guard-gated
    /// like `scan_nfc`.
    pub fn scan_a_raw(&mut self) -> Result<TagInfo> {
        self.guard_scan();
        // ats_spec: include the ATS in the answer
        let data = self.exchange(CommandHeader::new(CMD_SCAN_A_RAW), &[0x01])?;
        parse_scan_a_raw(&data)
    }
}

fn parse_scan_global(data: &[u8]) -> Result<TagInfo> {
    if data.is_empty() {
        return Err(Error::WrongResponseLength(0));
    }
    match data[0] {
        0x00 => Ok(TagInfo::None),
        0x01 => {
            // ISO A: count(1) ATQA(2) SAK(1) UIDLen(1) UID ATS?
            if data.len() < 6 {
                return Err(Error::UnsupportedResponseLength(data.len()));
            }
            if data[1] != 1 {
                return Err(Error::UnsupportedResponseValue);
            }
            let (uid, offset) = read_uid(data, 5)?;
            let ats = read_optional_ats(data, offset)?;
            Ok(TagInfo::IsoA { uid, ats })
        }
        0x02 => {
            // ISO B: count(1) RFU(1) UIDLen(1) UID
            if data.len() < 4 {
                return Err(Error::UnsupportedResponseLength(data.len()));
            }
            if data[1] != 1 {
                return Err(Error::UnsupportedResponseValue);
            }
            let (uid, _) = read_uid(data, 3)?;
            Ok(TagInfo::IsoB { uid })
        }
        other => Err(Error::UnsupportedResponseStatus(other)),
    }
}

fn parse_scan_a_raw(data: &[u8]) -> Result<TagInfo> {
    if data.is_empty() {
        return Err(Error::WrongResponseLength(0));
    }
    match data[0] {
        0x00 => Ok(TagInfo::None),
        0x01 => {
            // One ISO A card: ATQA(2) SAK(1) UIDLen(1) UID ATS?
            if data.len() < 5 {
                return Err(Error::UnsupportedResponseLength(data.len()));
            }
            let (uid, offset) = read_uid(data, 4)?;
            let ats = read_optional_ats(data, offset)?;
            Ok(TagInfo::IsoA { uid, ats })
        }
        other => Err(Error::UnsupportedResponseStatus(other)),
    }
}

/// Read a length-prefixed UID starting at `len_at`; returns the UID and
/// the offset just past it.
fn read_uid(data: &[u8], len_at: usize) -> Result<(Uid, usize)> {
    let len = data[len_at] as usize;
    let start = len_at + 1;
    if start + len > data.len() {
        return Err(Error::UnsupportedResponseValue);
    }
    Ok((Uid::from_bytes(&data[start..start + len]), start + len))
}

/// The ATS, when present, starts with its own length byte (which the
/// ATS includes, so the byte is not skipped).
fn read_optional_ats(data: &[u8], offset: usize) -> Result<Option<Ats>> {
    if offset >= data.len() {
        return Ok(None);
    }
    let len = data[offset] as usize;
    if offset + len > data.len() {
        return Err(Error::UnsupportedResponseValue);
    }
    Ok(Some(Ats::from_bytes(&data[offset..offset + len])))
}
