// sscp-rs/sscp/src/commands/info.rs

use std::fmt::Write;

use crate::constants::{CMD_GET_INFOS, CMD_GET_READER_TYPE, CMD_GET_SERIAL_NUMBER};
use crate::context::{Coupler, Secure};
use crate::types::{CommandHeader, ReaderInfo};
use crate::{Error, Result};

impl Coupler<Secure> {
    /// Read firmware version, baudrate selector, bus address and supply
    /// voltage from the reader.
    pub fn get_infos(&mut self) -> Result<ReaderInfo> {
        let data = self.exchange(CommandHeader::new(CMD_GET_INFOS), &[])?;
        if data.len() < 5 {
            return Err(Error::UnsupportedResponseLength(data.len()));
        }
        Ok(ReaderInfo {
            version: data[0],
            baudrate_selector: data[1],
            address: data[2],
            voltage: u16::from_be_bytes([data[3], data[4]]),
        })
    }

    /// Reader serial number: one ASCII prefix letter followed by four
    /// bytes printed as uppercase hex, e.g. `"S0A1B2C3D"`.
    pub fn get_serial_number(&mut self) -> Result<String> {
        let data = self.exchange(CommandHeader::new(CMD_GET_SERIAL_NUMBER), &[])?;
        if data.len() != 5 {
            return Err(Error::UnsupportedResponseLength(data.len()));
        }
        let mut serial = String::with_capacity(9);
        serial.push(data[0] as char);
        for b in &data[1..5] {
            // write! never fails writing to a String
            let _ = write!(&mut serial, "{:02X}", b);
        }
        Ok(serial)
    }

    /// Reader model string, NUL-terminated ASCII on the wire
    pub fn get_reader_type(&mut self) -> Result<String> {
        let data = self.exchange(CommandHeader::new(CMD_GET_READER_TYPE), &[])?;
        let end = data.iter().position(|&b| b == 0x00).unwrap_or(data.len());
        Ok(data[..end].iter().map(|&b| b as char).collect())
    }
}
