// sscp-rs/sscp/src/commands/config.rs

use crate::constants::{CMD_SET_BAUDRATE, CMD_SET_RS485_ADDRESS};
use crate::context::{Coupler, Secure};
use crate::types::{check_address, Baudrate, CommandHeader};
use crate::Result;

impl Coupler<Secure> {
    /// Switch the reader to a new line speed and follow it locally.
    /// The reader answers at the old speed before switching.
    pub fn set_baudrate(&mut self, baudrate: Baudrate) -> Result<()> {
        self.exchange(CommandHeader::new(CMD_SET_BAUDRATE), &[baudrate.selector()])?;
        self.select_baudrate(baudrate)
    }

    /// Assign the reader a new RS-485 bus address and select it for
    /// subsequent exchanges.
    pub fn set_rs485_address(&mut self, address: u8) -> Result<()> {
        check_address(address)?;
        self.exchange(CommandHeader::new(CMD_SET_RS485_ADDRESS), &[address])?;
        self.select_address(address)
    }
}
