// sscp-rs/sscp/src/commands/transceive.rs

use crate::constants::{CMD_RELEASE_RF, CMD_TRANSCEIVE_APDU};
use crate::context::{Coupler, Secure};
use crate::types::CommandHeader;
use crate::{Error, Result};

impl Coupler<Secure> {
    /// Relay an APDU to the card in the field (transparent mode) and
    /// return the response APDU. The reader prefixes its answer with a
    /// one-byte status: 0x00 ok, 0x01 card mute or removed, 0x02 card
    /// communication error.
    pub fn transceive_apdu(&mut self, command_apdu: &[u8]) -> Result<Vec<u8>> {
        let data = self.exchange(CommandHeader::new(CMD_TRANSCEIVE_APDU), command_apdu)?;
        if data.is_empty() {
            return Err(Error::WrongResponseLength(0));
        }
        match data[0] {
            0x00 => Ok(data[1..].to_vec()),
            0x01 => Err(Error::NfcCardMuteOrRemoved),
            0x02 => Err(Error::NfcCardCommError),
            other => Err(Error::UnsupportedResponseStatus(other)),
        }
    }

    /// Drop the RF field and release the card
    pub fn release_nfc(&mut self) -> Result<()> {
        self.exchange(CommandHeader::new(CMD_RELEASE_RF), &[])?;
        Ok(())
    }
}
