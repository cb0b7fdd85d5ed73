// sscp-rs/sscp/src/transport/serial.rs

use std::io::{Read, Write};
use std::time::Duration;

use serialport::SerialPort;

use crate::transport::traits::Transport;
use crate::types::Baudrate;
use crate::{Error, Result};

/// Blocking serial transport. SSCP runs over RS-232 point-to-point or
/// an RS-485 multi-drop bus; either way the host sees a plain 8-N-1
/// byte stream.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open and configure a serial port, e.g. `/dev/ttyUSB0` or `COM8`.
    pub fn open(path: &str, baudrate: Baudrate) -> Result<Self> {
        let port = serialport::new(path, baudrate.bps())
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .timeout(crate::utils::first_byte_timeout())
            .open()?;
        log::debug!(target: "sscp::serial", "opened {} at {} bps", path, baudrate.bps());
        Ok(Self { port })
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.port
            .set_timeout(timeout)
            .map_err(|e| Error::CommControlFailed(e.into()))
    }
}

impl Transport for SerialTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.port.write_all(data).map_err(Error::CommSendFailed)?;
        self.port.flush().map_err(Error::CommSendFailed)
    }

    fn receive_exact(
        &mut self,
        buf: &mut [u8],
        first_byte: Duration,
        inter_byte: Duration,
    ) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }
        self.set_timeout(first_byte)?;
        let mut got = 0usize;
        while got < buf.len() {
            match self.port.read(&mut buf[got..]) {
                Ok(0) => {
                    // A zero-length read on a live port means the other
                    // end went away mid-stream.
                    return Err(if got == 0 {
                        Error::CommRecvMute
                    } else {
                        Error::CommRecvStopped
                    });
                }
                Ok(n) => {
                    if got == 0 {
                        // First byte landed; every byte after it must
                        // follow promptly.
                        self.set_timeout(inter_byte)?;
                    }
                    got += n;
                }
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                    return Err(if got == 0 {
                        Error::CommRecvMute
                    } else {
                        Error::CommRecvStopped
                    });
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::CommRecvFailed(e)),
            }
        }
        Ok(())
    }

    fn set_baudrate(&mut self, baudrate: Baudrate) -> Result<()> {
        self.port
            .set_baud_rate(baudrate.bps())
            .map_err(|e| Error::CommControlFailed(e.into()))
    }
}
