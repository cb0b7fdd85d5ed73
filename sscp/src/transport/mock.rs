// sscp-rs/sscp/src/transport/mock.rs

use std::collections::VecDeque;
use std::time::Duration;

use crate::transport::traits::Transport;
use crate::types::Baudrate;
use crate::{Error, Result};

/// Mock transport for unit tests. Records sent frames and serves
/// receives from a flat byte queue, so mute (nothing queued) and
/// stopped (queue runs dry mid-read) fall out of the model naturally.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Every `send` payload, in order
    pub sent: Vec<Vec<u8>>,
    /// Pending receive bytes; frames queued back-to-back
    pub rx: VecDeque<u8>,
    /// Baudrates applied through `set_baudrate`, for assertions
    pub baudrates: Vec<Baudrate>,
    /// Number of `send` calls that should fail first (testing hook)
    pub send_failures: usize,
    /// Number of receive calls that should report a mute port before
    /// the queue is served (testing hook for the retry path)
    pub recv_failures: usize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response; bytes are appended to the receive stream.
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.rx.extend(resp);
    }

    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }

    /// All sent bytes concatenated, in wire order.
    pub fn sent_bytes(&self) -> Vec<u8> {
        self.sent.iter().flatten().copied().collect()
    }

    /// Set how many subsequent `send` calls should fail (for tests).
    pub fn set_send_failures(&mut self, n: usize) {
        self.send_failures = n;
    }

    /// Set how many receive calls should time out before any queued
    /// bytes are served (for tests).
    pub fn set_recv_failures(&mut self, n: usize) {
        self.recv_failures = n;
    }
}

impl Transport for MockTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        if self.send_failures > 0 {
            self.send_failures -= 1;
            return Err(Error::CommSendFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "mock send failure",
            )));
        }
        self.sent.push(data.to_vec());
        Ok(())
    }

    fn receive_exact(
        &mut self,
        buf: &mut [u8],
        _first_byte: Duration,
        _inter_byte: Duration,
    ) -> Result<()> {
        if buf.is_empty() {
            return Ok(());
        }
        if self.recv_failures > 0 {
            self.recv_failures -= 1;
            return Err(Error::CommRecvMute);
        }
        if self.rx.is_empty() {
            return Err(Error::CommRecvMute);
        }
        for (i, slot) in buf.iter_mut().enumerate() {
            match self.rx.pop_front() {
                Some(b) => *slot = b,
                None => {
                    // Delivered i bytes then went silent
                    debug_assert!(i > 0);
                    return Err(Error::CommRecvStopped);
                }
            }
        }
        Ok(())
    }

    fn set_baudrate(&mut self, baudrate: Baudrate) -> Result<()> {
        self.baudrates.push(baudrate);
        Ok(())
    }
}
