// sscp-rs/sscp/src/context.rs

use std::marker::PhantomData;
use std::time::{Duration, Instant};

use crate::constants::{MAX_PAYLOAD_LEN, MAX_TIMEOUT_RETRY, PROTOCOL_SECURE};
use crate::secure::auth;
use crate::secure::crypto;
use crate::secure::exchange::{self, Padding};
use crate::secure::selftest::{Mode, SELF_TEST_PADDING};
use crate::secure::{GuardGate, SessionKeys};
use crate::transport::{MockTransport, Transport};
use crate::types::{check_address, Baudrate, CommandHeader};
use crate::{Error, Result};

/// Type-state markers
pub struct Plain;
pub struct Secure;

/// Handle on one coupler over one serial link.
///
/// The type parameter enforces the session lifecycle at compile time:
/// a `Coupler<Plain>` has an open port but no session keys, and only
/// `authenticate` can turn it into a `Coupler<Secure>`, on which the
/// secure exchange and every command wrapper live. Session keys are
/// zeroized when the coupler is dropped.
///
/// A coupler owns its port exclusively and is not meant to be shared
/// across threads; every operation blocks until the reader answered or
/// a timeout fired.
pub struct Coupler<State = Plain> {
    transport: Counted,
    address: u8,
    counter: u32,
    keys: Option<SessionKeys>,
    guard: GuardGate,
    mode: Mode,
    stats: Stats,
    _state: PhantomData<State>,
}

/// Byte-counting decorator so statistics cover every exchange,
/// including the authenticate handshake.
struct Counted {
    inner: Box<dyn Transport>,
    bytes_sent: u64,
    bytes_received: u64,
}

impl Transport for Counted {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.inner.send(data)?;
        self.bytes_sent += data.len() as u64;
        Ok(())
    }

    fn receive_exact(
        &mut self,
        buf: &mut [u8],
        first_byte: Duration,
        inter_byte: Duration,
    ) -> Result<()> {
        self.inner.receive_exact(buf, first_byte, inter_byte)?;
        self.bytes_received += buf.len() as u64;
        Ok(())
    }

    fn set_baudrate(&mut self, baudrate: Baudrate) -> Result<()> {
        self.inner.set_baudrate(baudrate)
    }
}

#[derive(Debug, Default)]
struct Stats {
    when_open: Option<Instant>,
    when_session: Option<Instant>,
    session_count: u32,
    error_count: u32,
}

/// Point-in-time counters for one coupler handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    /// Time since the port was opened
    pub total_time: Duration,
    /// Recovered receive timeouts
    pub total_errors: u32,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    /// Successful authentications since open
    pub session_count: u32,
    /// Time since the last successful authentication
    pub session_time: Option<Duration>,
    /// Current secure-exchange counter
    pub session_counter: u32,
}

impl Coupler<Plain> {
    /// Open a serial port and attach a coupler handle to it.
    /// The address starts at 0x00 (RS-232 point-to-point).
    #[cfg(feature = "serial")]
    pub fn open(path: &str, baudrate: Baudrate) -> Result<Self> {
        let transport = crate::transport::SerialTransport::open(path, baudrate)?;
        Ok(Self::new_with_transport(Box::new(transport)))
    }

    /// Attach a coupler handle to an existing transport. This is how
    /// tests drive the protocol over a `MockTransport`.
    pub fn new_with_transport(transport: Box<dyn Transport>) -> Self {
        Self::with_mode(transport, Mode::Live)
    }

    /// Deterministic self-test handle: no port, fixed vectors in place
    /// of the RNG and of the reader. Validates the crypto pipeline
    /// bit-exactly.
    pub fn self_test() -> Self {
        Self::with_mode(Box::new(MockTransport::new()), Mode::self_test())
    }

    fn with_mode(transport: Box<dyn Transport>, mode: Mode) -> Self {
        Self {
            transport: Counted {
                inner: transport,
                bytes_sent: 0,
                bytes_received: 0,
            },
            address: 0x00,
            counter: 0,
            keys: None,
            guard: GuardGate::new(),
            mode,
            stats: Stats {
                when_open: Some(Instant::now()),
                ..Stats::default()
            },
            _state: PhantomData,
        }
    }

    /// Run the mutual-authentication handshake and enter the secure
    /// state. `None` selects the default transport key.
    pub fn authenticate(mut self, auth_key: Option<&[u8; 16]>) -> Result<Coupler<Secure>> {
        let keys = auth::authenticate(&mut self.transport, self.address, auth_key, &self.mode)?;
        self.counter = 1;
        self.stats.session_count += 1;
        self.stats.when_session = Some(Instant::now());
        Ok(Coupler {
            transport: self.transport,
            address: self.address,
            counter: self.counter,
            keys: Some(keys),
            guard: self.guard,
            mode: self.mode,
            stats: self.stats,
            _state: PhantomData,
        })
    }
}

impl<State> Coupler<State> {
    /// Select the RS-485 target for subsequent exchanges. Local only;
    /// nothing is sent to the bus.
    pub fn select_address(&mut self, address: u8) -> Result<()> {
        self.address = check_address(address)?;
        Ok(())
    }

    /// Currently selected RS-485 address (0x00 on RS-232)
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Reconfigure the local serial line speed. The reader keeps its
    /// own setting; see `set_baudrate` for changing both ends.
    pub fn select_baudrate(&mut self, baudrate: Baudrate) -> Result<()> {
        self.transport.set_baudrate(baudrate)
    }

    /// Wait out any armed guard interval, then arm a new one
    pub fn guard_time(&mut self, value: Duration) {
        self.guard.guard(value);
    }

    /// Wait out any armed guard interval without re-arming
    pub fn wait_guard_time(&mut self) {
        self.guard.wait();
    }

    /// Counters for this handle
    pub fn statistics(&self) -> Statistics {
        Statistics {
            total_time: self
                .stats
                .when_open
                .map(|t| t.elapsed())
                .unwrap_or_default(),
            total_errors: self.stats.error_count,
            bytes_sent: self.transport.bytes_sent,
            bytes_received: self.transport.bytes_received,
            session_count: self.stats.session_count,
            session_time: self.stats.when_session.map(|t| t.elapsed()),
            session_counter: self.counter,
        }
    }
}

impl Coupler<Secure> {
    /// Execute one secure exchange: build, sign, pad, encrypt, send,
    /// then decrypt and validate the reader's answer. Returns the
    /// response data; a nonzero reader status comes back as
    /// `Error::ReaderStatus`.
    ///
    /// Only receive timeouts are retried, with the *same* ciphertext
    /// and counter: either the reader never saw the frame (a resend is
    /// invisible) or its answer was lost, in which case the reader's
    /// own counter check rejects the resend and the session must be
    /// re-authenticated. Anything else fails immediately.
    pub fn exchange(&mut self, header: CommandHeader, data: &[u8]) -> Result<Vec<u8>> {
        let mut iv = [0u8; 16];
        let padding = match &self.mode {
            Mode::SelfTest(vectors) => {
                iv = vectors.iv;
                Padding::Repeating(SELF_TEST_PADDING)
            }
            Mode::Live => {
                crypto::random_bytes(&mut iv)?;
                Padding::Standard
            }
        };

        let wire = {
            let keys = self
                .keys
                .as_ref()
                .ok_or(Error::InternalFailure("no session keys"))?;
            exchange::build_command(self.counter, header, data, keys, &iv, padding)?
        };

        let payload = match &self.mode {
            Mode::SelfTest(vectors) => vectors.exchange_response.clone(),
            Mode::Live => self.send_with_retry(&wire)?,
        };

        let keys = self
            .keys
            .as_ref()
            .ok_or(Error::InternalFailure("no session keys"))?;
        let (response, status) =
            exchange::parse_response(&payload, &mut self.counter, header, keys)?;
        if status != 0 {
            return Err(Error::ReaderStatus(status));
        }
        Ok(response)
    }

    fn send_with_retry(&mut self, wire: &[u8]) -> Result<Vec<u8>> {
        let mut recovered = 0u32;
        loop {
            match crate::protocol::codec::exchange_raw(
                &mut self.transport,
                self.address,
                PROTOCOL_SECURE,
                wire,
                MAX_PAYLOAD_LEN,
            ) {
                Ok(payload) => {
                    self.stats.error_count += recovered;
                    return Ok(payload);
                }
                Err(err) if err.is_timeout() && recovered + 1 < MAX_TIMEOUT_RETRY => {
                    log::debug!(target: "sscp::exchange", "timeout ({}), resending", err);
                    recovered += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Renew the session in place: run the handshake again with the
    /// given key and restart the counter. The usual way out of
    /// `CounterExhausted`.
    pub fn reauthenticate(&mut self, auth_key: Option<&[u8; 16]>) -> Result<()> {
        let keys = auth::authenticate(&mut self.transport, self.address, auth_key, &self.mode)?;
        self.keys = Some(keys);
        self.counter = 1;
        self.stats.session_count += 1;
        self.stats.when_session = Some(Instant::now());
        Ok(())
    }

    /// Session-state constructor for tests that need known keys and a
    /// known counter without running the handshake.
    pub(crate) fn with_session(
        transport: Box<dyn Transport>,
        keys: SessionKeys,
        counter: u32,
    ) -> Self {
        let mut coupler = Coupler::<Plain>::with_mode(transport, Mode::Live);
        coupler.stats.session_count = 1;
        coupler.stats.when_session = Some(Instant::now());
        Coupler {
            transport: coupler.transport,
            address: coupler.address,
            counter,
            keys: Some(keys),
            guard: coupler.guard,
            mode: coupler.mode,
            stats: coupler.stats,
            _state: PhantomData,
        }
    }

    /// Arm the scan guard; scans are the commands the reader is slow on
    pub(crate) fn guard_scan(&mut self) {
        self.guard
            .guard(Duration::from_millis(crate::constants::SCAN_GUARD_TIME_MS));
    }

    #[cfg(test)]
    pub(crate) fn counter_for_tests(&self) -> u32 {
        self.counter
    }
}
