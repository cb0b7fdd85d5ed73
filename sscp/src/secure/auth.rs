// sscp-rs/sscp/src/secure/auth.rs

//! Mutual authentication handshake (protocol byte 0x20).
//!
//! Two round-trips under the long-term 16-byte transport key K:
//!
//! 1. host sends `00 00 ‖ RndA`; reader answers with 72 bytes
//!    `B(4) ‖ A(4) ‖ RndA'(16) ‖ RndB(16) ‖ hB(32)` where
//!    `hB = HMAC(K, B‖A‖RndA'‖RndB)`.
//! 2. host echoes `A ‖ RndB ‖ hA` with `hA = HMAC(K, A‖RndB)` and the
//!    reader ACKs.
//!
//! On success the four session keys are derived from `(K, RndA, RndB)`.
//!
//! The `A`/`B` tags are opaque to the host and echoed verbatim. `RndA'`
//! is stored but not compared against a transform of `RndA`; the wire
//! protocol does not require the host to verify it.

use crate::constants::{DEFAULT_AUTH_KEY, PROTOCOL_AUTHENTICATE};
use crate::protocol::codec;
use crate::secure::crypto;
use crate::secure::keys::SessionKeys;
use crate::secure::selftest::Mode;
use crate::transport::Transport;
use crate::utils::bytes_to_hex;
use crate::{Error, Result};

const ROUND1_RESPONSE_LEN: usize = 72;

/// Run the handshake and derive the session keys. Counter reset and
/// statistics are the caller's concern.
pub fn authenticate(
    transport: &mut dyn Transport,
    address: u8,
    auth_key: Option<&[u8; 16]>,
    mode: &Mode,
) -> Result<SessionKeys> {
    let key = auth_key.unwrap_or(&DEFAULT_AUTH_KEY);

    let mut rnd_a = [0u8; 16];
    match mode {
        Mode::SelfTest(vectors) => rnd_a = vectors.rnd_a,
        Mode::Live => crypto::random_bytes(&mut rnd_a)?,
    }

    // Round 1: send our challenge
    let mut command = Vec::with_capacity(2 + 16);
    command.extend_from_slice(&[0x00, 0x00]);
    command.extend_from_slice(&rnd_a);

    let response = match mode {
        Mode::SelfTest(vectors) => vectors.round1_response.to_vec(),
        Mode::Live => codec::exchange_raw(transport, address, PROTOCOL_AUTHENTICATE, &command, 256)?,
    };

    if response.len() != ROUND1_RESPONSE_LEN {
        return Err(Error::WrongResponseLength(response.len()));
    }

    let tag_b = &response[0..4];
    let tag_a = &response[4..8];
    let rnd_a_prime = &response[8..24];
    let rnd_b_bytes = &response[24..40];
    let h_b = &response[40..72];

    log::trace!(
        target: "sscp::authenticate",
        "B={} A={} RndA'={} RndB={}",
        bytes_to_hex(tag_b),
        bytes_to_hex(tag_a),
        bytes_to_hex(rnd_a_prime),
        bytes_to_hex(rnd_b_bytes)
    );

    // The reader proves knowledge of K over everything it just sent
    crypto::hmac_verify(key, &response[..40], h_b)?;

    // Round 2: prove our own knowledge of K over A ‖ RndB
    let mut command = Vec::with_capacity(4 + 16 + 32);
    command.extend_from_slice(tag_a);
    command.extend_from_slice(rnd_b_bytes);
    let h_a = crypto::hmac_sha256(key, &command)?;
    command.extend_from_slice(&h_a);

    let ack = match mode {
        Mode::SelfTest(vectors) => vectors.round2_response.clone(),
        Mode::Live => codec::exchange_raw(transport, address, PROTOCOL_AUTHENTICATE, &command, 256)?,
    };
    // The ACK body carries no information the host needs; receiving a
    // well-framed response at all is the confirmation.
    log::trace!(target: "sscp::authenticate", "ack={}", bytes_to_hex(&ack));

    let mut rnd_b = [0u8; 16];
    rnd_b.copy_from_slice(rnd_b_bytes);
    let keys = SessionKeys::derive(key, &rnd_a, &rnd_b)?;

    log::debug!(target: "sscp::authenticate", "session established");
    Ok(keys)
}
