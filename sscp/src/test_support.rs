// sscp-rs/sscp/src/test_support.rs

//! Test support helpers intended for use by unit and integration tests.
//!
//! These centralize the session-key fixtures, the simulated-reader
//! response encoder and common `MockTransport`/`Coupler` setup so tests
//! across the crate and the tests/ directory share one implementation.
#![allow(dead_code)]

use crate::constants::DEFAULT_AUTH_KEY;
use crate::context::{Coupler, Secure};
use crate::protocol::Frame;
use crate::secure::crypto;
use crate::secure::selftest::{SELF_TEST_RND_A, SELF_TEST_ROUND1_RESPONSE};
use crate::secure::SessionKeys;
use crate::transport::MockTransport;
use crate::types::CommandHeader;

/// The session-key quadruple of the self-test session: default
/// transport key with the fixed handshake nonces.
#[doc(hidden)]
pub fn test_session_keys() -> SessionKeys {
    let mut rnd_b = [0u8; 16];
    rnd_b.copy_from_slice(&SELF_TEST_ROUND1_RESPONSE[24..40]);
    SessionKeys::derive(&DEFAULT_AUTH_KEY, &SELF_TEST_RND_A, &rnd_b)
        .expect("hkdf never fails for 16-byte outputs")
}

/// Encode a secure response the way the reader would: plaintext
/// `counter ‖ code ‖ len ‖ data ‖ type ‖ status`, signed under
/// `sign_ba`, padded with 0x80 00.., encrypted under `cipher_ba`, IV
/// appended last.
#[doc(hidden)]
pub fn encode_secure_response(
    keys: &SessionKeys,
    counter: u32,
    header: CommandHeader,
    data: &[u8],
    status: u8,
    iv: &[u8; 16],
) -> Vec<u8> {
    encode_secure_response_with_type(keys, counter, header, data, header.kind(), status, iv)
}

/// Like `encode_secure_response` but with an explicit status-type byte,
/// for tests that exercise the type-echo check.
#[doc(hidden)]
pub fn encode_secure_response_with_type(
    keys: &SessionKeys,
    counter: u32,
    header: CommandHeader,
    data: &[u8],
    status_type: u8,
    status: u8,
    iv: &[u8; 16],
) -> Vec<u8> {
    let mut plain = Vec::new();
    plain.extend_from_slice(&counter.to_be_bytes());
    plain.extend_from_slice(&header.code().to_be_bytes());
    plain.extend_from_slice(&(data.len() as u16).to_be_bytes());
    plain.extend_from_slice(data);
    plain.push(status_type);
    plain.push(status);
    let mac = crypto::hmac_sha256(&keys.sign_ba, &plain).expect("hmac");
    plain.extend_from_slice(&mac);
    if plain.len() % 16 != 0 {
        plain.push(0x80);
        while plain.len() % 16 != 0 {
            plain.push(0x00);
        }
    }
    crypto::cbc_encrypt(&keys.cipher_ba, iv, &mut plain).expect("aligned buffer");
    plain.extend_from_slice(iv);
    plain
}

/// Frame a secure response payload the way it travels on the wire.
#[doc(hidden)]
pub fn frame_secure_response(address: u8, payload: &[u8]) -> Vec<u8> {
    Frame::encode(address, crate::constants::PROTOCOL_SECURE, payload).expect("payload fits")
}

/// A secure coupler over a caller-provided transport, with the fixture
/// session keys installed and the counter at 1, skipping the handshake.
/// Seed the mock with responses before handing it over.
#[doc(hidden)]
pub fn secure_coupler_with(transport: MockTransport) -> Coupler<Secure> {
    Coupler::with_session(Box::new(transport), test_session_keys(), 1)
}

/// Like `secure_coupler_with` but starting from an arbitrary counter,
/// for exhaustion and replay scenarios. Accepts any transport so tests
/// can interpose their own capture shims.
#[doc(hidden)]
pub fn secure_coupler_at(
    transport: Box<dyn crate::transport::Transport>,
    counter: u32,
) -> Coupler<Secure> {
    Coupler::with_session(transport, test_session_keys(), counter)
}
