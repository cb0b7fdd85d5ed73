// sscp-rs/sscp/src/secure/exchange.rs

//! Secure command construction and response validation.
//!
//! The I/O-free half of the secure pipeline: building the encrypted and
//! signed command bytes, and decrypting plus validating a response.
//! The retry loop and transport driving live on the `Coupler`.

use zeroize::Zeroizing;

use crate::constants::MAX_PAYLOAD_LEN;
use crate::secure::crypto::{self, BLOCK_LEN, HMAC_LEN};
use crate::secure::keys::SessionKeys;
use crate::types::CommandHeader;
use crate::{Error, Result};

/// Command plaintext overhead: counter(4) + type(1) + code(2) +
/// length(2) + reserved(1)
const CMD_OVERHEAD: usize = 10;
/// Response plaintext overhead: counter(4) + code(2) + length(2) +
/// status type(1) + status code(1)
const RSP_OVERHEAD: usize = 10;

/// How the plaintext is padded up to a cipher block boundary
#[derive(Debug, Clone, Copy)]
pub enum Padding {
    /// 0x80 then zeros; nothing when already block-aligned
    Standard,
    /// Repeating fixed sequence, used by self-test so vectors stay stable
    Repeating([u8; 4]),
}

fn pad_to_block(buf: &mut Vec<u8>, padding: Padding) {
    match padding {
        Padding::Standard => {
            if buf.len() % BLOCK_LEN != 0 {
                buf.push(0x80);
                while buf.len() % BLOCK_LEN != 0 {
                    buf.push(0x00);
                }
            }
        }
        Padding::Repeating(seq) => {
            let mut i = 0;
            while buf.len() % BLOCK_LEN != 0 {
                buf.push(seq[i % seq.len()]);
                i += 1;
            }
        }
    }
}

/// Build the transport payload for one secure command:
/// counter ‖ type ‖ code ‖ len+1 ‖ 00 ‖ data, HMAC-signed, padded,
/// AES-CBC encrypted, with the IV appended *after* the ciphertext (the
/// reader expects the IV last).
pub fn build_command(
    counter: u32,
    header: CommandHeader,
    data: &[u8],
    keys: &SessionKeys,
    iv: &[u8; 16],
    padding: Padding,
) -> Result<Vec<u8>> {
    if data.len() > MAX_PAYLOAD_LEN {
        return Err(Error::CommandTooLong {
            actual: data.len(),
            max: MAX_PAYLOAD_LEN,
        });
    }
    if counter == u32::MAX {
        return Err(Error::CounterExhausted);
    }

    let mut plain =
        Zeroizing::new(Vec::with_capacity(CMD_OVERHEAD + data.len() + HMAC_LEN + BLOCK_LEN));
    plain.extend_from_slice(&counter.to_be_bytes());
    plain.push(header.kind());
    plain.extend_from_slice(&header.code().to_be_bytes());
    plain.extend_from_slice(&((data.len() as u16 + 1).to_be_bytes()));
    plain.push(0x00); // Reserved
    plain.extend_from_slice(data);

    log::trace!(target: "sscp::exchange", "command={}", crate::utils::bytes_to_hex(&plain));

    let mac = crypto::hmac_sha256(&keys.sign_ab, &plain)?;
    plain.extend_from_slice(&mac);

    pad_to_block(&mut plain, padding);
    crypto::cbc_encrypt(&keys.cipher_ab, iv, &mut plain)?;

    let mut wire = Vec::with_capacity(plain.len() + BLOCK_LEN);
    wire.extend_from_slice(&plain);
    wire.extend_from_slice(iv);

    log::trace!(target: "sscp::exchange", "sending={}", crate::utils::bytes_to_hex(&wire));
    Ok(wire)
}

/// Decrypt and validate a secure response payload.
///
/// The counter is advanced as soon as the counter check itself passes,
/// before the remaining validations run; a response that later fails
/// the HMAC check still consumed its counter value.
///
/// Returns the response data and the status byte; mapping a nonzero
/// status to an error is the caller's job since the counter and data
/// semantics are identical either way.
pub fn parse_response(
    payload: &[u8],
    counter: &mut u32,
    header: CommandHeader,
    keys: &SessionKeys,
) -> Result<(Vec<u8>, u8)> {
    // IV is the trailing block; at least one ciphertext block before it
    if payload.len() < 2 * BLOCK_LEN || payload.len() % BLOCK_LEN != 0 {
        return Err(Error::WrongResponseLength(payload.len()));
    }

    let (cipher, iv_bytes) = payload.split_at(payload.len() - BLOCK_LEN);
    let mut iv = [0u8; BLOCK_LEN];
    iv.copy_from_slice(iv_bytes);

    let mut plain = Zeroizing::new(cipher.to_vec());
    crypto::cbc_decrypt(&keys.cipher_ba, &iv, &mut plain)?;

    log::trace!(target: "sscp::exchange", "decrypted={}", crate::utils::bytes_to_hex(&plain));

    // 1. Counter must advance strictly
    let received = u32::from_be_bytes([plain[0], plain[1], plain[2], plain[3]]);
    if received <= *counter {
        return Err(Error::WrongResponseCounter {
            current: *counter,
            received,
        });
    }
    *counter = received.saturating_add(1);

    // 2. Command code echo
    let echoed = u16::from_be_bytes([plain[4], plain[5]]);
    if echoed != header.code() {
        return Err(Error::WrongResponseCommand {
            expected: header.code(),
            actual: echoed,
        });
    }

    // 3. Length envelope: overhead + data + HMAC, plus at most one
    //    block of padding
    let data_len = u16::from_be_bytes([plain[6], plain[7]]) as usize;
    let signed_len = RSP_OVERHEAD + data_len;
    if plain.len() < signed_len + HMAC_LEN || plain.len() > signed_len + HMAC_LEN + BLOCK_LEN {
        return Err(Error::WrongResponseFormat);
    }

    // 4. Signature over counter + echo + length + data + status
    crypto::hmac_verify(
        &keys.sign_ba,
        &plain[..signed_len],
        &plain[signed_len..signed_len + HMAC_LEN],
    )?;

    // 5. Status type echoes the command type
    let status_type = plain[8 + data_len];
    if status_type != header.kind() {
        return Err(Error::WrongResponseType {
            expected: header.kind(),
            actual: status_type,
        });
    }

    // 6. Status code; 0x00 is success
    let status = plain[9 + data_len];
    let data = plain[8..8 + data_len].to_vec();
    Ok((data, status))
}

/// Wire length of a secure command for a given data length:
/// plaintext + HMAC padded up to a block, plus the trailing IV.
pub fn wire_len(data_len: usize) -> usize {
    (CMD_OVERHEAD + data_len + HMAC_LEN).div_ceil(BLOCK_LEN) * BLOCK_LEN + BLOCK_LEN
}
