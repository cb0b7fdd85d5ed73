// sscp-rs/sscp/src/secure/crypto.rs

use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use crate::{Error, Result};

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type HmacSha256 = Hmac<Sha256>;

/// AES block and key length
pub const BLOCK_LEN: usize = 16;
/// HMAC-SHA-256 output length
pub const HMAC_LEN: usize = 32;

/// HMAC-SHA-256 under a 16-byte session or transport key
pub fn hmac_sha256(key: &[u8; 16], data: &[u8]) -> Result<[u8; HMAC_LEN]> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|_| Error::InternalFailure("hmac init"))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

/// Constant-time HMAC check. `Mac::verify_slice` never short-circuits,
/// so response signatures cannot be probed byte by byte.
pub fn hmac_verify(key: &[u8; 16], data: &[u8], tag: &[u8]) -> Result<()> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|_| Error::InternalFailure("hmac init"))?;
    mac.update(data);
    mac.verify_slice(tag)
        .map_err(|_| Error::WrongResponseSignature)
}

fn check_block_buffer(buf: &[u8], iv: &[u8]) -> Result<()> {
    if buf.is_empty() || buf.len() % BLOCK_LEN != 0 {
        return Err(Error::InternalFailure(
            "cipher buffer must be a nonzero multiple of 16",
        ));
    }
    if iv.len() != BLOCK_LEN {
        return Err(Error::InternalFailure("IV must be exactly 16 bytes"));
    }
    Ok(())
}

/// AES-128-CBC encrypt in place. The caller pads; length must already
/// be a nonzero multiple of the block size.
pub fn cbc_encrypt(key: &[u8; 16], iv: &[u8; 16], buf: &mut [u8]) -> Result<()> {
    check_block_buffer(buf, iv)?;
    let len = buf.len();
    let enc = Aes128CbcEnc::new_from_slices(key, iv)
        .map_err(|_| Error::InternalFailure("cipher init"))?;
    enc.encrypt_padded_mut::<NoPadding>(buf, len)
        .map_err(|_| Error::InternalFailure("cbc encrypt"))?;
    Ok(())
}

/// AES-128-CBC decrypt in place.
pub fn cbc_decrypt(key: &[u8; 16], iv: &[u8; 16], buf: &mut [u8]) -> Result<()> {
    check_block_buffer(buf, iv)?;
    let dec = Aes128CbcDec::new_from_slices(key, iv)
        .map_err(|_| Error::InternalFailure("cipher init"))?;
    dec.decrypt_padded_mut::<NoPadding>(buf)
        .map_err(|_| Error::InternalFailure("cbc decrypt"))?;
    Ok(())
}

/// Fill a buffer from the OS CSPRNG
pub fn random_bytes(buf: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|_| Error::InternalFailure("rng"))
}
