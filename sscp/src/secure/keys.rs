// sscp-rs/sscp/src/secure/keys.rs

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, Result};

/// The four 16-byte session keys derived during authentication.
/// AB = host to reader, BA = reader to host. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionKeys {
    pub cipher_ab: [u8; 16],
    pub cipher_ba: [u8; 16],
    pub sign_ab: [u8; 16],
    pub sign_ba: [u8; 16],
}

const INFO_CIPHER_AB: &[u8] = b"sscp2 cipher host-to-reader";
const INFO_CIPHER_BA: &[u8] = b"sscp2 cipher reader-to-host";
const INFO_SIGN_AB: &[u8] = b"sscp2 sign host-to-reader";
const INFO_SIGN_BA: &[u8] = b"sscp2 sign reader-to-host";

impl SessionKeys {
    /// Derive the session quadruple from the transport key and both
    /// handshake nonces. HKDF-SHA-256, salt = RndA ‖ RndB, one
    /// domain-separation label per key. Deterministic: the same inputs
    /// always yield the same four keys.
    pub fn derive(auth_key: &[u8; 16], rnd_a: &[u8; 16], rnd_b: &[u8; 16]) -> Result<Self> {
        let mut salt = [0u8; 32];
        salt[..16].copy_from_slice(rnd_a);
        salt[16..].copy_from_slice(rnd_b);

        let hk = Hkdf::<Sha256>::new(Some(&salt), auth_key);
        let mut keys = Self {
            cipher_ab: [0u8; 16],
            cipher_ba: [0u8; 16],
            sign_ab: [0u8; 16],
            sign_ba: [0u8; 16],
        };
        for (info, out) in [
            (INFO_CIPHER_AB, &mut keys.cipher_ab),
            (INFO_CIPHER_BA, &mut keys.cipher_ba),
            (INFO_SIGN_AB, &mut keys.sign_ab),
            (INFO_SIGN_BA, &mut keys.sign_ba),
        ] {
            hk.expand(info, out)
                .map_err(|_| Error::InternalFailure("hkdf expand"))?;
        }
        salt.zeroize();
        Ok(keys)
    }
}

impl std::fmt::Debug for SessionKeys {
    // Never print key material
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys").finish_non_exhaustive()
    }
}
