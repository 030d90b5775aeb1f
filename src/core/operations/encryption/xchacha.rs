//! XChaCha20 + BLAKE2b hash encryption.
//!
//! Per call:
//!
//! ```text
//! n   = random(32)
//! tmp = BLAKE2b-MAC(key, "passchain.xchacha20." || n, len = 56)
//! Ek  = tmp[0..32], n2 = tmp[32..56]
//! Ak  = BLAKE2b-MAC(key, "passchain.xchacha20." || n || "auth-key-for-tag", len = 32)
//! c   = XChaCha20(Ek, n2, data)
//! t   = BLAKE2b-MAC(Ak, n || c, len = 32)
//! out = n || c || t
//! ```

use blake2::digest::{FixedOutput, KeyInit, Update};
use blake2::Blake2bMac;
use zeroize::Zeroizing;

use super::EncryptionAlgorithm;
use crate::core::error::{PasschainError, PasschainResult};
use crate::core::operations::random::RandomSource;

/// Nonce size (32 bytes).
pub const XCHACHA_NONCE_SIZE: usize = 32;

/// Tag size (32 bytes).
pub const XCHACHA_TAG_SIZE: usize = 32;

/// Domain separation string for the KDF.
const XCHACHA_KDF_DOMAIN: &[u8] = b"passchain.xchacha20.";

/// Domain separation string for authentication key derivation.
const AUTH_KEY_DOMAIN: &[u8] = b"auth-key-for-tag";

type Blake2bMac56 = Blake2bMac<blake2::digest::consts::U56>;
type Blake2bMac32 = Blake2bMac<blake2::digest::consts::U32>;

/// XChaCha20 stream cipher authenticated with keyed BLAKE2b. 32-byte keys only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XChaCha20Blake2b;

/// Key material derived for one nonce: (encryption key, XChaCha20 nonce, auth key).
type DerivedKeys = (Zeroizing<[u8; 32]>, [u8; 24], Zeroizing<[u8; 32]>);

fn derive_keys(key: &[u8], nonce: &[u8]) -> PasschainResult<DerivedKeys> {
    let mut kdf_mac = <Blake2bMac56 as KeyInit>::new_from_slice(key)
        .map_err(|_| PasschainError::CryptoError)?;
    <Blake2bMac56 as Update>::update(&mut kdf_mac, XCHACHA_KDF_DOMAIN);
    <Blake2bMac56 as Update>::update(&mut kdf_mac, nonce);
    let tmp = <Blake2bMac56 as FixedOutput>::finalize_fixed(kdf_mac);

    let mut encryption_key = Zeroizing::new([0u8; 32]);
    encryption_key.copy_from_slice(&tmp[..32]);

    let mut xchacha_nonce = [0u8; 24];
    xchacha_nonce.copy_from_slice(&tmp[32..56]);

    let mut auth_mac = <Blake2bMac32 as KeyInit>::new_from_slice(key)
        .map_err(|_| PasschainError::CryptoError)?;
    <Blake2bMac32 as Update>::update(&mut auth_mac, XCHACHA_KDF_DOMAIN);
    <Blake2bMac32 as Update>::update(&mut auth_mac, nonce);
    <Blake2bMac32 as Update>::update(&mut auth_mac, AUTH_KEY_DOMAIN);
    let auth_key: Zeroizing<[u8; 32]> =
        Zeroizing::new(<Blake2bMac32 as FixedOutput>::finalize_fixed(auth_mac).into());

    Ok((encryption_key, xchacha_nonce, auth_key))
}

fn apply_keystream(encryption_key: &[u8; 32], xchacha_nonce: &[u8; 24], data: &mut [u8]) {
    use chacha20::cipher::{KeyIvInit, StreamCipher};
    use chacha20::XChaCha20;

    let mut cipher = XChaCha20::new(&(*encryption_key).into(), &(*xchacha_nonce).into());
    cipher.apply_keystream(data);
}

fn compute_tag(
    auth_key: &[u8; 32],
    nonce: &[u8],
    ciphertext: &[u8],
) -> PasschainResult<[u8; XCHACHA_TAG_SIZE]> {
    let mut tag_mac = <Blake2bMac32 as KeyInit>::new_from_slice(auth_key)
        .map_err(|_| PasschainError::CryptoError)?;
    <Blake2bMac32 as Update>::update(&mut tag_mac, nonce);
    <Blake2bMac32 as Update>::update(&mut tag_mac, ciphertext);
    Ok(<Blake2bMac32 as FixedOutput>::finalize_fixed(tag_mac).into())
}

impl EncryptionAlgorithm for XChaCha20Blake2b {
    fn name(&self) -> &'static str {
        "xchacha20-blake2b"
    }

    fn is_valid_key_size(&self, size: usize) -> bool {
        size == 32
    }

    fn encrypt(
        &self,
        key: &[u8],
        data: &[u8],
        random: &dyn RandomSource,
    ) -> PasschainResult<Vec<u8>> {
        if !self.is_valid_key_size(key.len()) {
            return Err(PasschainError::CryptoError);
        }

        let mut nonce = [0u8; XCHACHA_NONCE_SIZE];
        random.fill_bytes(&mut nonce)?;

        let (encryption_key, xchacha_nonce, auth_key) = derive_keys(key, &nonce)?;

        let mut ciphertext = data.to_vec();
        apply_keystream(&encryption_key, &xchacha_nonce, &mut ciphertext);

        let tag = compute_tag(&auth_key, &nonce, &ciphertext)?;

        let mut output =
            Vec::with_capacity(XCHACHA_NONCE_SIZE + ciphertext.len() + XCHACHA_TAG_SIZE);
        output.extend_from_slice(&nonce);
        output.extend_from_slice(&ciphertext);
        output.extend_from_slice(&tag);
        Ok(output)
    }

    fn decrypt(&self, key: &[u8], data: &[u8]) -> PasschainResult<Vec<u8>> {
        use subtle::ConstantTimeEq;

        if !self.is_valid_key_size(key.len()) {
            return Err(PasschainError::CryptoError);
        }
        if data.len() < XCHACHA_NONCE_SIZE + XCHACHA_TAG_SIZE {
            return Err(PasschainError::InvalidFormat);
        }

        let (nonce, rest) = data.split_at(XCHACHA_NONCE_SIZE);
        let (ciphertext, tag) = rest.split_at(rest.len() - XCHACHA_TAG_SIZE);

        let (encryption_key, xchacha_nonce, auth_key) = derive_keys(key, nonce)?;
        let computed_tag = compute_tag(&auth_key, nonce, ciphertext)?;

        // Constant-time tag comparison
        if computed_tag.as_slice().ct_eq(tag).into() {
            let mut plaintext = ciphertext.to_vec();
            apply_keystream(&encryption_key, &xchacha_nonce, &mut plaintext);
            Ok(plaintext)
        } else {
            Err(PasschainError::AuthenticationFailed)
        }
    }
}
