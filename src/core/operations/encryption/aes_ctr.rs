//! AES-CTR + HMAC-SHA384 hash encryption.
//!
//! For every call a random 16-byte nonce is drawn and two keys are derived
//! from the master key:
//!
//! - `Ek = HMAC-SHA384(key, domain || nonce)`, truncated to the key length
//! - `Ak = HMAC-SHA384(key, domain || nonce || "auth-key-for-tag")`
//!
//! The ciphertext is `AES-CTR(Ek, nonce, data)` and the tag is
//! `HMAC-SHA384(Ak, nonce || ciphertext)`.

use hmac::{Hmac, Mac};
use sha2::Sha384;
use zeroize::Zeroizing;

use super::EncryptionAlgorithm;
use crate::core::error::{PasschainError, PasschainResult};
use crate::core::operations::random::RandomSource;

/// Nonce size for AES-CTR (16 bytes).
pub const AES_CTR_NONCE_SIZE: usize = 16;

/// Tag size for HMAC-SHA384 (48 bytes).
pub const AES_CTR_TAG_SIZE: usize = 48;

/// Domain separation for key derivation.
const AES_CTR_DOMAIN: &[u8] = b"passchain.aes-ctr.";

/// Domain separation suffix for the authentication key.
const AUTH_KEY_SUFFIX: &[u8] = b"auth-key-for-tag";

/// AES-128/192/256 in CTR mode, authenticated with HMAC-SHA384.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AesCtrHmac;

/// Derives encryption and authentication keys for one nonce.
fn derive_keys(
    key: &[u8],
    nonce: &[u8],
) -> PasschainResult<(Zeroizing<Vec<u8>>, Zeroizing<[u8; 48]>)> {
    let mut ek_mac =
        <Hmac<Sha384> as Mac>::new_from_slice(key).map_err(|_| PasschainError::CryptoError)?;
    ek_mac.update(AES_CTR_DOMAIN);
    ek_mac.update(nonce);
    let ek_result = ek_mac.finalize().into_bytes();
    let encryption_key = Zeroizing::new(ek_result[..key.len()].to_vec());

    let mut ak_mac =
        <Hmac<Sha384> as Mac>::new_from_slice(key).map_err(|_| PasschainError::CryptoError)?;
    ak_mac.update(AES_CTR_DOMAIN);
    ak_mac.update(nonce);
    ak_mac.update(AUTH_KEY_SUFFIX);
    let auth_key: Zeroizing<[u8; 48]> = Zeroizing::new(ak_mac.finalize().into_bytes().into());

    Ok((encryption_key, auth_key))
}

/// Applies the AES-CTR keystream in place; the AES variant follows the key length.
fn aes_ctr_apply(key: &[u8], nonce: &[u8], data: &mut [u8]) -> PasschainResult<()> {
    use aes::cipher::{KeyIvInit, StreamCipher};
    use ctr::Ctr128BE;

    match key.len() {
        16 => Ctr128BE::<aes::Aes128>::new_from_slices(key, nonce)
            .map_err(|_| PasschainError::CryptoError)?
            .apply_keystream(data),
        24 => Ctr128BE::<aes::Aes192>::new_from_slices(key, nonce)
            .map_err(|_| PasschainError::CryptoError)?
            .apply_keystream(data),
        32 => Ctr128BE::<aes::Aes256>::new_from_slices(key, nonce)
            .map_err(|_| PasschainError::CryptoError)?
            .apply_keystream(data),
        _ => return Err(PasschainError::CryptoError),
    }
    Ok(())
}

/// Computes the HMAC-SHA384 tag over nonce and ciphertext.
fn compute_tag(
    auth_key: &[u8; 48],
    nonce: &[u8],
    ciphertext: &[u8],
) -> PasschainResult<[u8; AES_CTR_TAG_SIZE]> {
    let mut tag_mac =
        <Hmac<Sha384> as Mac>::new_from_slice(auth_key).map_err(|_| PasschainError::CryptoError)?;
    tag_mac.update(nonce);
    tag_mac.update(ciphertext);
    Ok(tag_mac.finalize().into_bytes().into())
}

impl EncryptionAlgorithm for AesCtrHmac {
    fn name(&self) -> &'static str {
        "aes-ctr-hmac-sha384"
    }

    fn is_valid_key_size(&self, size: usize) -> bool {
        matches!(size, 16 | 24 | 32)
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

        let mut nonce = [0u8; AES_CTR_NONCE_SIZE];
        random.fill_bytes(&mut nonce)?;

        let (encryption_key, auth_key) = derive_keys(key, &nonce)?;

        let mut ciphertext = data.to_vec();
        aes_ctr_apply(&encryption_key, &nonce, &mut ciphertext)?;

        let tag = compute_tag(&auth_key, &nonce, &ciphertext)?;

        // Concatenate: nonce || ciphertext || tag
        let mut output = Vec::with_capacity(AES_CTR_NONCE_SIZE + ciphertext.len() + AES_CTR_TAG_SIZE);
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
        if data.len() < AES_CTR_NONCE_SIZE + AES_CTR_TAG_SIZE {
            return Err(PasschainError::InvalidFormat);
        }

        let (nonce, rest) = data.split_at(AES_CTR_NONCE_SIZE);
        let (ciphertext, tag) = rest.split_at(rest.len() - AES_CTR_TAG_SIZE);

        let (encryption_key, auth_key) = derive_keys(key, nonce)?;
        let computed_tag = compute_tag(&auth_key, nonce, ciphertext)?;

        if computed_tag.as_slice().ct_eq(tag).into() {
            let mut plaintext = ciphertext.to_vec();
            aes_ctr_apply(&encryption_key, nonce, &mut plaintext)?;
            Ok(plaintext)
        } else {
            Err(PasschainError::AuthenticationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::operations::random::{CountingRandom, OsRandom};

    const PLAINTEXT: &[u8] = b"final hash bytes for encryption";

    fn key(len: usize) -> Vec<u8> {
        (0..len as u8).collect()
    }

    // nonce = 00..0f, key = 00..(len-1)
    const AES256_VECTOR: &str = "000102030405060708090a0b0c0d0e0f4017f3621967eed40dec436067f386659f16a7f3340744a8847f864b8536e998e75b62702ffda9d1b3975da18d6de078eb1417ba7aa89d4dcc24a68bce4649e584300ebe4293a6d99991c52d1356b5";
    const AES128_VECTOR: &str = "000102030405060708090a0b0c0d0e0ff8249597e1bcaa2be533d54aa558d996e86885485009ce4cd39260851fbe62c66811650d56ca8b4bd93f360061cc9c08f7a861c7abeca0a4bde27b6789885e91b7b61a49698ac40a371b1cf586fbdb";
    const AES192_VECTOR: &str = "000102030405060708090a0b0c0d0e0f06279afe61de3aeeab0aabf67404383619c6ad6fa3a9119b90cffea693d76b824d5bb38b0151eb9567469c0a46a0ed10262465553f928ee95293cedee719a689df86d35cebbb4433e150e6c0c0fc6e";

    #[test]
    fn test_known_ciphertexts() -> PasschainResult<()> {
        for (len, vector) in [(32, AES256_VECTOR), (16, AES128_VECTOR), (24, AES192_VECTOR)] {
            let encrypted = AesCtrHmac.encrypt(&key(len), PLAINTEXT, &CountingRandom)?;
            let expected = hex::decode(vector).expect("valid hex");
            assert_eq!(encrypted, expected, "AES key size {len}");
            assert_eq!(AesCtrHmac.decrypt(&key(len), &encrypted)?, PLAINTEXT);
        }
        Ok(())
    }

    #[test]
    fn test_randomized_nonce() -> PasschainResult<()> {
        let a = AesCtrHmac.encrypt(&key(32), PLAINTEXT, &OsRandom)?;
        let b = AesCtrHmac.encrypt(&key(32), PLAINTEXT, &OsRandom)?;
        assert_ne!(a, b);
        assert_eq!(AesCtrHmac.decrypt(&key(32), &a)?, PLAINTEXT);
        assert_eq!(AesCtrHmac.decrypt(&key(32), &b)?, PLAINTEXT);
        Ok(())
    }

    #[test]
    fn test_tampered_ciphertext() -> PasschainResult<()> {
        let mut encrypted = AesCtrHmac.encrypt(&key(32), PLAINTEXT, &OsRandom)?;
        encrypted[AES_CTR_NONCE_SIZE] ^= 0x01;
        let result = AesCtrHmac.decrypt(&key(32), &encrypted);
        assert!(matches!(result, Err(PasschainError::AuthenticationFailed)));
        Ok(())
    }

    #[test]
    fn test_truncated_input() {
        let result = AesCtrHmac.decrypt(&key(32), &[0u8; AES_CTR_NONCE_SIZE + AES_CTR_TAG_SIZE - 1]);
        assert!(matches!(result, Err(PasschainError::InvalidFormat)));
    }

    #[test]
    fn test_key_sizes() {
        assert!(AesCtrHmac.is_valid_key_size(16));
        assert!(AesCtrHmac.is_valid_key_size(24));
        assert!(AesCtrHmac.is_valid_key_size(32));
        assert!(!AesCtrHmac.is_valid_key_size(0));
        assert!(!AesCtrHmac.is_valid_key_size(31));
        assert!(!AesCtrHmac.is_valid_key_size(64));
    }
}
