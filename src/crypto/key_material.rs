//! # Key Material
//!
//! A `Principal`'s full private state: two key pairs packed into a single
//! 128-byte buffer.
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      KEY MATERIAL (128 bytes)                           │
//! ├───────────────┬───────────────┬───────────────┬─────────────────────────┤
//! │  pub-enc 32B  │  priv-enc 32B │  pub-sig 32B  │      priv-sig 32B       │
//! │  X25519 pub   │  X25519 priv  │  Ed25519 pub  │      Ed25519 seed       │
//! └───────────────┴───────────────┴───────────────┴─────────────────────────┘
//! ```
//!
//! Only the two private slots are ever written to storage
//! (`marshal_binary`/`marshal_hex`); the public slots are re-derived on
//! load and checked for agreement.

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand_core::{CryptoRng, RngCore};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::ZeroizeOnDrop;

use crate::crypto::hybrid;
use crate::crypto::signing;
use crate::error::{Error, KeyValidationFailure, Result};

/// Number of bytes in one key slot.
pub const SLOT_SIZE: usize = 32;

/// Total size of the private portion that gets persisted (priv-enc || priv-sig).
pub const PRIVATE_SIZE: usize = SLOT_SIZE * 2;

/// Total size of the public portion (pub-enc || pub-sig).
pub const PUBLIC_SIZE: usize = SLOT_SIZE * 2;

/// The dual key pair backing a `Principal`: an X25519 pair for key
/// agreement and an Ed25519 pair for signing.
///
/// Private slots are zeroized on drop.
#[derive(ZeroizeOnDrop)]
pub struct KeyMaterial {
    #[zeroize(skip)]
    pub_enc: [u8; SLOT_SIZE],
    priv_enc: [u8; SLOT_SIZE],
    #[zeroize(skip)]
    pub_sig: [u8; SLOT_SIZE],
    priv_sig: [u8; SLOT_SIZE],
}

impl KeyMaterial {
    /// Draw fresh private key bytes from `rng` and derive the matching
    /// public keys.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut priv_enc = [0u8; SLOT_SIZE];
        let mut priv_sig = [0u8; SLOT_SIZE];
        rng.fill_bytes(&mut priv_enc);
        rng.fill_bytes(&mut priv_sig);
        Self::derive(priv_enc, priv_sig)
    }

    /// Derive a full `KeyMaterial` from the two private slots.
    pub fn derive(priv_enc: [u8; SLOT_SIZE], priv_sig: [u8; SLOT_SIZE]) -> Self {
        let enc_secret = StaticSecret::from(priv_enc);
        let pub_enc = X25519PublicKey::from(&enc_secret).to_bytes();

        let signing_key = SigningKey::from_bytes(&priv_sig);
        let pub_sig = signing_key.verifying_key().to_bytes();

        Self {
            pub_enc,
            priv_enc,
            pub_sig,
            priv_sig,
        }
    }

    /// The public encryption key (X25519).
    pub fn public_encryption_key(&self) -> [u8; SLOT_SIZE] {
        self.pub_enc
    }

    /// The public signing key (Ed25519).
    pub fn public_signing_key(&self) -> [u8; SLOT_SIZE] {
        self.pub_sig
    }

    pub(crate) fn static_secret(&self) -> StaticSecret {
        StaticSecret::from(self.priv_enc)
    }

    pub(crate) fn signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.priv_sig)
    }

    pub(crate) fn verifying_key(&self) -> Result<VerifyingKey> {
        VerifyingKey::from_bytes(&self.pub_sig)
            .map_err(|e| Error::InvalidKey(format!("signing public key: {e}")))
    }

    /// Serialize the private portion (priv-enc || priv-sig, 64 bytes).
    /// Public keys are re-derived on load, never stored.
    pub fn marshal_binary(&self) -> [u8; PRIVATE_SIZE] {
        let mut out = [0u8; PRIVATE_SIZE];
        out[..SLOT_SIZE].copy_from_slice(&self.priv_enc);
        out[SLOT_SIZE..].copy_from_slice(&self.priv_sig);
        out
    }

    /// Parse the private portion and rederive the public halves.
    pub fn unmarshal_binary(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_SIZE {
            return Err(Error::InvalidKey(format!(
                "key material must be {PRIVATE_SIZE} bytes, got {}",
                bytes.len()
            )));
        }
        let mut priv_enc = [0u8; SLOT_SIZE];
        let mut priv_sig = [0u8; SLOT_SIZE];
        priv_enc.copy_from_slice(&bytes[..SLOT_SIZE]);
        priv_sig.copy_from_slice(&bytes[SLOT_SIZE..]);
        Ok(Self::derive(priv_enc, priv_sig))
    }

    /// Hex-encode the private portion (128 hex chars).
    pub fn marshal_hex(&self) -> String {
        hex::encode(self.marshal_binary())
    }

    /// Decode the private portion from hex and rederive the public halves.
    pub fn unmarshal_hex(hex_str: &str) -> Result<Self> {
        let bytes =
            hex::decode(hex_str).map_err(|e| Error::InvalidKey(format!("invalid hex: {e}")))?;
        Self::unmarshal_binary(&bytes)
    }

    /// Hex-encode the public portion (pub-enc || pub-sig, 128 hex chars).
    pub fn public_hex(&self) -> String {
        let mut bytes = [0u8; PUBLIC_SIZE];
        bytes[..SLOT_SIZE].copy_from_slice(&self.pub_enc);
        bytes[SLOT_SIZE..].copy_from_slice(&self.pub_sig);
        hex::encode(bytes)
    }

    /// Run the internal consistency checks described in the module
    /// documentation: non-zero private slots, public keys that agree with
    /// their private counterparts, and a live sign/verify and
    /// encrypt/decrypt round trip against this key material's own public
    /// half. Each sub-check fails with its own [`KeyValidationFailure`]
    /// kind so a caller can tell which invariant broke.
    pub fn validate<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<()> {
        if self.priv_enc == [0u8; SLOT_SIZE] {
            return Err(KeyValidationFailure::ZeroPrivateEncryptionKey.into());
        }
        if self.priv_sig == [0u8; SLOT_SIZE] {
            return Err(KeyValidationFailure::ZeroPrivateSigningKey.into());
        }

        let expected_pub_enc = X25519PublicKey::from(&self.static_secret()).to_bytes();
        if expected_pub_enc != self.pub_enc {
            return Err(KeyValidationFailure::PublicEncryptionKeyMismatch.into());
        }

        let expected_pub_sig = self.signing_key().verifying_key().to_bytes();
        if expected_pub_sig != self.pub_sig {
            return Err(KeyValidationFailure::PublicSigningKeyMismatch.into());
        }

        const PROBE: &[u8] = b"oracle key material self-test";
        let mut plain = crate::envelope::plain::PlainText::new("probe", PROBE.to_vec());
        signing::sign(self, &mut plain, rng)?;
        if !signing::verify(&self.verifying_key()?, &plain) {
            return Err(KeyValidationFailure::SignVerifyRoundTrip.into());
        }

        let sealed = hybrid::seal(rng, &self.pub_enc, PROBE, None)?;
        let opened = hybrid::open(
            &self.static_secret(),
            &sealed.ephemeral_pub,
            &sealed.nonce,
            &sealed.ciphertext,
            None,
        )?;
        if opened != PROBE {
            return Err(KeyValidationFailure::EncryptDecryptRoundTrip.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn generate_derives_consistent_publics() {
        let mut rng = OsRng;
        let km = KeyMaterial::generate(&mut rng);
        assert_ne!(km.public_encryption_key(), [0u8; SLOT_SIZE]);
        assert_ne!(km.public_signing_key(), [0u8; SLOT_SIZE]);
        km.validate(&mut rng).unwrap();
    }

    #[test]
    fn binary_round_trip_preserves_keys() {
        let mut rng = OsRng;
        let km = KeyMaterial::generate(&mut rng);
        let bytes = km.marshal_binary();
        let restored = KeyMaterial::unmarshal_binary(&bytes).unwrap();
        assert_eq!(km.public_encryption_key(), restored.public_encryption_key());
        assert_eq!(km.public_signing_key(), restored.public_signing_key());
    }

    #[test]
    fn hex_round_trip_preserves_keys() {
        let mut rng = OsRng;
        let km = KeyMaterial::generate(&mut rng);
        let hex_str = km.marshal_hex();
        let restored = KeyMaterial::unmarshal_hex(&hex_str).unwrap();
        assert_eq!(km.public_hex(), restored.public_hex());
    }

    #[test]
    fn zero_private_keys_fail_validation() {
        let km = KeyMaterial::derive([0u8; SLOT_SIZE], [1u8; SLOT_SIZE]);
        let mut rng = OsRng;
        assert!(matches!(
            km.validate(&mut rng),
            Err(Error::KeyValidation(KeyValidationFailure::ZeroPrivateEncryptionKey))
        ));
    }

    #[test]
    fn zero_private_signing_key_fails_validation_distinctly() {
        let km = KeyMaterial::derive([1u8; SLOT_SIZE], [0u8; SLOT_SIZE]);
        let mut rng = OsRng;
        assert!(matches!(
            km.validate(&mut rng),
            Err(Error::KeyValidation(KeyValidationFailure::ZeroPrivateSigningKey))
        ));
    }

    #[test]
    fn unmarshal_rejects_wrong_length() {
        assert!(KeyMaterial::unmarshal_binary(&[0u8; 10]).is_err());
    }
}
