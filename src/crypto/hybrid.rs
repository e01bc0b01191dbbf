//! # Hybrid Encryption Core
//!
//! Ephemeral-static ECDH on Curve25519, HKDF-SHA-256 key derivation, and
//! ChaCha20-Poly1305 sealing.
//!
//! ## Seal
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  seal(rng, recipient_pub, plaintext, aad)                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  1. e        = random X25519 scalar            (ephemeral, per message) │
//! │  2. E        = e * Basepoint                   (ephemeral public)       │
//! │  3. s        = e * recipient_pub                (ECDH shared scalar)    │
//! │  4. K        = HKDF-SHA256(ikm=s, salt=E||recipient_pub, info="oracle/v1")│
//! │  5. C        = ChaCha20Poly1305-Seal(K, nonce=0^12, aad, plaintext)      │
//! │  Output: (E, nonce=0^12, C)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The nonce is fixed at all-zero. This is only safe because `K` is unique
//! per message: it is derived from a fresh ephemeral key every call. Reusing
//! an AEAD key across two calls to `seal` with the same nonce would be
//! catastrophic; nothing in this module allows that to happen since every
//! call draws a new ephemeral scalar.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    ChaCha20Poly1305, Nonce as AeadNonce,
};
use hkdf::Hkdf;
use rand_core::{CryptoRng, RngCore};
use sha2::Sha256;
use x25519_dalek::{EphemeralSecret, PublicKey as X25519PublicKey, StaticSecret};

use crate::error::{Error, Result};

/// Domain separation string fed into HKDF as `info`.
pub const HKDF_INFO: &[u8] = b"oracle/v1";

/// Size in bytes of the ChaCha20-Poly1305 nonce used on the wire.
pub const NONCE_SIZE: usize = 12;

/// The all-zero nonce used for every message. Safe only because the AEAD
/// key is freshly derived per message (see module docs).
pub const UNIVERSAL_NONCE: [u8; NONCE_SIZE] = [0u8; NONCE_SIZE];

/// Output of [`seal`]: everything a recipient needs, plus the ciphertext.
pub struct Sealed {
    /// The ephemeral public key generated for this message.
    pub ephemeral_pub: [u8; 32],
    /// Always [`UNIVERSAL_NONCE`]; carried explicitly so callers can place
    /// it on the wire without reaching into this module's constants.
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext including the 16-byte Poly1305 tag.
    pub ciphertext: Vec<u8>,
}

fn derive_key(shared: &[u8; 32], ephemeral_pub: &[u8; 32], recipient_pub: &[u8; 32]) -> [u8; 32] {
    let mut salt = Vec::with_capacity(64);
    salt.extend_from_slice(ephemeral_pub);
    salt.extend_from_slice(recipient_pub);

    let hkdf = Hkdf::<Sha256>::new(Some(&salt), shared);
    let mut key = [0u8; 32];
    hkdf.expand(HKDF_INFO, &mut key)
        .expect("32 bytes is a valid HKDF-SHA256 output length");
    key
}

/// Encrypt `plaintext` for the holder of `recipient_pub` (a 32-byte X25519
/// public key). `aad` is authenticated but not encrypted.
pub fn seal<R: RngCore + CryptoRng>(
    rng: &mut R,
    recipient_pub: &[u8; 32],
    plaintext: &[u8],
    aad: Option<&[u8]>,
) -> Result<Sealed> {
    let recipient = X25519PublicKey::from(*recipient_pub);
    let ephemeral = EphemeralSecret::random_from_rng(&mut *rng);
    let ephemeral_pub = X25519PublicKey::from(&ephemeral).to_bytes();

    let shared = ephemeral.diffie_hellman(&recipient);
    let key = derive_key(shared.as_bytes(), &ephemeral_pub, recipient_pub);

    let cipher = ChaCha20Poly1305::new_from_slice(&key)
        .map_err(|e| Error::AeadFailure(format!("invalid derived key: {e}")))?;
    let payload = Payload {
        msg: plaintext,
        aad: aad.unwrap_or(&[]),
    };
    let ciphertext = cipher
        .encrypt(AeadNonce::from_slice(&UNIVERSAL_NONCE), payload)
        .map_err(|e| Error::AeadFailure(format!("seal failed: {e}")))?;

    Ok(Sealed {
        ephemeral_pub,
        nonce: UNIVERSAL_NONCE,
        ciphertext,
    })
}

/// Decrypt a message sealed with [`seal`], using our static private key.
pub fn open(
    our_secret: &StaticSecret,
    ephemeral_pub: &[u8; 32],
    nonce: &[u8; NONCE_SIZE],
    ciphertext: &[u8],
    aad: Option<&[u8]>,
) -> Result<Vec<u8>> {
    if ephemeral_pub == &[0u8; 32] {
        return Err(Error::BadEphemeral("ephemeral public key is zero".into()));
    }
    if ciphertext.len() < 16 {
        return Err(Error::AeadFailure("ciphertext shorter than AEAD tag".into()));
    }

    let ephemeral = X25519PublicKey::from(*ephemeral_pub);
    let our_pub = X25519PublicKey::from(our_secret).to_bytes();
    let shared = our_secret.diffie_hellman(&ephemeral);
    let key = derive_key(shared.as_bytes(), ephemeral_pub, &our_pub);

    let cipher = ChaCha20Poly1305::new_from_slice(&key)
        .map_err(|e| Error::AeadFailure(format!("invalid derived key: {e}")))?;
    let payload = Payload {
        msg: ciphertext,
        aad: aad.unwrap_or(&[]),
    };
    cipher
        .decrypt(AeadNonce::from_slice(nonce), payload)
        .map_err(|_| Error::AeadFailure("authentication tag mismatch".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn seal_open_round_trip() {
        let mut rng = OsRng;
        let recipient_secret = StaticSecret::random_from_rng(&mut rng);
        let recipient_pub = X25519PublicKey::from(&recipient_secret).to_bytes();

        let sealed = seal(&mut rng, &recipient_pub, b"hello bob", None).unwrap();
        let opened = open(
            &recipient_secret,
            &sealed.ephemeral_pub,
            &sealed.nonce,
            &sealed.ciphertext,
            None,
        )
        .unwrap();
        assert_eq!(opened, b"hello bob");
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let mut rng = OsRng;
        let recipient_secret = StaticSecret::random_from_rng(&mut rng);
        let recipient_pub = X25519PublicKey::from(&recipient_secret).to_bytes();

        let mut sealed = seal(&mut rng, &recipient_pub, b"hello bob", None).unwrap();
        sealed.ciphertext[0] ^= 0xFF;

        let result = open(
            &recipient_secret,
            &sealed.ephemeral_pub,
            &sealed.nonce,
            &sealed.ciphertext,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn zero_ephemeral_is_rejected() {
        let mut rng = OsRng;
        let recipient_secret = StaticSecret::random_from_rng(&mut rng);
        let sealed = seal(
            &mut rng,
            &X25519PublicKey::from(&recipient_secret).to_bytes(),
            b"hi",
            None,
        )
        .unwrap();
        let result = open(&recipient_secret, &[0u8; 32], &sealed.nonce, &sealed.ciphertext, None);
        assert!(matches!(result, Err(Error::BadEphemeral(_))));
    }

    #[test]
    fn short_ciphertext_is_rejected() {
        let mut rng = OsRng;
        let recipient_secret = StaticSecret::random_from_rng(&mut rng);
        let recipient_pub = X25519PublicKey::from(&recipient_secret).to_bytes();
        let result = open(&recipient_secret, &recipient_pub, &UNIVERSAL_NONCE, &[1, 2, 3], None);
        assert!(matches!(result, Err(Error::AeadFailure(_))));
    }

    #[test]
    fn mismatched_aad_is_rejected() {
        let mut rng = OsRng;
        let recipient_secret = StaticSecret::random_from_rng(&mut rng);
        let recipient_pub = X25519PublicKey::from(&recipient_secret).to_bytes();
        let sealed = seal(&mut rng, &recipient_pub, b"hi", Some(b"context-a")).unwrap();
        let result = open(
            &recipient_secret,
            &sealed.ephemeral_pub,
            &sealed.nonce,
            &sealed.ciphertext,
            Some(b"context-b"),
        );
        assert!(result.is_err());
    }
}
