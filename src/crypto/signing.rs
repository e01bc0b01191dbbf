//! # Signing
//!
//! Ed25519 signatures over a digest that binds the message body to whatever
//! fresh per-message randomness happens to be present on the envelope.
//!
//! ## Digest rule
//!
//! ```text
//! digest = SHA-256( ephemeral-pub-or-empty || body-plain || nonce-or-empty )
//! ```
//!
//! `ephemeral-pub` and `nonce` are drawn straight from the `PlainText`
//! being signed — present when the message also went through [`sealing`],
//! absent for a plain sign-only message. At least one of the two must be
//! present; signing without either is refused, since then nothing would
//! distinguish a replayed signature from a fresh one.
//!
//! [`sealing`]: crate::crypto::hybrid

use ed25519_dalek::{Signature, Signer, Verifier, VerifyingKey};
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

use crate::crypto::key_material::KeyMaterial;
use crate::envelope::plain::PlainText;
use crate::error::{Error, Result};

/// Size in bytes of an Ed25519 signature.
pub const SIGNATURE_SIZE: usize = 64;

/// Size in bytes of the nonce carried on a signed/sealed envelope.
pub const NONCE_SIZE: usize = crate::crypto::hybrid::NONCE_SIZE;

fn digest(ephemeral_pub: Option<&[u8; 32]>, body: &[u8], nonce: Option<&[u8; NONCE_SIZE]>) -> [u8; 32] {
    let mut hasher = Sha256::new();
    if let Some(e) = ephemeral_pub {
        hasher.update(e);
    }
    hasher.update(body);
    if let Some(n) = nonce {
        hasher.update(n);
    }
    hasher.finalize().into()
}

/// Sign `plain` in place. Generates a nonce from `rng` if the envelope
/// doesn't already carry one or an ephemeral public key. This is the
/// convenience entry point `Principal::sign` uses, and it always succeeds.
pub fn sign<R: RngCore + CryptoRng>(
    key_material: &KeyMaterial,
    plain: &mut PlainText,
    rng: &mut R,
) -> Result<()> {
    if plain.nonce.is_none() && plain.ephemeral_pub.is_none() {
        let mut nonce = [0u8; NONCE_SIZE];
        rng.fill_bytes(&mut nonce);
        plain.nonce = Some(nonce);
    }
    sign_strict(key_material, plain)
}

/// Sign `plain` in place without generating anything. Fails with
/// [`Error::InsufficientRandomness`] if `plain` carries neither a nonce
/// nor an ephemeral public key to bind the digest to.
pub fn sign_strict(key_material: &KeyMaterial, plain: &mut PlainText) -> Result<()> {
    if plain.nonce.is_none() && plain.ephemeral_pub.is_none() {
        return Err(Error::InsufficientRandomness);
    }
    let d = digest(plain.ephemeral_pub.as_ref(), &plain.body, plain.nonce.as_ref());
    let signing_key = key_material.signing_key();
    let sig: Signature = signing_key.sign(&d);
    plain.sig = Some(sig.to_bytes());
    Ok(())
}

/// Verify `plain`'s signature against `signer`. Never errors: any failure
/// in digest assembly or signature decoding is folded into `false`.
pub fn verify(signer: &VerifyingKey, plain: &PlainText) -> bool {
    let Some(sig_bytes) = plain.sig else {
        return false;
    };
    if plain.nonce.is_none() && plain.ephemeral_pub.is_none() {
        return false;
    }
    let sig = Signature::from_bytes(&sig_bytes);
    let d = digest(plain.ephemeral_pub.as_ref(), &plain.body, plain.nonce.as_ref());
    signer.verify(&d, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn sign_then_verify_succeeds() {
        let mut rng = OsRng;
        let km = KeyMaterial::generate(&mut rng);
        let mut plain = PlainText::new("greeting", b"hello world".to_vec());
        sign(&km, &mut plain, &mut rng).unwrap();
        assert!(verify(&km.verifying_key().unwrap(), &plain));
    }

    #[test]
    fn flipped_signature_bit_fails_verification() {
        let mut rng = OsRng;
        let km = KeyMaterial::generate(&mut rng);
        let mut plain = PlainText::new("greeting", b"hello world".to_vec());
        sign(&km, &mut plain, &mut rng).unwrap();
        let mut sig = plain.sig.unwrap();
        sig[0] ^= 0x01;
        plain.sig = Some(sig);
        assert!(!verify(&km.verifying_key().unwrap(), &plain));
    }

    #[test]
    fn flipped_body_bit_fails_verification() {
        let mut rng = OsRng;
        let km = KeyMaterial::generate(&mut rng);
        let mut plain = PlainText::new("greeting", b"hello world".to_vec());
        sign(&km, &mut plain, &mut rng).unwrap();
        plain.body[0] ^= 0x01;
        assert!(!verify(&km.verifying_key().unwrap(), &plain));
    }

    #[test]
    fn sign_strict_without_nonce_or_ephemeral_fails() {
        let mut rng = OsRng;
        let km = KeyMaterial::generate(&mut rng);
        let mut plain = PlainText::new("greeting", b"hello world".to_vec());
        assert!(matches!(
            sign_strict(&km, &mut plain),
            Err(Error::InsufficientRandomness)
        ));
    }

    #[test]
    fn verify_without_signature_is_false() {
        let km = KeyMaterial::generate(&mut OsRng);
        let plain = PlainText::new("greeting", b"hello world".to_vec());
        assert!(!verify(&km.verifying_key().unwrap(), &plain));
    }
}
