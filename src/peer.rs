//! # Peer
//!
//! A `Peer` is how everyone else's identity looks from the outside: only
//! public key material plus a derived nickname and free-form annotations.
//! `Principal` holds a map of these; nothing in a `Peer` can decrypt or
//! sign anything.

use std::collections::BTreeMap;

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use x25519_dalek::PublicKey as X25519PublicKey;

use crate::crypto::key_material::SLOT_SIZE;
use crate::error::{Error, Result};
use crate::nickname;

/// A known identity's public half: its two public keys, the nickname
/// derived from the signing key, and any annotations the holder has
/// attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    pub_enc: [u8; SLOT_SIZE],
    pub_sig: [u8; SLOT_SIZE],
    nick: String,
    #[serde(default)]
    annotations: BTreeMap<String, String>,
}

impl Peer {
    /// Build a `Peer` from its two public key slots, deriving the
    /// nickname. Rejects points that don't decode as valid Curve25519 /
    /// Ed25519 public values.
    pub fn from_public_bytes(pub_enc: [u8; SLOT_SIZE], pub_sig: [u8; SLOT_SIZE]) -> Result<Self> {
        // X25519PublicKey::from never itself fails to construct (any 32
        // bytes is accepted as a Montgomery u-coordinate), but Ed25519
        // verifying keys do reject invalid encodings.
        let _ = X25519PublicKey::from(pub_enc);
        VerifyingKey::from_bytes(&pub_sig)
            .map_err(|e| Error::InvalidKey(format!("signing public key: {e}")))?;

        let nick = nickname::from_public_signing_key(&pub_sig);
        Ok(Self {
            pub_enc,
            pub_sig,
            nick,
            annotations: BTreeMap::new(),
        })
    }

    /// Parse a `Peer` from 128 hex characters: pub-enc (64 chars) followed
    /// by pub-sig (64 chars).
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes =
            hex::decode(hex_str).map_err(|e| Error::InvalidKey(format!("invalid hex: {e}")))?;
        if bytes.len() != SLOT_SIZE * 2 {
            return Err(Error::InvalidKey(format!(
                "peer hex must decode to {} bytes, got {}",
                SLOT_SIZE * 2,
                bytes.len()
            )));
        }
        let mut pub_enc = [0u8; SLOT_SIZE];
        let mut pub_sig = [0u8; SLOT_SIZE];
        pub_enc.copy_from_slice(&bytes[..SLOT_SIZE]);
        pub_sig.copy_from_slice(&bytes[SLOT_SIZE..]);
        Self::from_public_bytes(pub_enc, pub_sig)
    }

    /// Hex-encode as pub-enc || pub-sig (128 hex chars).
    pub fn to_hex(&self) -> String {
        let mut bytes = [0u8; SLOT_SIZE * 2];
        bytes[..SLOT_SIZE].copy_from_slice(&self.pub_enc);
        bytes[SLOT_SIZE..].copy_from_slice(&self.pub_sig);
        hex::encode(bytes)
    }

    /// The nickname derived from this peer's public signing key.
    pub fn nickname(&self) -> &str {
        &self.nick
    }

    /// This peer's public encryption key.
    pub fn encryption_key(&self) -> [u8; SLOT_SIZE] {
        self.pub_enc
    }

    /// This peer's public signing key.
    pub fn signing_key(&self) -> [u8; SLOT_SIZE] {
        self.pub_sig
    }

    pub(crate) fn verifying_key(&self) -> Result<VerifyingKey> {
        VerifyingKey::from_bytes(&self.pub_sig)
            .map_err(|e| Error::InvalidKey(format!("signing public key: {e}")))
    }

    /// This peer's free-form annotations.
    pub fn annotations(&self) -> &BTreeMap<String, String> {
        &self.annotations
    }

    /// Attach or replace an annotation.
    pub fn set_annotation(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.annotations.insert(key.into(), value.into());
    }

    /// Compare two peers by their public key bytes (nickname and
    /// annotations are derived/auxiliary and don't affect equality here).
    pub fn equal(&self, other: &Peer) -> bool {
        self.pub_enc == other.pub_enc && self.pub_sig == other.pub_sig
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_is_lossless() {
        let peer = Peer::from_public_bytes([1u8; 32], non_identity_signing_key()).unwrap();
        let hex_str = peer.to_hex();
        let restored = Peer::from_hex(&hex_str).unwrap();
        assert!(peer.equal(&restored));
        assert_eq!(peer.nickname(), restored.nickname());
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(Peer::from_hex("deadbeef").is_err());
    }

    #[test]
    fn equal_ignores_annotations() {
        let mut a = Peer::from_public_bytes([1u8; 32], non_identity_signing_key()).unwrap();
        let b = Peer::from_public_bytes([1u8; 32], non_identity_signing_key()).unwrap();
        a.set_annotation("trust", "high");
        assert!(a.equal(&b));
    }

    fn non_identity_signing_key() -> [u8; 32] {
        use ed25519_dalek::SigningKey;
        SigningKey::from_bytes(&[5u8; 32]).verifying_key().to_bytes()
    }
}
