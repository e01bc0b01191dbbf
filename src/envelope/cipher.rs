//! # CipherText
//!
//! The sealed counterpart to [`PlainText`]: same metadata envelope, but
//! `body` holds AEAD ciphertext (including its 16-byte tag) instead of a
//! plaintext body.
//!
//! [`PlainText`]: crate::envelope::plain::PlainText

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::envelope::plain::PlainText;
use crate::envelope::sig_serde;

/// The sealed form of a message. Carries the same header/signature/nonce/
/// ephemeral-pub/aad metadata as [`PlainText`]; `body` is ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherText {
    /// Free-form type label, carried over unchanged from the `PlainText`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Ordered string headers.
    pub headers: BTreeMap<String, String>,
    /// Ciphertext bytes (plaintext length + 16-byte Poly1305 tag).
    #[serde(rename = "ciphertext")]
    pub body: Vec<u8>,
    /// Ed25519 signature, if the plaintext was signed before sealing.
    #[serde(rename = "signature", with = "sig_serde")]
    pub sig: Option<[u8; 64]>,
    /// AEAD nonce (always the all-zero universal nonce; carried explicitly
    /// so the wire format doesn't bake in the assumption).
    pub nonce: [u8; 12],
    /// Ephemeral public key used to derive the AEAD key.
    #[serde(rename = "ephpub")]
    pub ephemeral_pub: [u8; 32],
    /// Additional authenticated data, if any was bound in.
    pub aad: Option<Vec<u8>>,
}

impl CipherText {
    /// Carry a `PlainText`'s headers/type/sig/aad over onto a freshly
    /// sealed body.
    pub fn from_plain_parts(
        plain: &PlainText,
        body: Vec<u8>,
        nonce: [u8; 12],
        ephemeral_pub: [u8; 32],
    ) -> Self {
        Self {
            kind: plain.kind.clone(),
            headers: plain.headers.clone(),
            body,
            sig: plain.sig,
            nonce,
            ephemeral_pub,
            aad: plain.aad.clone(),
        }
    }

    /// Rehydrate a `PlainText` around a decrypted body, carrying the
    /// metadata back over.
    pub fn into_plain(self, body: Vec<u8>) -> PlainText {
        PlainText {
            kind: self.kind,
            headers: self.headers,
            body,
            sig: self.sig,
            nonce: Some(self.nonce),
            ephemeral_pub: Some(self.ephemeral_pub),
            aad: self.aad,
        }
    }
}
