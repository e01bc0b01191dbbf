//! # PlainText
//!
//! The in-the-clear half of a message: a body plus the structured metadata
//! (headers, nonce, ephemeral public key, signature) that travels with it
//! once it is composed, signed, or decrypted from a [`CipherText`].
//!
//! [`CipherText`]: crate::envelope::cipher::CipherText

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::sig_serde;

/// A message body together with its wire metadata, before or after
/// encryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainText {
    /// Free-form type label, e.g. "ORACLE MESSAGE".
    #[serde(rename = "type")]
    pub kind: String,
    /// String headers, emitted in `BTreeMap`'s lexical-by-key order rather
    /// than insertion order (a deliberate departure from the wire contract's
    /// "ordered by insertion" wording, kept for deterministic encoding).
    pub headers: BTreeMap<String, String>,
    /// The message body in the clear.
    #[serde(rename = "plaintext")]
    pub body: Vec<u8>,
    /// Ed25519 signature over the digest described in
    /// [`crate::crypto::signing`].
    #[serde(rename = "signature", with = "sig_serde")]
    pub sig: Option<[u8; 64]>,
    /// Per-message nonce. Present once this envelope has been signed or
    /// sealed.
    pub nonce: Option<[u8; 12]>,
    /// Ephemeral public key used to derive the AEAD key this body was (or
    /// will be) sealed under.
    #[serde(rename = "ephpub")]
    pub ephemeral_pub: Option<[u8; 32]>,
    /// Additional authenticated data bound into the AEAD tag but not
    /// encrypted.
    pub aad: Option<Vec<u8>>,
}

impl PlainText {
    /// Start a new `PlainText` with a type label and body. Headers, sig,
    /// nonce, ephemeral-pub, and aad start empty.
    pub fn new(kind: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            kind: kind.into(),
            headers: BTreeMap::new(),
            body,
            sig: None,
            nonce: None,
            ephemeral_pub: None,
            aad: None,
        }
    }

    /// Insert a header, returning `self` for chaining.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// The body as a UTF-8 string, lossily if it isn't valid UTF-8.
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_header_is_visible_on_the_built_value() {
        let pt = PlainText::new("note", b"hi".to_vec()).with_header("subject", "greeting");
        assert_eq!(pt.headers.get("subject").map(String::as_str), Some("greeting"));
    }
}
