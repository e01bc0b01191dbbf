//! # Principal
//!
//! The owner of an identity: key material plus a map of known peers. This
//! is the crate's main entry point — compose, sign, verify, encrypt,
//! decrypt, manage peers, and assert your identity to others, all hang off
//! a `Principal`.
//!
//! ## Persistence
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Principal::save()                    Principal::load_from()           │
//! │  ───────────────────                   ──────────────────────           │
//! │  expound(): attach derived "nick"      parse JSON document              │
//! │  fields for human readability          rederive nickname, compare       │
//! │  write JSON document                   against stored "nick", reject    │
//! │                                         on mismatch (condense)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::crypto::hybrid;
use crate::crypto::key_material::KeyMaterial;
use crate::crypto::signing;
use crate::envelope::cipher::CipherText;
use crate::envelope::plain::PlainText;
use crate::error::{Error, Result};
use crate::peer::Peer;

const IDENTITY_DOCUMENT_VERSION: &str = "v2.0.0";
const ASSERTION_TYPE: &str = "ORACLE ASSERTION";
const MESSAGE_TYPE: &str = "ORACLE MESSAGE";

/// A full cryptographic identity: key material plus known peers.
pub struct Principal {
    key_material: KeyMaterial,
    peers: RwLock<BTreeMap<String, Peer>>,
}

/// The JSON shape written by [`Principal::save`] and read by
/// [`Principal::load_from`].
#[derive(Serialize, Deserialize)]
struct IdentityDocument {
    version: String,
    #[serde(rename = "self")]
    this: SelfRecord,
    peers: BTreeMap<String, PeerRecord>,
}

#[derive(Serialize, Deserialize)]
struct SelfRecord {
    #[serde(rename = "priv")]
    private_hex: String,
    #[serde(rename = "pub")]
    public_hex: String,
    nick: String,
}

#[derive(Serialize, Deserialize)]
struct PeerRecord {
    #[serde(rename = "pub")]
    public_hex: String,
    nick: String,
}

impl Principal {
    /// Generate a fresh identity, drawing key material from `rng`.
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let key_material = KeyMaterial::generate(rng);
        key_material.validate(rng)?;
        Ok(Self {
            key_material,
            peers: RwLock::new(BTreeMap::new()),
        })
    }

    /// This identity's nickname.
    pub fn nickname(&self) -> String {
        crate::nickname::from_public_signing_key(&self.key_material.public_signing_key())
    }

    /// This identity's public-only `Peer` record, as others would see it.
    pub fn as_peer(&self) -> Result<Peer> {
        Peer::from_public_bytes(
            self.key_material.public_encryption_key(),
            self.key_material.public_signing_key(),
        )
    }

    /// Compose a plaintext message addressed by subject line. `to` is only
    /// recorded in the headers; encryption is a separate step.
    pub fn compose(&self, subject: &str, body: Vec<u8>) -> Result<PlainText> {
        let me = self.nickname();
        Ok(PlainText::new(MESSAGE_TYPE, body)
            .with_header("subject", subject)
            .with_header("from", me))
    }

    /// Seal `plain` for `recipient`. Draws a fresh ephemeral key from
    /// `rng`.
    pub fn encrypt<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        plain: &PlainText,
        recipient: &Peer,
    ) -> Result<CipherText> {
        let recipient_pub = recipient.encryption_key();
        let sealed = hybrid::seal(rng, &recipient_pub, &plain.body, plain.aad.as_deref())?;
        let mut headers = plain.headers.clone();
        headers.insert("to".to_string(), recipient.nickname().to_string());

        let mut with_to = plain.clone();
        with_to.headers = headers;
        Ok(CipherText::from_plain_parts(
            &with_to,
            sealed.ciphertext,
            sealed.nonce,
            sealed.ephemeral_pub,
        ))
    }

    /// Open a sealed message addressed to us.
    pub fn decrypt(&self, cipher: &CipherText) -> Result<PlainText> {
        let body = hybrid::open(
            &self.key_material.static_secret(),
            &cipher.ephemeral_pub,
            &cipher.nonce,
            &cipher.body,
            cipher.aad.as_deref(),
        )?;
        Ok(cipher.clone().into_plain(body))
    }

    /// Sign `plain` in place, generating a nonce first if it has neither a
    /// nonce nor an ephemeral public key.
    pub fn sign<R: RngCore + CryptoRng>(&self, rng: &mut R, plain: &mut PlainText) -> Result<()> {
        signing::sign(&self.key_material, plain, rng)
    }

    /// Check `plain`'s signature against `sender`.
    pub fn verify(&self, plain: &PlainText, sender: &Peer) -> bool {
        match sender.verifying_key() {
            Ok(vk) => signing::verify(&vk, plain),
            Err(_) => false,
        }
    }

    /// Add `peer` to our trusted peer set. Idempotent: re-adding a peer
    /// already known under the same nickname returns
    /// [`Error::PeerAlreadyAdded`] and leaves the existing entry
    /// untouched.
    pub fn add_peer(&self, peer: Peer) -> Result<()> {
        let nick = peer.nickname().to_string();
        let mut peers = self.peers.write();
        if peers.contains_key(&nick) {
            tracing::debug!(nickname = %nick, "peer already known, skipping add");
            return Err(Error::PeerAlreadyAdded(nick));
        }
        tracing::info!(nickname = %nick, "adding new trusted peer");
        peers.insert(nick, peer);
        Ok(())
    }

    /// Look up a known peer by nickname.
    pub fn peer(&self, nickname: &str) -> Result<Peer> {
        self.peers
            .read()
            .get(nickname)
            .cloned()
            .ok_or_else(|| Error::NotFound(nickname.to_string()))
    }

    /// All known peer nicknames.
    pub fn peer_nicknames(&self) -> Vec<String> {
        self.peers.read().keys().cloned().collect()
    }

    /// Produce a signed assertion of this identity: a self-describing
    /// token that a receiver can verify and then trust on first sight
    /// (see [`Principal::verify_assertion`]).
    pub fn assert<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<PlainText> {
        let now_nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();

        let body = serde_json::json!({
            "pub_enc": hex::encode(self.key_material.public_encryption_key()),
            "pub_sig": hex::encode(self.key_material.public_signing_key()),
            "nick": self.nickname(),
            "assertion": format!("I am {}", self.nickname()),
            "now_nanos": now_nanos.to_string(),
        });
        let body_bytes = serde_json::to_vec(&body)?;

        let mut plain = PlainText::new(ASSERTION_TYPE, body_bytes)
            .with_header("pubkey", hex::encode(self.key_material.public_signing_key()));
        self.sign(rng, &mut plain)?;
        Ok(plain)
    }

    /// Verify a received assertion. On success, the asserter is added as a
    /// trusted peer (trust-on-first-verify); a repeat verification of the
    /// same identity returns `Ok(true)` without re-adding.
    ///
    /// Returns `Err(Error::VerificationFailed)` if the signature doesn't
    /// check out. On success this always returns `Ok(true)` — whether the
    /// asserter was newly added or was already a known peer, the `bool`
    /// doesn't distinguish the two; it exists only to mirror the
    /// verified/not-verified shape of [`Principal::verify`].
    pub fn verify_assertion(&self, plain: &PlainText) -> Result<bool> {
        let pubkey_hex = plain
            .headers
            .get("pubkey")
            .ok_or_else(|| Error::InvalidEnvelope("assertion missing 'pubkey' header".into()))?;
        let pub_sig_bytes = hex::decode(pubkey_hex)
            .map_err(|e| Error::InvalidEnvelope(format!("invalid 'pubkey' hex: {e}")))?;
        let body: serde_json::Value = serde_json::from_slice(&plain.body)?;
        let pub_enc_hex = body
            .get("pub_enc")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidEnvelope("assertion body missing pub_enc".into()))?;
        let pub_enc_bytes = hex::decode(pub_enc_hex)
            .map_err(|e| Error::InvalidEnvelope(format!("invalid pub_enc hex: {e}")))?;

        let pub_enc: [u8; 32] = pub_enc_bytes
            .try_into()
            .map_err(|_| Error::InvalidKey("pub_enc must be 32 bytes".into()))?;
        let pub_sig: [u8; 32] = pub_sig_bytes
            .try_into()
            .map_err(|_| Error::InvalidKey("pub_sig must be 32 bytes".into()))?;

        let asserter = Peer::from_public_bytes(pub_enc, pub_sig)?;
        if !self.verify(plain, &asserter) {
            return Err(Error::VerificationFailed);
        }

        match self.add_peer(asserter) {
            Ok(()) => Ok(true),
            Err(Error::PeerAlreadyAdded(_)) => Ok(true),
            Err(e) => Err(e),
        }
    }

    /// Write this identity (private keys + known peers) to `writer` as a
    /// JSON document.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        let doc = IdentityDocument {
            version: IDENTITY_DOCUMENT_VERSION.to_string(),
            this: SelfRecord {
                private_hex: self.key_material.marshal_hex(),
                public_hex: self.key_material.public_hex(),
                nick: self.nickname(),
            },
            peers: self
                .peers
                .read()
                .iter()
                .map(|(nick, peer)| {
                    (
                        nick.clone(),
                        PeerRecord {
                            public_hex: peer.to_hex(),
                            nick: peer.nickname().to_string(),
                        },
                    )
                })
                .collect(),
        };
        tracing::info!(nickname = %doc.this.nick, peers = doc.peers.len(), "saving identity");
        serde_json::to_writer_pretty(writer, &doc)?;
        Ok(())
    }

    /// Load an identity previously written by [`Principal::save`].
    /// Rejects the document if its stored nickname doesn't match the one
    /// derived from the loaded public key.
    pub fn load_from<R: Read>(reader: R) -> Result<Self> {
        let doc: IdentityDocument = serde_json::from_reader(reader)?;
        let key_material = KeyMaterial::unmarshal_hex(&doc.this.private_hex)?;
        let derived_nick =
            crate::nickname::from_public_signing_key(&key_material.public_signing_key());
        if derived_nick != doc.this.nick {
            return Err(Error::InvalidConfig(format!(
                "stored nickname '{}' does not match derived nickname '{derived_nick}'",
                doc.this.nick
            )));
        }

        let mut peers = BTreeMap::new();
        for (nick, record) in doc.peers {
            let peer = Peer::from_hex(&record.public_hex)?;
            if peer.nickname() != record.nick || peer.nickname() != nick {
                return Err(Error::InvalidConfig(format!(
                    "peer nickname mismatch for '{nick}'"
                )));
            }
            peers.insert(nick, peer);
        }

        tracing::info!(nickname = %derived_nick, peers = peers.len(), "loaded identity");
        Ok(Self {
            key_material,
            peers: RwLock::new(peers),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::pem;
    use rand::rngs::OsRng;

    fn new_principal() -> Principal {
        Principal::new(&mut OsRng).unwrap()
    }

    #[test]
    fn encrypt_decrypt_round_trip_preserves_body_and_headers() {
        let alice = new_principal();
        let bob = new_principal();
        let bob_peer = bob.as_peer().unwrap();

        let plain = alice
            .compose("A Tale of Two Cities", b"It was the best of times".to_vec())
            .unwrap();
        let sealed = alice.encrypt(&mut OsRng, &plain, &bob_peer).unwrap();
        let opened = bob.decrypt(&sealed).unwrap();

        assert_eq!(opened.body, plain.body);
        assert_eq!(opened.headers.get("subject"), plain.headers.get("subject"));
        assert_eq!(opened.headers.get("to").unwrap(), &bob.nickname());
    }

    #[test]
    fn sign_then_verify_succeeds_and_tamper_fails() {
        let alice = new_principal();
        let mut plain = alice.compose("hi", b"hello world".to_vec()).unwrap();
        alice.sign(&mut OsRng, &mut plain).unwrap();
        let alice_peer = alice.as_peer().unwrap();
        assert!(alice.verify(&plain, &alice_peer));

        let mut tampered = plain.clone();
        let mut sig = tampered.sig.unwrap();
        sig[0] ^= 1;
        tampered.sig = Some(sig);
        assert!(!alice.verify(&tampered, &alice_peer));
    }

    #[test]
    fn assertion_round_trip_adds_peer_once() {
        let alice = new_principal();
        let bob = new_principal();

        let assertion = alice.assert(&mut OsRng).unwrap();
        assert!(bob.peer(&alice.nickname()).is_err());

        assert!(bob.verify_assertion(&assertion).unwrap());
        let learned = bob.peer(&alice.nickname()).unwrap();
        assert!(learned.equal(&alice.as_peer().unwrap()));

        // Repeat verification is idempotent.
        assert!(bob.verify_assertion(&assertion).unwrap());
        assert_eq!(bob.peer_nicknames().len(), 1);
    }

    #[test]
    fn assertion_pem_round_trip_still_verifies() {
        let alice = new_principal();
        let bob = new_principal();

        let assertion = alice.assert(&mut OsRng).unwrap();
        let encoded = pem::encode_plain(&assertion);
        let decoded = pem::decode_plain(&encoded).unwrap();

        assert!(bob.verify_assertion(&decoded).unwrap());
    }

    #[test]
    fn save_then_load_round_trips_identity_and_peers() {
        let alice = new_principal();
        let bob = new_principal();
        alice.add_peer(bob.as_peer().unwrap()).unwrap();

        let mut buf = Vec::new();
        alice.save(&mut buf).unwrap();

        let loaded = Principal::load_from(buf.as_slice()).unwrap();
        assert_eq!(loaded.nickname(), alice.nickname());
        assert_eq!(loaded.peer_nicknames(), alice.peer_nicknames());
    }

    #[test]
    fn save_then_load_round_trips_through_a_real_file() {
        use std::io::Seek;

        let alice = new_principal();
        let mut file = tempfile::tempfile().unwrap();
        alice.save(&file).unwrap();
        file.rewind().unwrap();

        let loaded = Principal::load_from(&file).unwrap();
        assert_eq!(loaded.nickname(), alice.nickname());
    }

    #[test]
    fn load_rejects_nickname_mismatch() {
        let alice = new_principal();
        let mut buf = Vec::new();
        alice.save(&mut buf).unwrap();

        let mut doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        doc["self"]["nick"] = serde_json::Value::String("not-the-real-nick".to_string());
        let tampered = serde_json::to_vec(&doc).unwrap();

        assert!(matches!(
            Principal::load_from(tampered.as_slice()),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn add_peer_twice_is_idempotent() {
        let alice = new_principal();
        let bob = new_principal();
        alice.add_peer(bob.as_peer().unwrap()).unwrap();
        assert!(matches!(
            alice.add_peer(bob.as_peer().unwrap()),
            Err(Error::PeerAlreadyAdded(_))
        ));
        assert_eq!(alice.peer_nicknames().len(), 1);
    }
}
