//! # Error Handling
//!
//! Every fallible operation in this crate returns `Result<T>`. Cryptographic
//! failures are never panics; the only panics are programmer errors such as
//! calling an operation on a `Principal` whose key material failed to derive.
//!
//! ## Error Categories
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR CATEGORIES                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Identity / key material                                               │
//! │   ├── NotInitialized        - operation on an identity with no keys    │
//! │   ├── InvalidKey            - hex/length/curve-point validation failed │
//! │   ├── KeyValidation         - KeyMaterial::validate sub-check failed   │
//! │   │                           (see KeyValidationFailure for which one) │
//! │   └── InvalidConfig         - persisted identity document is malformed │
//! │                                                                         │
//! │  Envelope / wire format                                                │
//! │   ├── InvalidEnvelope       - PEM/binary parse or framing failure      │
//! │   ├── Io                    - underlying reader/writer failed          │
//! │   ├── Json                  - identity document (de)serialization     │
//! │   └── Cbor                  - binary envelope (de)serialization       │
//! │                                                                         │
//! │  Cryptographic operations                                              │
//! │   ├── AeadFailure           - AEAD tag rejected the ciphertext         │
//! │   ├── BadEphemeral          - ephemeral public key absent or invalid   │
//! │   ├── InsufficientRandomness - sign requested with no nonce/ephemeral  │
//! │   └── VerificationFailed    - signature check returned false           │
//! │                                                                         │
//! │  Peer management                                                       │
//! │   ├── PeerAlreadyAdded      - AddPeer on an already-known nickname     │
//! │   └── NotFound              - nickname lookup miss                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error as ThisError;

/// Result type alias for oracle-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which sub-check inside [`crate::crypto::key_material::KeyMaterial::validate`]
/// failed. Kept distinct from the free-form [`Error::InvalidKey`] string so
/// callers can match on *which* invariant broke instead of parsing a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum KeyValidationFailure {
    /// The private encryption (X25519) slot is all-zero.
    #[error("private encryption key is zero")]
    ZeroPrivateEncryptionKey,
    /// The private signing (Ed25519) slot is all-zero.
    #[error("private signing key is zero")]
    ZeroPrivateSigningKey,
    /// The stored public encryption key doesn't match the one derived from
    /// the private encryption key.
    #[error("public encryption key does not match private key")]
    PublicEncryptionKeyMismatch,
    /// The stored public signing key doesn't match the one derived from the
    /// private signing key.
    #[error("public signing key does not match private key")]
    PublicSigningKeyMismatch,
    /// A self-signed probe message failed to verify under this key
    /// material's own public signing key.
    #[error("sign/verify self-test failed")]
    SignVerifyRoundTrip,
    /// A self-sealed probe message failed to decrypt back to its original
    /// plaintext under this key material's own public encryption key.
    #[error("encrypt/decrypt self-test failed")]
    EncryptDecryptRoundTrip,
}

/// The error type returned by every fallible operation in this crate.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The `Principal` has no key material (e.g. constructed but never
    /// generated or loaded).
    #[error("principal is not initialized")]
    NotInitialized,

    /// A key, signature, or other fixed-length value failed hex decoding,
    /// length validation, or curve-point validation.
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// `KeyMaterial::validate` found a specific internal inconsistency; see
    /// [`KeyValidationFailure`] for which sub-check failed.
    #[error("key material validation failed: {0}")]
    KeyValidation(#[from] KeyValidationFailure),

    /// A persisted identity document is syntactically malformed or its
    /// stored nickname does not match the one derived from its public key.
    #[error("invalid identity configuration: {0}")]
    InvalidConfig(String),

    /// A PEM or binary envelope failed to parse, or its structured fields
    /// are internally inconsistent (e.g. a length mismatch).
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),

    /// AEAD decryption rejected the authentication tag; the ciphertext is
    /// not authentic under the derived key, or it was truncated below the
    /// minimum tag length.
    #[error("AEAD operation failed: {0}")]
    AeadFailure(String),

    /// The ephemeral public key carried on an envelope is absent, the
    /// all-zero point, or not a validly-encoded Curve25519 point.
    #[error("bad ephemeral public key: {0}")]
    BadEphemeral(String),

    /// `sign` was requested on a `PlainText` carrying neither a nonce nor
    /// an ephemeral public key, so the digest would not be bound to any
    /// fresh per-message randomness.
    #[error("signing requires a nonce or an ephemeral public key to be present")]
    InsufficientRandomness,

    /// A signature check returned false.
    #[error("signature verification failed")]
    VerificationFailed,

    /// `add_peer` was called with a peer whose nickname is already present
    /// in the peer map. Not fatal: the existing entry is left untouched.
    #[error("peer '{0}' is already known")]
    PeerAlreadyAdded(String),

    /// A nickname lookup found no matching peer.
    #[error("no peer named '{0}'")]
    NotFound(String),

    /// The reader/writer supplied by the caller for persistence failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The identity persistence document failed to (de)serialize as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The binary envelope failed to deserialize as CBOR.
    #[error("CBOR decode error: {0}")]
    CborDecode(#[from] ciborium::de::Error<std::io::Error>),

    /// The binary envelope failed to serialize as CBOR.
    #[error("CBOR encode error: {0}")]
    CborEncode(#[from] ciborium::ser::Error<std::io::Error>),
}
