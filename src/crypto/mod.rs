//! # Cryptography
//!
//! The primitives behind a `Principal`'s identity and message handling.
//!
//! ## Algorithm Choices
//!
//! | Algorithm | Purpose |
//! |-----------|---------|
//! | X25519 | ephemeral-static ECDH key agreement |
//! | HKDF-SHA-256 | per-message AEAD key derivation (salt = eph-pub \|\| recipient-pub, info = "oracle/v1") |
//! | ChaCha20-Poly1305 | AEAD sealing, 12-byte all-zero nonce (safe: key is unique per message) |
//! | Ed25519 | signing over `SHA-256(ephemeral-pub \|\| body \|\| nonce)` |
//!
//! ## Security Considerations
//!
//! 1. Private key slots are zeroized on drop ([`key_material`]).
//! 2. The AEAD nonce is fixed; this is sound only because the key is
//!    derived fresh per message — never reuse a derived key across calls.
//! 3. Randomness is always caller-supplied (`RngCore + CryptoRng`), never
//!    drawn implicitly from a global source, so callers control
//!    determinism for testing.

pub mod hybrid;
pub mod key_material;
pub mod signing;

pub use hybrid::{open, seal, Sealed, HKDF_INFO, NONCE_SIZE, UNIVERSAL_NONCE};
pub use key_material::{KeyMaterial, SLOT_SIZE};
pub use signing::{sign, sign_strict, verify, SIGNATURE_SIZE};
