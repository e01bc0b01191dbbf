//! # oracle-core
//!
//! A personal cryptographic identity and messaging library: dual-key
//! principals, hybrid encryption, signing, and trust-on-first-verify
//! assertions.
//!
//! ## Module Map
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ORACLE CORE MODULES                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌──────────────┐   │
//! │  │  Principal  │  │    Peer     │  │  Nickname   │  │   Envelope   │   │
//! │  │             │  │             │  │             │  │              │   │
//! │  │ - Key       │  │ - Public    │  │ - Derived   │  │ - PlainText  │   │
//! │  │   material  │  │   identity  │  │   label     │  │ - CipherText │   │
//! │  │ - Peer map  │  │             │  │             │  │ - PEM/binary │   │
//! │  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘  └──────┬───────┘   │
//! │         │                │                │                │           │
//! │         └────────────────┴────────────────┴────────────────┘           │
//! │                                   │                                     │
//! │                          ┌─────────────────┐                           │
//! │                          │     Crypto      │                           │
//! │                          │                 │                           │
//! │                          │ - X25519 ECDH   │                           │
//! │                          │ - ChaCha20Poly1305│                         │
//! │                          │ - Ed25519 sign  │                           │
//! │                          └─────────────────┘                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Model
//!
//! | Layer | Mechanism |
//! |-------|-----------|
//! | Confidentiality | ephemeral-static X25519 ECDH, HKDF-SHA-256, ChaCha20-Poly1305 |
//! | Authenticity | Ed25519 over `SHA-256(ephemeral-pub \|\| body \|\| nonce)` |
//! | Trust bootstrap | signed assertion + trust-on-first-verify |
//! | Key hygiene | private key material zeroized on drop |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod crypto;
pub mod envelope;
pub mod error;
pub mod nickname;
pub mod peer;
pub mod principal;

pub use envelope::{CipherText, PlainText};
pub use error::{Error, Result};
pub use peer::Peer;
pub use principal::Principal;

/// Returns the version of oracle-core.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
