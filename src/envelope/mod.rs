//! # Envelope
//!
//! Wire representations of a message: [`plain::PlainText`] before sealing
//! and [`cipher::CipherText`] after. Two codecs are provided for each,
//! chosen independently of the crypto layer: [`pem`] (ASCII-armored text)
//! and [`binary`] (self-describing CBOR).

pub mod binary;
pub mod cipher;
pub mod pem;
pub mod plain;
mod sig_serde;

pub use cipher::CipherText;
pub use plain::PlainText;
