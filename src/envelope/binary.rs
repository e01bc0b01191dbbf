//! # Binary envelope codec
//!
//! A self-describing binary encoding of [`PlainText`]/[`CipherText`] built
//! on CBOR. Unlike a fixed-layout format, CBOR's tagged items mean a
//! decoder doesn't need to be told the schema in advance — exactly what
//! "self-describing" requires of the wire format.
//!
//! Field names on the wire are pinned independently of the Rust struct
//! field names so that any implementation producing or consuming this
//! format agrees on them: `type`, `headers`, `plaintext` (for
//! [`PlainText`]) or `ciphertext` (for [`CipherText`]), `signature`,
//! `nonce`, `ephpub`, `aad`.

use crate::envelope::cipher::CipherText;
use crate::envelope::plain::PlainText;
use crate::error::Result;

/// Encode a `PlainText` as CBOR.
pub fn encode_plain(pt: &PlainText) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ciborium::into_writer(pt, &mut out)?;
    Ok(out)
}

/// Decode a `PlainText` from CBOR.
pub fn decode_plain(bytes: &[u8]) -> Result<PlainText> {
    Ok(ciborium::from_reader(bytes)?)
}

/// Encode a `CipherText` as CBOR.
pub fn encode_cipher(ct: &CipherText) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ciborium::into_writer(ct, &mut out)?;
    Ok(out)
}

/// Decode a `CipherText` from CBOR.
pub fn decode_cipher(bytes: &[u8]) -> Result<CipherText> {
    Ok(ciborium::from_reader(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn plain_round_trips_through_cbor() {
        let pt = PlainText::new("ORACLE MESSAGE", b"hello".to_vec()).with_header("subject", "s");
        let bytes = encode_plain(&pt).unwrap();
        let decoded = decode_plain(&bytes).unwrap();
        assert_eq!(pt, decoded);
    }

    #[test]
    fn cipher_round_trips_through_cbor() {
        let ct = CipherText {
            kind: "ORACLE MESSAGE".into(),
            headers: BTreeMap::from([("subject".to_string(), "s".to_string())]),
            body: vec![1, 2, 3],
            sig: Some([1u8; 64]),
            nonce: [0u8; 12],
            ephemeral_pub: [2u8; 32],
            aad: Some(vec![9, 9]),
        };
        let bytes = encode_cipher(&ct).unwrap();
        let decoded = decode_cipher(&bytes).unwrap();
        assert_eq!(ct, decoded);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_plain(&[0xff, 0x00, 0x01]).is_err());
    }

    #[test]
    fn plain_uses_the_pinned_wire_field_names() {
        let pt = PlainText::new("ORACLE MESSAGE", b"hello".to_vec());
        let bytes = encode_plain(&pt).unwrap();
        let value: ciborium::value::Value = ciborium::from_reader(bytes.as_slice()).unwrap();
        let keys: Vec<String> = value
            .as_map()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_text().unwrap().to_string())
            .collect();
        for expected in ["type", "headers", "plaintext", "signature", "nonce", "ephpub", "aad"] {
            assert!(keys.iter().any(|k| k == expected), "missing field '{expected}'");
        }
    }

    #[test]
    fn cipher_uses_the_pinned_wire_field_names() {
        let ct = CipherText {
            kind: "ORACLE MESSAGE".into(),
            headers: BTreeMap::new(),
            body: vec![1, 2, 3],
            sig: None,
            nonce: [0u8; 12],
            ephemeral_pub: [2u8; 32],
            aad: None,
        };
        let bytes = encode_cipher(&ct).unwrap();
        let value: ciborium::value::Value = ciborium::from_reader(bytes.as_slice()).unwrap();
        let keys: Vec<String> = value
            .as_map()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_text().unwrap().to_string())
            .collect();
        for expected in ["type", "headers", "ciphertext", "signature", "nonce", "ephpub", "aad"] {
            assert!(keys.iter().any(|k| k == expected), "missing field '{expected}'");
        }
    }
}
