//! # PEM envelope codec
//!
//! ASCII-armored, RFC 1421-style encoding shared by [`PlainText`] and
//! [`CipherText`]. A block looks like:
//!
//! ```text
//! -----BEGIN ORACLE MESSAGE-----
//! subject: A Tale of Two Cities
//! eph: 9f1c...            (hex, only present when an ephemeral key exists)
//! sig: 7ab3...             (hex, only present when signed)
//! nonce: 000000000000000000000000  (hex, only present when sealed)
//! aad: 61616161             (hex, only present when aad was bound)
//!
//! <base64-encoded body, 64 columns>
//! -----END ORACLE MESSAGE-----
//! ```
//!
//! `eph`/`sig`/`nonce`/`aad` are synthetic headers added on encode and
//! stripped back out (into the structured fields) on decode; they never
//! appear in `PlainText::headers`/`CipherText::headers` themselves.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::BTreeMap;

use crate::envelope::cipher::CipherText;
use crate::envelope::plain::PlainText;
use crate::error::{Error, Result};

const LINE_WIDTH: usize = 64;

struct RawBlock {
    kind: String,
    headers: BTreeMap<String, String>,
    body: Vec<u8>,
}

fn encode_block(kind: &str, headers: &BTreeMap<String, String>, body: &[u8]) -> String {
    let mut out = String::new();
    out.push_str("-----BEGIN ");
    out.push_str(kind);
    out.push_str("-----\n");
    for (k, v) in headers {
        out.push_str(k);
        out.push_str(": ");
        out.push_str(v);
        out.push('\n');
    }
    out.push('\n');
    let encoded = STANDARD.encode(body);
    for chunk in encoded.as_bytes().chunks(LINE_WIDTH) {
        out.push_str(std::str::from_utf8(chunk).expect("base64 output is ASCII"));
        out.push('\n');
    }
    out.push_str("-----END ");
    out.push_str(kind);
    out.push_str("-----\n");
    out
}

fn decode_block(data: &str) -> Result<RawBlock> {
    let data = data.trim_start();
    let begin_prefix = "-----BEGIN ";
    let begin_line = data
        .lines()
        .next()
        .ok_or_else(|| Error::InvalidEnvelope("empty PEM input".into()))?;
    if !begin_line.starts_with(begin_prefix) || !begin_line.ends_with("-----") {
        return Err(Error::InvalidEnvelope("missing PEM BEGIN line".into()));
    }
    let kind = begin_line[begin_prefix.len()..begin_line.len() - "-----".len()].to_string();
    let end_marker = format!("-----END {kind}-----");

    let mut headers = BTreeMap::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_body = false;
    let mut saw_end = false;

    for line in data.lines().skip(1) {
        if line == end_marker {
            saw_end = true;
            break;
        }
        if in_body {
            body_lines.push(line);
            continue;
        }
        if line.is_empty() {
            in_body = true;
            continue;
        }
        match line.split_once(": ") {
            Some((k, v)) => {
                headers.insert(k.to_string(), v.to_string());
            }
            None => return Err(Error::InvalidEnvelope(format!("malformed header line: {line}"))),
        }
    }

    if !saw_end {
        return Err(Error::InvalidEnvelope("missing PEM END line".into()));
    }

    let body = STANDARD
        .decode(body_lines.concat())
        .map_err(|e| Error::InvalidEnvelope(format!("invalid base64 body: {e}")))?;

    Ok(RawBlock { kind, headers, body })
}

fn hex_header(headers: &mut BTreeMap<String, String>, key: &str, bytes: &[u8]) {
    headers.insert(key.to_string(), hex::encode(bytes));
}

fn take_hex_header(headers: &mut BTreeMap<String, String>, key: &str) -> Result<Option<Vec<u8>>> {
    match headers.remove(key) {
        Some(v) => Ok(Some(hex::decode(&v).map_err(|e| {
            Error::InvalidEnvelope(format!("invalid hex in '{key}' header: {e}"))
        })?)),
        None => Ok(None),
    }
}

/// Encode a `PlainText` as a PEM block. Synthetic headers are only added
/// for fields that are actually present.
pub fn encode_plain(pt: &PlainText) -> String {
    let mut headers = pt.headers.clone();
    if let Some(eph) = pt.ephemeral_pub {
        hex_header(&mut headers, "eph", &eph);
    }
    if let Some(sig) = pt.sig {
        hex_header(&mut headers, "sig", &sig);
    }
    if let Some(nonce) = pt.nonce {
        hex_header(&mut headers, "nonce", &nonce);
    }
    if let Some(aad) = &pt.aad {
        hex_header(&mut headers, "aad", aad);
    }
    encode_block(&pt.kind, &headers, &pt.body)
}

/// Decode a `PlainText` from a PEM block, lifting the synthetic headers
/// back into structured fields.
pub fn decode_plain(data: &str) -> Result<PlainText> {
    let mut block = decode_block(data)?;

    let ephemeral_pub = take_hex_header(&mut block.headers, "eph")?
        .map(|b| to_array::<32>(&b, "eph"))
        .transpose()?;
    let sig = take_hex_header(&mut block.headers, "sig")?
        .map(|b| to_array::<64>(&b, "sig"))
        .transpose()?;
    let nonce = take_hex_header(&mut block.headers, "nonce")?
        .map(|b| to_array::<12>(&b, "nonce"))
        .transpose()?;
    let aad = take_hex_header(&mut block.headers, "aad")?;

    Ok(PlainText {
        kind: block.kind,
        headers: block.headers,
        body: block.body,
        sig,
        nonce,
        ephemeral_pub,
        aad,
    })
}

/// Encode a `CipherText` as a PEM block.
pub fn encode_cipher(ct: &CipherText) -> String {
    let mut headers = ct.headers.clone();
    hex_header(&mut headers, "eph", &ct.ephemeral_pub);
    if let Some(sig) = ct.sig {
        hex_header(&mut headers, "sig", &sig);
    }
    hex_header(&mut headers, "nonce", &ct.nonce);
    if let Some(aad) = &ct.aad {
        hex_header(&mut headers, "aad", aad);
    }
    encode_block(&ct.kind, &headers, &ct.body)
}

/// Decode a `CipherText` from a PEM block.
pub fn decode_cipher(data: &str) -> Result<CipherText> {
    let mut block = decode_block(data)?;

    let ephemeral_pub = take_hex_header(&mut block.headers, "eph")?
        .ok_or_else(|| Error::InvalidEnvelope("ciphertext PEM missing 'eph' header".into()))
        .and_then(|b| to_array::<32>(&b, "eph"))?;
    let sig = take_hex_header(&mut block.headers, "sig")?
        .map(|b| to_array::<64>(&b, "sig"))
        .transpose()?;
    let nonce = take_hex_header(&mut block.headers, "nonce")?
        .ok_or_else(|| Error::InvalidEnvelope("ciphertext PEM missing 'nonce' header".into()))
        .and_then(|b| to_array::<12>(&b, "nonce"))?;
    let aad = take_hex_header(&mut block.headers, "aad")?;

    Ok(CipherText {
        kind: block.kind,
        headers: block.headers,
        body: block.body,
        sig,
        nonce,
        ephemeral_pub,
        aad,
    })
}

fn to_array<const N: usize>(bytes: &[u8], field: &str) -> Result<[u8; N]> {
    bytes
        .try_into()
        .map_err(|_| Error::InvalidEnvelope(format!("'{field}' must be {N} bytes, got {}", bytes.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_round_trips_through_pem() {
        let pt = PlainText::new("ORACLE MESSAGE", b"hello".to_vec())
            .with_header("subject", "s")
            .with_header("from", "alice");
        let encoded = encode_plain(&pt);
        let decoded = decode_plain(&encoded).unwrap();
        assert_eq!(pt, decoded);
    }

    #[test]
    fn signed_plain_round_trips_and_strips_synthetic_headers() {
        let mut pt = PlainText::new("ORACLE MESSAGE", b"hello".to_vec());
        pt.sig = Some([7u8; 64]);
        pt.nonce = Some([9u8; 12]);
        pt.ephemeral_pub = Some([3u8; 32]);
        pt.aad = Some(vec![1, 2, 3]);

        let encoded = encode_plain(&pt);
        assert!(encoded.contains("aad: 010203"));
        let decoded = decode_plain(&encoded).unwrap();
        assert_eq!(pt, decoded);
        assert!(!decoded.headers.contains_key("eph"));
        assert!(!decoded.headers.contains_key("sig"));
        assert!(!decoded.headers.contains_key("nonce"));
        assert!(!decoded.headers.contains_key("aad"));
    }

    #[test]
    fn cipher_round_trips_through_pem() {
        let ct = CipherText {
            kind: "ORACLE MESSAGE".into(),
            headers: BTreeMap::from([("subject".to_string(), "s".to_string())]),
            body: vec![1, 2, 3, 4, 5],
            sig: Some([5u8; 64]),
            nonce: [0u8; 12],
            ephemeral_pub: [8u8; 32],
            aad: None,
        };
        let encoded = encode_cipher(&ct);
        let decoded = decode_cipher(&encoded).unwrap();
        assert_eq!(ct, decoded);
    }

    #[test]
    fn cipher_missing_eph_header_is_rejected() {
        let raw = "-----BEGIN X-----\nnonce: 000000000000000000000000\n\naGVsbG8=\n-----END X-----\n";
        assert!(decode_cipher(raw).is_err());
    }

    #[test]
    fn garbage_input_is_rejected() {
        assert!(decode_plain("not a pem block at all").is_err());
    }
}
