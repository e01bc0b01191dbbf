//! # Nickname derivation
//!
//! Maps a public signing key to a short, human-memorable "<adjective>-
//! <noun>" label.
//!
//! ## Derivation
//!
//! ```text
//! public signing key (32 bytes)
//!          │
//!          ├── first 8 bytes, big-endian u64 ──► seed
//!          │
//!          ├── seed == 0 ──► "zero-entity"
//!          │
//!          └── otherwise ──► splitmix64(seed) picks one adjective and
//!                             one noun from fixed word lists
//! ```
//!
//! Collisions are possible and expected; this is a display affordance, not
//! an identifier. What matters is determinism: the same key always
//! produces the same nickname.

mod words;

/// The nickname assigned to the all-zero public signing key.
pub const ZERO_NICKNAME: &str = "zero-entity";

/// splitmix64, used only to turn one 64-bit seed into two independent
/// word-list indices. Not a cryptographic primitive; nicknames carry no
/// security property.
fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive the nickname for a 32-byte Ed25519 public signing key.
pub fn from_public_signing_key(pub_sig: &[u8; 32]) -> String {
    let seed = u64::from_be_bytes(pub_sig[..8].try_into().expect("8 bytes"));
    if seed == 0 {
        return ZERO_NICKNAME.to_string();
    }

    let a = splitmix64(seed);
    let b = splitmix64(a);

    let adjective = words::ADJECTIVES[(a as usize) % words::ADJECTIVES.len()];
    let noun = words::NOUNS[(b as usize) % words::NOUNS.len()];
    format!("{adjective}-{noun}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_key_is_zero_entity() {
        assert_eq!(from_public_signing_key(&[0u8; 32]), ZERO_NICKNAME);
    }

    #[test]
    fn same_key_produces_same_nickname() {
        let key = [7u8; 32];
        assert_eq!(from_public_signing_key(&key), from_public_signing_key(&key));
    }

    #[test]
    fn different_keys_usually_produce_different_nicknames() {
        let a = from_public_signing_key(&[1u8; 32]);
        let b = from_public_signing_key(&[2u8; 32]);
        assert_ne!(a, b);
    }

    #[test]
    fn nickname_has_adjective_noun_shape() {
        let nick = from_public_signing_key(&[42u8; 32]);
        assert_eq!(nick.split('-').count(), 2);
    }
}
