//! `serde(with = ...)` helper for `Option<[u8; 64]>` signature fields.
//!
//! `serde` only derives `Serialize`/`Deserialize` for arrays up to length 32,
//! and `serde_big_array::BigArray` only covers the bare array (not an
//! `Option` around it), so the `Option<[u8; 64]>` signature fields need this
//! thin wrapper to round-trip through the same big-array encoding.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_big_array::BigArray;

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct Wrapper(#[serde(with = "BigArray")] [u8; 64]);

pub fn serialize<S>(value: &Option<[u8; 64]>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.map(Wrapper).serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<[u8; 64]>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
}
