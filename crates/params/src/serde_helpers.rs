//! Serde helper modules for human-readable token amounts.
use serde::{Deserialize, Deserializer, Serializer, de::Error};
use votecoin_identifiers::TokenAmount;

/// Serialize/deserialize [`TokenAmount`] as a decimal string of whole tokens,
/// e.g. `"100000000000.0"`.
pub mod serde_units {
    use super::*;

    pub fn serialize<S: Serializer>(v: &TokenAmount, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&v.format_units())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<TokenAmount, D::Error> {
        let s = String::deserialize(d)?;
        TokenAmount::parse_units(&s).map_err(D::Error::custom)
    }
}
