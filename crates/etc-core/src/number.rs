//! Number parsing for chain-spec documents.
//!
//! Chain specs write heights, delays, and wei amounts as JSON integers,
//! decimal strings, or `0x`-prefixed hex strings, and a single document
//! frequently mixes all three. The newtypes here accept any of those forms;
//! the `*_from` functions plug them into `#[serde(deserialize_with = ...)]`.

use std::fmt;

use ethereum_types::U256;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::error::NumberError;

/// Map key under which `serde_json` (built with `arbitrary_precision`) hands
/// over a number too wide for the native integer visits, as its decimal text.
pub(crate) const JSON_NUMBER_TOKEN: &str = "$serde_json::private::Number";

fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
}

/// Parse a block height or other unsigned quantity.
///
/// ```
/// use etc_core::number::parse_u64;
/// assert_eq!(parse_u64("0x42ae50").unwrap(), 4_370_000);
/// assert_eq!(parse_u64("1150000").unwrap(), 1_150_000);
/// ```
pub fn parse_u64(s: &str) -> Result<u64, NumberError> {
    let t = s.trim();
    if let Some(hex) = strip_hex_prefix(t) {
        if hex.is_empty() {
            return Err(NumberError::Empty);
        }
        return u64::from_str_radix(hex, 16).map_err(|_| NumberError::InvalidHex(s.to_string()));
    }
    if t.is_empty() {
        return Err(NumberError::Empty);
    }
    t.parse::<u64>()
        .map_err(|_| NumberError::InvalidDecimal(s.to_string()))
}

/// Parse a signed quantity. Only the decimal form may carry a sign.
pub fn parse_i64(s: &str) -> Result<i64, NumberError> {
    let t = s.trim();
    if strip_hex_prefix(t).is_some() {
        let v = parse_u64(t)?;
        return i64::try_from(v).map_err(|_| NumberError::OutOfRange(s.to_string()));
    }
    if t.is_empty() {
        return Err(NumberError::Empty);
    }
    t.parse::<i64>()
        .map_err(|_| NumberError::InvalidDecimal(s.to_string()))
}

/// Parse a 256-bit unsigned quantity (wei amounts, difficulties).
pub fn parse_u256(s: &str) -> Result<U256, NumberError> {
    let t = s.trim();
    if let Some(hex) = strip_hex_prefix(t) {
        if hex.is_empty() {
            return Err(NumberError::Empty);
        }
        return U256::from_str_radix(hex, 16).map_err(|_| NumberError::InvalidHex(s.to_string()));
    }
    if t.is_empty() {
        return Err(NumberError::Empty);
    }
    U256::from_dec_str(t).map_err(|_| NumberError::InvalidDecimal(s.to_string()))
}

/// A `u64` written in any chain-spec number form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecU64(pub u64);

/// An `i64` written in any chain-spec number form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecI64(pub i64);

/// A `U256` written in any chain-spec number form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecU256(pub U256);

struct U64Visitor;

impl Visitor<'_> for U64Visitor {
    type Value = SpecU64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned integer or a decimal/hex string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(SpecU64(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(SpecU64)
            .map_err(|_| E::custom(NumberError::OutOfRange(v.to_string())))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_u64(v).map(SpecU64).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for SpecU64 {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(U64Visitor)
    }
}

struct I64Visitor;

impl Visitor<'_> for I64Visitor {
    type Value = SpecI64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a decimal/hex string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(SpecI64)
            .map_err(|_| E::custom(NumberError::OutOfRange(v.to_string())))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(SpecI64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_i64(v).map(SpecI64).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for SpecI64 {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(I64Visitor)
    }
}

struct U256Visitor;

impl<'de> Visitor<'de> for U256Visitor {
    type Value = SpecU256;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned integer or a decimal/hex string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(SpecU256(U256::from(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(|v| SpecU256(U256::from(v)))
            .map_err(|_| E::custom(NumberError::OutOfRange(v.to_string())))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(SpecU256(U256::from(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_u256(v).map(SpecU256).map_err(E::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        match map.next_key::<String>()? {
            Some(key) if key == JSON_NUMBER_TOKEN => {
                let text: String = map.next_value()?;
                parse_u256(&text).map(SpecU256).map_err(de::Error::custom)
            }
            _ => Err(de::Error::invalid_type(de::Unexpected::Map, &self)),
        }
    }
}

impl<'de> Deserialize<'de> for SpecU256 {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(U256Visitor)
    }
}

pub fn u64_from<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    SpecU64::deserialize(d).map(|v| v.0)
}

pub fn opt_u64_from<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    Option::<SpecU64>::deserialize(d).map(|v| v.map(|v| v.0))
}

pub fn u256_from<'de, D: Deserializer<'de>>(d: D) -> Result<U256, D::Error> {
    SpecU256::deserialize(d).map(|v| v.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------
    // parse_u64
    // ------------------------------------------------------------------

    #[test]
    fn parses_hex_and_decimal() {
        assert_eq!(parse_u64("0x0"), Ok(0));
        assert_eq!(parse_u64("0X1D4C00"), Ok(1_920_000));
        assert_eq!(parse_u64("3000000"), Ok(3_000_000));
        assert_eq!(parse_u64(" 42 "), Ok(42));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_u64(""), Err(NumberError::Empty));
        assert_eq!(parse_u64("0x"), Err(NumberError::Empty));
        assert!(matches!(parse_u64("0xzz"), Err(NumberError::InvalidHex(_))));
        assert!(matches!(parse_u64("-5"), Err(NumberError::InvalidDecimal(_))));
        assert!(matches!(parse_u64("12a"), Err(NumberError::InvalidDecimal(_))));
    }

    #[test]
    fn u64_hex_overflow_is_rejected() {
        assert!(parse_u64("0x10000000000000000").is_err());
    }

    // ------------------------------------------------------------------
    // parse_i64
    // ------------------------------------------------------------------

    #[test]
    fn signed_accepts_negative_decimal() {
        assert_eq!(parse_i64("-2000000"), Ok(-2_000_000));
        assert_eq!(parse_i64("0x2dc6c0"), Ok(3_000_000));
    }

    #[test]
    fn signed_hex_above_i64_max_is_out_of_range() {
        assert!(matches!(
            parse_i64("0xffffffffffffffff"),
            Err(NumberError::OutOfRange(_))
        ));
    }

    // ------------------------------------------------------------------
    // parse_u256
    // ------------------------------------------------------------------

    #[test]
    fn u256_parses_five_ether() {
        let five_ether = U256::from(5_000_000_000_000_000_000u64);
        assert_eq!(parse_u256("0x4563918244f40000"), Ok(five_ether));
        assert_eq!(parse_u256("5000000000000000000"), Ok(five_ether));
    }

    #[test]
    fn u256_accepts_values_wider_than_u64() {
        let v = parse_u256("0x10000000000000000").unwrap();
        assert_eq!(v, U256::from(u64::MAX) + U256::one());
    }

    // ------------------------------------------------------------------
    // serde newtypes
    // ------------------------------------------------------------------

    #[test]
    fn spec_u64_from_json_forms() {
        let a: SpecU64 = serde_json::from_str("17").unwrap();
        let b: SpecU64 = serde_json::from_str("\"0x11\"").unwrap();
        let c: SpecU64 = serde_json::from_str("\"17\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn spec_u64_rejects_negative_and_float() {
        assert!(serde_json::from_str::<SpecU64>("-1").is_err());
        assert!(serde_json::from_str::<SpecU64>("1.5").is_err());
    }

    #[test]
    fn spec_i64_from_json_forms() {
        let a: SpecI64 = serde_json::from_str("-7").unwrap();
        let b: SpecI64 = serde_json::from_str("\"0x7\"").unwrap();
        assert_eq!(a.0, -7);
        assert_eq!(b.0, 7);
    }

    #[test]
    fn spec_u256_from_number() {
        let v: SpecU256 = serde_json::from_str("131072").unwrap();
        assert_eq!(v.0, U256::from(131_072u64));
    }

    #[test]
    fn spec_u256_from_number_wider_than_u64() {
        let hundred_ether = U256::from_dec_str("100000000000000000000").unwrap();
        let v: SpecU256 = serde_json::from_str("100000000000000000000").unwrap();
        assert_eq!(v.0, hundred_ether);

        let via_value: SpecU256 =
            serde_json::from_value(serde_json::from_str("100000000000000000000").unwrap()).unwrap();
        assert_eq!(via_value.0, hundred_ether);
    }

    #[test]
    fn spec_u256_from_number_wider_than_u128() {
        let text = "340282366920938463463374607431768211456";
        let v: SpecU256 = serde_json::from_str(text).unwrap();
        assert_eq!(v.0, U256::from(u128::MAX) + U256::one());

        let via_value: SpecU256 =
            serde_json::from_value(serde_json::from_str(text).unwrap()).unwrap();
        assert_eq!(via_value.0, v.0);
    }

    #[test]
    fn spec_u256_rejects_wide_negative_and_fraction() {
        assert!(serde_json::from_str::<SpecU256>("-100000000000000000000").is_err());
        assert!(serde_json::from_str::<SpecU256>("1.5").is_err());
        assert!(serde_json::from_str::<SpecU256>("{}").is_err());
    }

    #[test]
    fn reward_map_with_wide_json_number() {
        let s: crate::schedules::BlockRewardSchedule =
            serde_json::from_str(r#"{"0": 100000000000000000000}"#).unwrap();
        assert_eq!(
            s.reward_at(0),
            Some(U256::from_dec_str("100000000000000000000").unwrap())
        );
    }
}
