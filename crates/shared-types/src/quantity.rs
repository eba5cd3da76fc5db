//! # Quantity Encoding
//!
//! Serde adapter for `U256` quantities: written as a decimal string, read from
//! a decimal string, a `0x` hex string or a plain JSON integer.
//!
//! ```ignore
//! #[serde(with = "shared_types::quantity")]
//! pub total_supply: U256,
//! ```

use crate::entities::U256;
use serde::{de, Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Text(String),
    Number(u64),
}

pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(U256::from(n)),
        Raw::Text(text) => parse(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid quantity {:?}", text))),
    }
}

/// Parses a decimal or `0x` hex quantity.
pub fn parse(text: &str) -> Option<U256> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => U256::from_str_radix(digits, 16).ok(),
        None => U256::from_dec_str(text).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holding {
        #[serde(with = "crate::quantity")]
        amount: U256,
    }

    #[test]
    fn test_written_as_decimal() {
        let json = serde_json::to_string(&Holding { amount: U256::from(1000u64) }).unwrap();
        assert_eq!(json, r#"{"amount":"1000"}"#);
    }

    #[test]
    fn test_read_from_every_form() {
        for input in [r#""1000""#, r#""0x3e8""#, "1000", r#"" 1000 ""#] {
            let json = format!(r#"{{"amount":{}}}"#, input);
            let holding: Holding = serde_json::from_str(&json).unwrap();
            assert_eq!(holding.amount, U256::from(1000u64), "input {}", input);
        }
    }

    #[test]
    fn test_beyond_u64_survives() {
        let holding = Holding { amount: U256::MAX };
        let json = serde_json::to_string(&holding).unwrap();
        assert_eq!(serde_json::from_str::<Holding>(&json).unwrap(), holding);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Holding>(r#"{"amount":"-5"}"#).is_err());
        assert!(serde_json::from_str::<Holding>(r#"{"amount":"0xzz"}"#).is_err());
        assert_eq!(parse("12kg"), None);
    }
}
