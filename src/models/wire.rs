//! Lenient decoders for the shapes the backend actually sends.
//!
//! Model serializers emit decimals as strings (`"1500.00"`) while aggregate endpoints emit
//! plain numbers, and primary keys arrive as integers. These helpers accept both.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

fn parse_amount<E: de::Error>(raw: NumberOrString) -> Result<f64, E> {
    match raw {
        NumberOrString::Number(n) => n
            .as_f64()
            .ok_or_else(|| E::custom(format!("amount out of range: {}", n))),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| E::custom(format!("invalid amount: {:?}", s))),
    }
}

/// Decodes an amount given either as a JSON number or a decimal string.
pub fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    parse_amount(NumberOrString::deserialize(deserializer)?)
}

/// Like [`amount`], for optional fields. `null` decodes to `None`.
pub fn optional_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(raw) => parse_amount(raw).map(Some),
        None => Ok(None),
    }
}

/// Decodes an identifier given either as an integer or a string.
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n.to_string()),
        NumberOrString::Text(s) => Ok(s),
    }
}
