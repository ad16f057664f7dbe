//! Recursive conversion between JSON values and attribute values.
//!
//! Encoding is total. Decoding fails only on number text that does not parse
//! as a finite double.

use super::value::{AttrValue, Item};
use crate::error::{Result, TrackerError};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::fmt;

/// Convert a JSON value into an attribute value.
pub fn encode_value(value: &Value) -> AttrValue {
    match value {
        Value::Null => AttrValue::Null,
        Value::String(s) => AttrValue::S(s.clone()),
        Value::Number(n) => AttrValue::N(n.to_string()),
        Value::Bool(b) => AttrValue::Bool(*b),
        Value::Object(map) => AttrValue::M(encode_mapping(map)),
        Value::Array(items) => AttrValue::L(items.iter().map(encode_value).collect()),
    }
}

/// Encode any serializable domain object.
///
/// Objects that have no JSON form (e.g. maps with composite keys) are stored
/// as their display text.
pub fn encode_serializable<T>(value: &T) -> AttrValue
where
    T: Serialize + fmt::Display + ?Sized,
{
    match serde_json::to_value(value) {
        Ok(json) => encode_value(&json),
        Err(_) => AttrValue::S(value.to_string()),
    }
}

/// Encode every entry of a JSON object, keeping keys.
pub fn encode_mapping(map: &Map<String, Value>) -> Item {
    map.iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

/// Convert an attribute value back into JSON.
pub fn decode_value(attr: &AttrValue) -> Result<Value> {
    let value = match attr {
        AttrValue::S(s) => Value::String(s.clone()),
        AttrValue::N(text) => Value::Number(parse_number(text)?),
        AttrValue::Bool(b) => Value::Bool(*b),
        AttrValue::M(item) => Value::Object(decode_mapping(item)?),
        AttrValue::L(items) => Value::Array(
            items
                .iter()
                .map(decode_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        AttrValue::Null => Value::Null,
    };
    Ok(value)
}

/// Decode every entry of an item, keeping keys.
pub fn decode_mapping(item: &Item) -> Result<Map<String, Value>> {
    item.iter()
        .map(|(key, attr)| Ok((key.clone(), decode_value(attr)?)))
        .collect()
}

fn parse_number(text: &str) -> Result<Number> {
    text.trim()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| TrackerError::Format(text.to_string()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // Leaves decode to the same variant they were encoded from. Numbers are
    // generated as doubles since integers come back as floats.
    fn arb_leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            ".*".prop_map(Value::String),
            any::<f64>()
                .prop_filter_map("finite", Number::from_f64)
                .prop_map(Value::Number),
        ]
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        arb_leaf().prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
                prop::collection::btree_map("[a-zA-Z0-9#_]{0,12}", inner, 0..8)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn string_round_trips(s in ".*") {
            let value = Value::String(s);
            prop_assert_eq!(decode_value(&encode_value(&value)).unwrap(), value);
        }

        #[test]
        fn bool_round_trips(b in any::<bool>()) {
            let value = Value::Bool(b);
            prop_assert_eq!(decode_value(&encode_value(&value)).unwrap(), value);
        }

        #[test]
        fn double_round_trips(n in any::<f64>().prop_filter("finite", |n| n.is_finite())) {
            let decoded = decode_value(&encode_value(&serde_json::json!(n))).unwrap();
            prop_assert_eq!(decoded.as_f64(), Some(n));
        }

        #[test]
        fn integer_round_trips_as_double(n in -(1i64 << 53)..(1i64 << 53)) {
            let decoded = decode_value(&encode_value(&serde_json::json!(n))).unwrap();
            prop_assert_eq!(decoded.as_f64(), Some(n as f64));
        }

        #[test]
        fn tree_round_trips(value in arb_json()) {
            prop_assert_eq!(decode_value(&encode_value(&value)).unwrap(), value);
        }

        #[test]
        fn wire_form_round_trips(value in arb_json()) {
            let attr = encode_value(&value);
            let wire = serde_json::to_string(&attr).unwrap();
            let back: AttrValue = serde_json::from_str(&wire).unwrap();
            prop_assert_eq!(back, attr);
        }
    }

    #[test]
    fn null_round_trips() {
        assert_eq!(decode_value(&encode_value(&Value::Null)).unwrap(), Value::Null);
    }
}
