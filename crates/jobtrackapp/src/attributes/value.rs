//! Attribute value type and its wire representation.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A stored record: attribute name to attribute value.
pub type Item = BTreeMap<String, AttrValue>;

/// Tagged attribute value as held by the key-value store.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Null,
    S(String),
    /// Decimal text, never a binary float.
    N(String),
    Bool(bool),
    M(Item),
    L(Vec<AttrValue>),
}

impl AttrValue {
    /// Wire tag for this variant.
    pub fn type_tag(&self) -> &'static str {
        match self {
            AttrValue::Null => "NULL",
            AttrValue::S(_) => "S",
            AttrValue::N(_) => "N",
            AttrValue::Bool(_) => "BOOL",
            AttrValue::M(_) => "M",
            AttrValue::L(_) => "L",
        }
    }

    /// Get the text if this is a string attribute.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::S(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::S(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::S(s)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            AttrValue::Null => map.serialize_entry("NULL", &true)?,
            AttrValue::S(s) => map.serialize_entry("S", s)?,
            AttrValue::N(n) => map.serialize_entry("N", n)?,
            AttrValue::Bool(b) => map.serialize_entry("BOOL", b)?,
            AttrValue::M(m) => map.serialize_entry("M", m)?,
            AttrValue::L(l) => map.serialize_entry("L", l)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawAttr::deserialize(deserializer)?;
        raw.resolve().map_err(de::Error::custom)
    }
}

/// Wire record before resolution. Several fields may be populated at once;
/// [`RawAttr::resolve`] picks one by presence.
#[derive(Serialize, Deserialize)]
struct RawAttr {
    #[serde(rename = "S", default, skip_serializing_if = "Option::is_none")]
    s: Option<String>,
    #[serde(rename = "N", default, skip_serializing_if = "Option::is_none")]
    n: Option<String>,
    #[serde(rename = "BOOL", default, skip_serializing_if = "Option::is_none")]
    bool: Option<bool>,
    #[serde(rename = "M", default, skip_serializing_if = "Option::is_none")]
    m: Option<Item>,
    #[serde(rename = "L", default, skip_serializing_if = "Option::is_none")]
    l: Option<Vec<AttrValue>>,
    #[serde(rename = "NULL", default, skip_serializing_if = "Option::is_none")]
    null: Option<bool>,
    #[serde(flatten)]
    other: serde_json::Map<String, serde_json::Value>,
}

impl RawAttr {
    // Order matches encode priority: S, N, BOOL, M, L, NULL.
    fn resolve(self) -> serde_json::Result<AttrValue> {
        match self {
            RawAttr { s: Some(s), .. } => Ok(AttrValue::S(s)),
            RawAttr { n: Some(n), .. } => Ok(AttrValue::N(n)),
            RawAttr { bool: Some(b), .. } => Ok(AttrValue::Bool(b)),
            RawAttr { m: Some(m), .. } => Ok(AttrValue::M(m)),
            RawAttr { l: Some(l), .. } => Ok(AttrValue::L(l)),
            RawAttr {
                null: Some(true), ..
            } => Ok(AttrValue::Null),
            raw => serde_json::to_string(&raw).map(AttrValue::S),
        }
    }
}
