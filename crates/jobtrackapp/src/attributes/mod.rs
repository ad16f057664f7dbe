//! # Attribute Values
//!
//! The store keeps every item as a mapping of attribute names to tagged
//! attribute values, the same union-typed encoding schemaless key-value stores
//! such as DynamoDB use on the wire. Handlers work with plain JSON. This module
//! holds both the attribute type and the codec between the two domains.
//!
//! ## Encoding Table
//!
//! | JSON | Attribute | Wire |
//! |------|-----------|------|
//! | `null` | [`AttrValue::Null`] | `{"NULL": true}` |
//! | string | [`AttrValue::S`] | `{"S": "text"}` |
//! | number | [`AttrValue::N`] | `{"N": "12.5"}` |
//! | boolean | [`AttrValue::Bool`] | `{"BOOL": true}` |
//! | object | [`AttrValue::M`] | `{"M": {...}}` |
//! | array | [`AttrValue::L`] | `{"L": [...]}` |
//!
//! ## Precision
//!
//! Numbers are written as decimal text and decoded as doubles, so an integer
//! such as `2` comes back as `2.0`, and integers beyond 2^53 lose digits.
//! Decoding text that is not a finite number fails with
//! [`TrackerError::Format`](crate::error::TrackerError::Format).
//!
//! ## Usage
//!
//! ```ignore
//! let item = encode_mapping(&body);          // JSON object -> store item
//! store.put_item(item)?;
//! let object = decode_mapping(&stored)?;     // store item -> JSON object
//! ```

mod codec;
mod value;

pub use codec::{decode_mapping, decode_value, encode_mapping, encode_serializable, encode_value};
pub use value::{AttrValue, Item};
