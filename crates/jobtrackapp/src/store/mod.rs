//! # Storage Layer
//!
//! This module defines the storage abstraction for the tracker. The
//! [`ItemStore`] trait is the whole contract the handlers depend on: four
//! operations over items keyed by a partition key and a sort key.
//!
//! ## Table Layout
//!
//! One table holds every record. The partition key identifies the owning
//! user; the sort key identifies the record within that user:
//!
//! ```text
//! userId     applicationId        attributes...
//! ─────────  ───────────────────  ────────────────────────────
//! u-123      app#6f1c...          company, role, status, ...
//! u-123      app#9a07...          ...
//! u-123      profile              name, email, ...
//! ```
//!
//! Key attribute names are not fixed; they come from [`KeySchema`].
//!
//! ## Operations
//!
//! - `get_item`: exact key lookup, `None` when absent
//! - `query`: every item of one partition whose sort key matches a
//!   [`SortCondition`], in ascending sort-key order
//! - `put_item`: create or replace; the key is read from the item itself
//! - `delete_item`: remove and return the old item, `None` when absent
//!
//! ## Implementations
//!
//! - [`file::FileTable`]: The whole table as one JSON document on disk.
//! - [`memory::MemTable`]: For testing handlers without filesystem I/O.
//!
//! Both are safe to share between threads; every method takes `&self`.

use crate::attributes::Item;
use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod file;
pub mod memory;

/// Names of the two key attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySchema {
    pub partition_key: String,
    pub sort_key: String,
}

impl KeySchema {
    pub fn new(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: sort_key.into(),
        }
    }

    /// Read the primary key out of an item. Both key attributes must be strings.
    pub fn key_of(&self, item: &Item) -> Result<ItemKey> {
        let read = |name: &str| {
            item.get(name)
                .and_then(|attr| attr.as_str())
                .map(str::to_string)
                .ok_or_else(|| TrackerError::MissingKey(name.to_string()))
        };
        Ok(ItemKey {
            partition: read(&self.partition_key)?,
            sort: read(&self.sort_key)?,
        })
    }
}

/// Primary key of one item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey {
    pub partition: String,
    pub sort: String,
}

impl ItemKey {
    pub fn new(partition: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            sort: sort.into(),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.partition, self.sort)
    }
}

/// Sort-key condition for [`ItemStore::query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortCondition {
    Equals(String),
    BeginsWith(String),
}

impl SortCondition {
    pub fn matches(&self, sort: &str) -> bool {
        match self {
            SortCondition::Equals(value) => sort == value,
            SortCondition::BeginsWith(prefix) => sort.starts_with(prefix.as_str()),
        }
    }
}

/// Abstract interface for item storage.
pub trait ItemStore: Send + Sync {
    /// Get an item by its primary key
    fn get_item(&self, key: &ItemKey) -> Result<Option<Item>>;

    /// List the items of one partition whose sort key matches `condition`
    fn query(&self, partition: &str, condition: &SortCondition) -> Result<Vec<Item>>;

    /// Save an item (create or replace)
    fn put_item(&self, item: Item) -> Result<()>;

    /// Delete an item, returning what was stored
    fn delete_item(&self, key: &ItemKey) -> Result<Option<Item>>;

    /// Key attribute names this store reads from items
    fn key_schema(&self) -> &KeySchema;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttrValue;

    #[test]
    fn key_of_reads_string_keys() {
        let schema = KeySchema::new("userId", "applicationId");
        let mut item = Item::new();
        item.insert("userId".into(), "u-1".into());
        item.insert("applicationId".into(), "app#1".into());
        assert_eq!(schema.key_of(&item).unwrap(), ItemKey::new("u-1", "app#1"));
    }

    #[test]
    fn key_of_rejects_missing_or_non_string_keys() {
        let schema = KeySchema::new("userId", "applicationId");
        let mut item = Item::new();
        item.insert("userId".into(), "u-1".into());
        assert!(matches!(
            schema.key_of(&item),
            Err(TrackerError::MissingKey(name)) if name == "applicationId"
        ));

        item.insert("applicationId".into(), AttrValue::N("1".into()));
        assert!(matches!(
            schema.key_of(&item),
            Err(TrackerError::MissingKey(_))
        ));
    }

    #[test]
    fn sort_condition_matching() {
        assert!(SortCondition::BeginsWith("app#".into()).matches("app#42"));
        assert!(!SortCondition::BeginsWith("app#".into()).matches("profile"));
        assert!(SortCondition::Equals("profile".into()).matches("profile"));
        assert!(!SortCondition::Equals("profile".into()).matches("profiles"));
    }
}
