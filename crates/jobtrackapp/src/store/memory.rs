use super::{ItemKey, ItemStore, KeySchema, SortCondition};
use crate::attributes::Item;
use crate::error::{Result, TrackerError};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory table for testing.
///
/// Items live in a `BTreeMap` ordered by key, so a partition's items are
/// contiguous and already in sort-key order for `query`.
pub struct MemTable {
    schema: KeySchema,
    items: RwLock<BTreeMap<ItemKey, Item>>,
    simulate_write_error: AtomicBool,
}

impl MemTable {
    pub fn new(schema: KeySchema) -> Self {
        Self {
            schema,
            items: RwLock::new(BTreeMap::new()),
            simulate_write_error: AtomicBool::new(false),
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<ItemKey, Item>>> {
        self.items
            .read()
            .map_err(|_| TrackerError::Store("table lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<ItemKey, Item>>> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(TrackerError::Store("Simulated write error".to_string()));
        }
        self.items
            .write()
            .map_err(|_| TrackerError::Store("table lock poisoned".to_string()))
    }
}

impl ItemStore for MemTable {
    fn get_item(&self, key: &ItemKey) -> Result<Option<Item>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn query(&self, partition: &str, condition: &SortCondition) -> Result<Vec<Item>> {
        let items = self.read()?;
        let start = ItemKey::new(partition, "");
        Ok(items
            .range(start..)
            .take_while(|(key, _)| key.partition == partition)
            .filter(|(key, _)| condition.matches(&key.sort))
            .map(|(_, item)| item.clone())
            .collect())
    }

    fn put_item(&self, item: Item) -> Result<()> {
        let key = self.schema.key_of(&item)?;
        self.write()?.insert(key, item);
        Ok(())
    }

    fn delete_item(&self, key: &ItemKey) -> Result<Option<Item>> {
        Ok(self.write()?.remove(key))
    }

    fn key_schema(&self) -> &KeySchema {
        &self.schema
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::attributes::AttrValue;

    pub fn schema() -> KeySchema {
        KeySchema::new("userId", "applicationId")
    }

    pub fn item(user: &str, sort: &str, fields: &[(&str, AttrValue)]) -> Item {
        let mut item = Item::new();
        item.insert("userId".to_string(), user.into());
        item.insert("applicationId".to_string(), sort.into());
        for (name, value) in fields {
            item.insert(name.to_string(), value.clone());
        }
        item
    }

    pub struct TableFixture {
        pub table: MemTable,
    }

    impl Default for TableFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TableFixture {
        pub fn new() -> Self {
            Self {
                table: MemTable::new(schema()),
            }
        }

        pub fn with_profile(self, user: &str, name: &str) -> Self {
            self.table
                .put_item(item(user, "profile", &[("name", name.into())]))
                .unwrap();
            self
        }

        pub fn with_application(self, user: &str, id: &str, company: &str) -> Self {
            self.table
                .put_item(item(user, id, &[("company", company.into())]))
                .unwrap();
            self
        }
    }
}
