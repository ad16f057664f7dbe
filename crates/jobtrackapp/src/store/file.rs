use super::{ItemKey, ItemStore, KeySchema, SortCondition};
use crate::attributes::Item;
use crate::error::{Result, TrackerError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

/// Table persisted as one JSON document of items in wire form.
///
/// Every operation reads the whole file; writes go through a temp file and a
/// rename. The mutex serializes read-modify-write cycles within one process.
pub struct FileTable {
    path: PathBuf,
    schema: KeySchema,
    lock: Mutex<()>,
}

impl FileTable {
    pub fn new(path: impl Into<PathBuf>, schema: KeySchema) -> Self {
        Self {
            path: path.into(),
            schema,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty table file if none exists yet. Returns true if created.
    pub fn create_if_missing(&self) -> Result<bool> {
        let _guard = self.guard()?;
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&BTreeMap::new())?;
        Ok(true)
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| TrackerError::Store("table lock poisoned".to_string()))
    }

    fn load(&self) -> Result<BTreeMap<ItemKey, Item>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(TrackerError::Io)?;
        let items: Vec<Item> =
            serde_json::from_str(&content).map_err(TrackerError::Serialization)?;
        items
            .into_iter()
            .map(|item| Ok((self.schema.key_of(&item)?, item)))
            .collect()
    }

    fn save(&self, items: &BTreeMap<ItemKey, Item>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(TrackerError::Io)?;
        }

        let rows: Vec<&Item> = items.values().collect();
        let content = serde_json::to_string_pretty(&rows).map_err(TrackerError::Serialization)?;

        // Atomic write
        let tmp_file = dir.join(format!(".table-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(TrackerError::Io)?;
        fs::rename(&tmp_file, &self.path).map_err(TrackerError::Io)?;
        Ok(())
    }
}

impl ItemStore for FileTable {
    fn get_item(&self, key: &ItemKey) -> Result<Option<Item>> {
        let _guard = self.guard()?;
        Ok(self.load()?.remove(key))
    }

    fn query(&self, partition: &str, condition: &SortCondition) -> Result<Vec<Item>> {
        let _guard = self.guard()?;
        Ok(self
            .load()?
            .into_iter()
            .filter(|(key, _)| key.partition == partition && condition.matches(&key.sort))
            .map(|(_, item)| item)
            .collect())
    }

    fn put_item(&self, item: Item) -> Result<()> {
        let key = self.schema.key_of(&item)?;
        let _guard = self.guard()?;
        let mut items = self.load()?;
        items.insert(key, item);
        self.save(&items)
    }

    fn delete_item(&self, key: &ItemKey) -> Result<Option<Item>> {
        let _guard = self.guard()?;
        let mut items = self.load()?;
        let old = items.remove(key);
        if old.is_some() {
            self.save(&items)?;
        }
        Ok(old)
    }

    fn key_schema(&self) -> &KeySchema {
        &self.schema
    }
}
