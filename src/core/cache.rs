use crate::domain::model::ServiceRecord;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory cache of services resolved on the instance, keyed by lower-cased name.
///
/// Records are only ever inserted whole and are never updated or removed.
#[derive(Debug, Default)]
pub struct ServiceCache {
    services: RwLock<HashMap<String, ServiceRecord>>,
}

fn cache_key(name: &str) -> String {
    name.to_lowercase()
}

impl ServiceCache {
    pub fn new() -> Self {
        Self::default()
    }

    // 快取只會新增完整記錄，鎖中毒時資料仍然一致
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ServiceRecord>> {
        self.services.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ServiceRecord>> {
        self.services.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached service ID for `name`, compared case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.read()
            .get(&cache_key(name))
            .map(|record| record.id.to_string())
    }

    pub fn get(&self, name: &str) -> Option<ServiceRecord> {
        self.read().get(&cache_key(name)).cloned()
    }

    /// Insert `record` unless a service with the same name is already cached.
    /// Returns `true` when the record was added.
    pub fn insert_if_absent(&self, record: ServiceRecord) -> bool {
        let mut services = self.write();
        let key = cache_key(&record.name);
        if services.contains_key(&key) {
            return false;
        }
        services.insert(key, record);
        true
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn records(&self) -> Vec<ServiceRecord> {
        self.read().values().cloned().collect()
    }
}
