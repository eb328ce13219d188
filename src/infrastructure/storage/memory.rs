// In-memory record store using DashMap
use crate::domain::error::SignAidError;
use crate::domain::records::Record;
use crate::domain::traits::{RecordFilter, Repository};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

type Key = (&'static str, String);

/// Thread-safe in-memory store
///
/// Records are kept as JSON values so one map serves every collection.
/// `find` returns records in insertion order.
pub struct MemoryStore {
    map: DashMap<Key, (u64, serde_json::Value)>,
    seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
            seq: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&self) {
        self.map.clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<T>, SignAidError> {
        let key = (T::COLLECTION, id.to_string());
        match self.map.get(&key) {
            Some(entry) => Ok(Some(serde_json::from_value(entry.value().1.clone())?)),
            None => Ok(None),
        }
    }

    async fn put(&self, record: &T) -> Result<(), SignAidError> {
        let value = serde_json::to_value(record)?;
        let key = (T::COLLECTION, record.id().to_string());

        // 覆盖时保留原插入顺序
        self.map
            .entry(key)
            .and_modify(|slot| slot.1 = value.clone())
            .or_insert_with(|| (self.seq.fetch_add(1, Ordering::Relaxed), value.clone()));

        Ok(())
    }

    async fn find(&self, filter: RecordFilter<'_, T>) -> Result<Vec<T>, SignAidError> {
        let mut rows: Vec<(u64, serde_json::Value)> = self
            .map
            .iter()
            .filter(|entry| entry.key().0 == T::COLLECTION)
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);

        let mut matches = Vec::new();
        for (_, value) in rows {
            let record: T = serde_json::from_value(value)?;
            if filter(&record) {
                matches.push(record);
            }
        }

        Ok(matches)
    }
}
