//! In-memory store
//!
//! Backs seeding runs that target a JSON snapshot instead of a live
//! database, and every test in this crate.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::entity::EntityKind;
use crate::error::{SeedError, SeedResult};
use crate::record::{NaturalKey, Record};
use crate::store::Store;

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<EntityKind, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full dump of every table as a JSON object keyed by table name.
    /// Tables are emitted in a stable order so identical runs produce
    /// identical snapshots.
    pub fn snapshot(&self) -> Value {
        let tables = self.tables.read().expect("store lock poisoned");
        let mut out = serde_json::Map::new();
        for kind in EntityKind::ALL {
            let rows: Vec<Value> = tables
                .get(&kind)
                .map(|records| {
                    records
                        .iter()
                        .map(|r| {
                            let mut row = serde_json::Map::new();
                            row.insert("id".to_string(), json!(r.id.to_string()));
                            row.extend(r.fields.clone());
                            Value::Object(row)
                        })
                        .collect()
                })
                .unwrap_or_default();
            out.insert(kind.table_name().to_string(), Value::Array(rows));
        }
        Value::Object(out)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert(&self, record: Record, key: Option<&NaturalKey>) -> SeedResult<Record> {
        let mut tables = self.tables.write().expect("store lock poisoned");
        let rows = tables.entry(record.kind).or_default();
        if let Some(key) = key {
            if rows.iter().any(|r| r.matches_key(key)) {
                return Err(SeedError::DuplicateKey {
                    kind: record.kind,
                    key: key.describe(),
                });
            }
        }
        rows.push(record.clone());
        Ok(record)
    }

    async fn find_by_key(&self, kind: EntityKind, key: &NaturalKey) -> SeedResult<Option<Record>> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables
            .get(&kind)
            .and_then(|rows| rows.iter().find(|r| r.matches_key(key)).cloned()))
    }

    async fn find_or_insert(&self, key: &NaturalKey, record: Record) -> SeedResult<(Record, bool)> {
        let mut tables = self.tables.write().expect("store lock poisoned");
        let rows = tables.entry(record.kind).or_default();
        if let Some(existing) = rows.iter().find(|r| r.matches_key(key)) {
            return Ok((existing.clone(), false));
        }
        rows.push(record.clone());
        Ok((record, true))
    }

    async fn update(&self, record: Record) -> SeedResult<()> {
        let mut tables = self.tables.write().expect("store lock poisoned");
        let rows = tables.entry(record.kind).or_default();
        match rows.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(SeedError::NotFound {
                kind: record.kind,
                id: record.id,
            }),
        }
    }

    async fn find_by_id(&self, kind: EntityKind, id: Uuid) -> SeedResult<Option<Record>> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables
            .get(&kind)
            .and_then(|rows| rows.iter().find(|r| r.id == id).cloned()))
    }

    async fn all(&self, kind: EntityKind) -> SeedResult<Vec<Record>> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables.get(&kind).cloned().unwrap_or_default())
    }

    async fn count(&self, kind: EntityKind) -> SeedResult<usize> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables.get(&kind).map(Vec::len).unwrap_or(0))
    }

    async fn delete_all(&self, kind: EntityKind) -> SeedResult<usize> {
        let mut tables = self.tables.write().expect("store lock poisoned");
        Ok(tables.remove(&kind).map(|rows| rows.len()).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u128, email: &str) -> Record {
        Record::new(EntityKind::User, Uuid::from_u128(id)).with("email", email)
    }

    #[tokio::test]
    async fn insert_with_key_rejects_duplicates() {
        let store = MemoryStore::new();
        let key = NaturalKey::new("email", "ana@example.com");
        store
            .insert(user(1, "ana@example.com"), Some(&key))
            .await
            .unwrap();
        let err = store
            .insert(user(2, "ana@example.com"), Some(&key))
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::DuplicateKey { .. }));
    }

    #[tokio::test]
    async fn find_or_insert_is_idempotent() {
        let store = MemoryStore::new();
        let key = NaturalKey::new("email", "ana@example.com");
        let (first, created) = store
            .find_or_insert(&key, user(1, "ana@example.com"))
            .await
            .unwrap();
        assert!(created);
        let (second, created) = store
            .find_or_insert(&key, user(2, "ana@example.com"))
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(store.count(EntityKind::User).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_replaces_by_id() {
        let store = MemoryStore::new();
        let record = store.insert(user(1, "ana@example.com"), None).await.unwrap();
        let changed = record.clone().with("email", "ana@demo.net");
        store.update(changed).await.unwrap();
        let found = store
            .find_by_id(EntityKind::User, record.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.str_field("email"), Some("ana@demo.net"));
    }

    #[tokio::test]
    async fn update_of_missing_record_errors() {
        let store = MemoryStore::new();
        let err = store.update(user(9, "ghost@example.com")).await.unwrap_err();
        assert!(matches!(err, SeedError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_all_reports_removed_count() {
        let store = MemoryStore::new();
        store.insert(user(1, "a@example.com"), None).await.unwrap();
        store.insert(user(2, "b@example.com"), None).await.unwrap();
        assert_eq!(store.delete_all(EntityKind::User).await.unwrap(), 2);
        assert_eq!(store.count(EntityKind::User).await.unwrap(), 0);
        assert_eq!(store.delete_all(EntityKind::User).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn snapshot_lists_every_table() {
        let store = MemoryStore::new();
        store.insert(user(1, "a@example.com"), None).await.unwrap();
        let snapshot = store.snapshot();
        assert_eq!(snapshot["users"].as_array().unwrap().len(), 1);
        assert_eq!(snapshot["invoices"].as_array().unwrap().len(), 0);
        assert_eq!(snapshot["users"][0]["email"], "a@example.com");
    }
}
