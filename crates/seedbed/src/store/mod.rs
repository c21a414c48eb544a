//! Persistence boundary
//!
//! Seeders are pure clients of the [`Store`] trait; they never know what is
//! behind it. The crate ships an in-memory implementation suitable for
//! snapshot export and tests; a database-backed implementation plugs in at
//! the same seam.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entity::EntityKind;
use crate::error::SeedResult;
use crate::record::{NaturalKey, Record};

pub mod memory;

pub use memory::MemoryStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a record. Fails with `DuplicateKey` if `key` is given and a
    /// record with the same natural key already exists.
    async fn insert(&self, record: Record, key: Option<&NaturalKey>) -> SeedResult<Record>;

    /// Look up one record by natural key
    async fn find_by_key(&self, kind: EntityKind, key: &NaturalKey) -> SeedResult<Option<Record>>;

    /// Upsert-or-skip: returns the existing record and `false` when the
    /// natural key is already present, otherwise inserts and returns `true`
    async fn find_or_insert(&self, key: &NaturalKey, record: Record) -> SeedResult<(Record, bool)>;

    /// Replace a previously inserted record by id (one-shot post-processing
    /// such as parent-link backfill)
    async fn update(&self, record: Record) -> SeedResult<()>;

    /// Look up one record by id
    async fn find_by_id(&self, kind: EntityKind, id: Uuid) -> SeedResult<Option<Record>>;

    /// All records of one kind, in insertion order
    async fn all(&self, kind: EntityKind) -> SeedResult<Vec<Record>>;

    /// Row count for one kind
    async fn count(&self, kind: EntityKind) -> SeedResult<usize>;

    /// Remove all rows of one kind, returning how many were removed
    async fn delete_all(&self, kind: EntityKind) -> SeedResult<usize>;
}
