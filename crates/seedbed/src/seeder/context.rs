//! Shared state handed to every seeder run
//!
//! The context owns the store handle, the fake-data source, the clock, and
//! the document-number sequences. Seeders receive it mutably, one at a time;
//! nothing here is global.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::entity::EntityKind;
use crate::error::SeedResult;
use crate::fake::Faker;
use crate::record::Record;
use crate::sequence::SequenceSet;
use crate::store::Store;

/// Per-run tuning: how many procedural records each seeder generates
#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub default_count: usize,
    overrides: HashMap<String, usize>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            default_count: 10,
            overrides: HashMap::new(),
        }
    }
}

impl SeedOptions {
    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }

    pub fn with_override(mut self, seeder: impl Into<String>, count: usize) -> Self {
        self.overrides.insert(seeder.into(), count);
        self
    }

    pub fn count_for(&self, seeder: &str) -> usize {
        self.overrides
            .get(seeder)
            .copied()
            .unwrap_or(self.default_count)
    }
}

pub struct SeedContext {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    pub faker: Faker,
    pub sequences: SequenceSet,
    pub options: SeedOptions,
}

impl SeedContext {
    pub fn new(store: Arc<dyn Store>, faker: Faker) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            faker,
            sequences: SequenceSet::new(),
            options: SeedOptions::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_options(mut self, options: SeedOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// New empty record of the given kind with an id minted from the faker,
    /// so seeded runs produce stable ids
    pub fn new_record(&mut self, kind: EntityKind) -> Record {
        let id = self.faker.uuid();
        Record::new(kind, id)
    }

    /// Prerequisite pool: all rows of `kind`, or `None` when the pool is
    /// empty and the caller should skip
    pub async fn pool(&self, kind: EntityKind) -> SeedResult<Option<Vec<Record>>> {
        let rows = self.store.all(kind).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows))
        }
    }

    /// Uniformly pick one record from a non-empty pool
    pub fn pick<'a>(&mut self, pool: &'a [Record]) -> &'a Record {
        self.faker.choose(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn pool_is_none_when_table_empty() {
        let store = Arc::new(MemoryStore::new());
        let ctx = SeedContext::new(store, Faker::seeded(1));
        assert!(ctx.pool(EntityKind::User).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn new_record_ids_are_deterministic_under_seed() {
        let store = Arc::new(MemoryStore::new());
        let mut a = SeedContext::new(store.clone(), Faker::seeded(99));
        let mut b = SeedContext::new(store, Faker::seeded(99));
        assert_eq!(
            a.new_record(EntityKind::User).id,
            b.new_record(EntityKind::User).id
        );
    }

    #[test]
    fn options_override_wins_over_default() {
        let options = SeedOptions::default()
            .with_default_count(25)
            .with_override("invoices", 3);
        assert_eq!(options.count_for("invoices"), 3);
        assert_eq!(options.count_for("users"), 25);
    }

    #[test]
    fn context_uses_injected_clock() {
        let store = Arc::new(MemoryStore::new());
        let clock = FixedClock::at_date(2024, 1, 15);
        let ctx =
            SeedContext::new(store, Faker::seeded(1)).with_clock(Arc::new(clock));
        assert_eq!(ctx.now(), clock.now());
    }
}
