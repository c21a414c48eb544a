//! # seedbed: deterministic fixture and seed-data generation
//!
//! A seeding run has three layers: a fixture catalog of hand-authored
//! records, a procedural generator producing randomized-but-constrained
//! records, and an orchestrator that runs entity seeders in dependency
//! order against a pluggable store boundary with upsert-by-natural-key
//! idempotency.
//!
//! Runs are reproducible: inject a seeded [`fake::Faker`] and a
//! [`clock::FixedClock`] and two runs produce identical datasets.

pub mod catalog;
pub mod clock;
pub mod entity;
pub mod error;
pub mod fake;
pub mod generator;
pub mod record;
pub mod seeder;
pub mod seeders;
pub mod sequence;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::{EntityKind, EntityRef};
pub use error::{SeedError, SeedResult};
pub use fake::Faker;
pub use record::{NaturalKey, Record};
pub use seeder::{
    Environment, RunSummary, SeedContext, SeedOptions, SeedReport, SeedStatus, Seeder,
    SeederManager,
};
pub use seeders::default_manager;
pub use sequence::SequenceSet;
pub use store::{MemoryStore, Store};
