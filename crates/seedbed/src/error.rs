//! Error types for the seeding system
//!
//! Covers store-boundary failures, orchestration problems (unknown or
//! circular seeder dependencies), and malformed fixture data.

use thiserror::Error;

use crate::entity::EntityKind;

/// Result type alias for seeding operations
pub type SeedResult<T> = Result<T, SeedError>;

/// Error types for seeding operations
#[derive(Debug, Error)]
pub enum SeedError {
    /// A record with the same natural key already exists and the caller
    /// used a plain insert instead of an upsert
    #[error("duplicate natural key '{key}' for {kind}")]
    DuplicateKey { kind: EntityKind, key: String },

    /// A record referenced by id does not exist in the store
    #[error("record {id} not found in {kind}")]
    NotFound { kind: EntityKind, id: uuid::Uuid },

    /// Fixture or generated record is missing a required field or carries
    /// a value of the wrong type
    #[error("malformed record for {kind}: {message}")]
    MalformedRecord { kind: EntityKind, message: String },

    /// Seeder orchestration error (unknown dependency, duplicate name)
    #[error("seeder configuration error: {0}")]
    Configuration(String),

    /// Circular dependency between registered seeders
    #[error("circular dependency detected in seeders: {0}")]
    CircularDependency(String),

    /// Refused to run in an unsafe environment without explicit opt-in
    #[error("environment '{0}' is not safe for automatic seeding; use explicit opt-in")]
    UnsafeEnvironment(String),

    /// Underlying store failure
    #[error("store error: {0}")]
    Store(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
